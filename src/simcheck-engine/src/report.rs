// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::Result;
use crate::report_err;

/// The field values extracted from one HTML report.
///
/// `cells` is aligned with the configured column list: the case identifier
/// (recovered from the file name) at position 0, then one extracted value per
/// field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRecord {
    pub cells: Vec<String>,
}

impl ReportRecord {
    pub fn case_id(&self) -> &str {
        &self.cells[0]
    }
}

/// Extract the configured scalar fields from the report at `path`.
///
/// `fields` is the full column list; entries equal to `case_column` are
/// skipped (the identifier comes from the file name, not the page).  A field
/// label or marker missing from the page is an error naming the field, so a
/// malformed report is rejected rather than silently producing short rows.
pub fn extract_report(
    path: &Path,
    fields: &[String],
    case_column: &str,
    summary_suffix: &str,
) -> Result<ReportRecord> {
    let html = match std::fs::read_to_string(path) {
        Ok(html) => html,
        Err(err) => {
            return report_err!(FileRead, format!("{}: {}", path.display(), err));
        }
    };
    let nodes = text_nodes(&html)?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let case_id = case_id_from_name(&filename, summary_suffix);

    let mut cells = Vec::with_capacity(fields.len());
    cells.push(case_id.to_owned());
    for field in fields {
        if field == case_column {
            continue;
        }
        cells.push(scalar_value(&nodes, field, fields)?);
    }

    Ok(ReportRecord { cells })
}

/// The case identifier is the file name truncated at the summary suffix; a
/// name without the suffix is used as-is.
pub fn case_id_from_name<'a>(filename: &'a str, summary_suffix: &str) -> &'a str {
    match filename.find(summary_suffix) {
        Some(at) => &filename[..at],
        None => filename,
    }
}

/// Flatten the page into its text nodes, in document order.  Markup structure
/// is otherwise ignored; report generators emit each label and value as its
/// own text run, which is all the scalar scan needs.
fn text_nodes(html: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(true);
    // summary reports are tool-generated but not always well-formed XML
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut nodes = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Text(text)) => {
                let text = match text.decode().ok().and_then(|decoded| {
                    quick_xml::escape::unescape(&decoded)
                        .ok()
                        .map(|text| text.into_owned())
                }) {
                    Some(text) => text,
                    // entities XML doesn't define (&nbsp; and friends)
                    None => String::from_utf8_lossy(&text).into_owned(),
                };
                let text = text.trim();
                if !text.is_empty() {
                    nodes.push(text.to_owned());
                }
            }
            Ok(_) => {}
            Err(err) => {
                return report_err!(XmlRead, err.to_string());
            }
        }
    }

    Ok(nodes)
}

/// Pull one scalar value out of the flattened page text.
///
/// The page declares each quantity as a label followed by a Type/SCALAR
/// marker and a Value marker; the value is the text immediately after the
/// Value marker.  Depending on how the generator broke up the markup, a
/// marker and its neighbor may share a text node or sit in adjacent ones;
/// both shapes are accepted.  The scan is bounded at the next node equal to
/// any configured field label, so a field missing its own markers is an
/// error rather than silently picking up a later field's block.
fn scalar_value(nodes: &[String], field: &str, fields: &[String]) -> Result<String> {
    let label_at = match nodes.iter().position(|n| n == field) {
        Some(at) => at,
        None => {
            return report_err!(MissingField, field.to_owned());
        }
    };
    let rest = &nodes[label_at + 1..];
    let end = rest
        .iter()
        .position(|n| fields.iter().any(|f| f == n))
        .unwrap_or(rest.len());
    let section = &rest[..end];

    let mut type_at = None;
    for (i, node) in section.iter().enumerate() {
        if node == "TypeSCALAR"
            || (node == "Type" && section.get(i + 1).map(String::as_str) == Some("SCALAR"))
        {
            type_at = Some(i);
            break;
        }
    }
    let type_at = match type_at {
        Some(at) => at,
        None => {
            return report_err!(MissingTypeMarker, field.to_owned());
        }
    };

    for (i, node) in section.iter().enumerate().skip(type_at + 1) {
        if let Some(value) = node.strip_prefix("Value") {
            if !value.is_empty() {
                return Ok(value.to_owned());
            }
            if let Some(next) = section.get(i + 1) {
                return Ok(next.clone());
            }
        }
    }

    report_err!(MissingValueMarker, field.to_owned())
}
