// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::reference::ReferenceRow;
use crate::report::ReportRecord;

/// The outcome of comparing one reference row against one report record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// 0/1 per configured column; position 0 (the case column) is always 0.
    pub flags: Vec<u8>,
    /// Names of the mismatched columns, in column order.
    pub mismatched: Vec<String>,
}

impl Comparison {
    pub fn mismatch_count(&self) -> usize {
        self.mismatched.len()
    }
}

/// Compare a reference row and a report record field by field.
///
/// `columns` is the configured CSV column list (case column first); the
/// record's cells must be aligned to it, which `Config::validate` guarantees
/// for records built from a validated configuration.
pub fn compare_row(
    reference: &ReferenceRow,
    report: &ReportRecord,
    columns: &[String],
) -> Result<Comparison> {
    let mut flags = vec![0u8; columns.len()];
    let mut mismatched = Vec::new();

    for (i, column) in columns.iter().enumerate().skip(1) {
        let hcell = report.cells[i].as_str();
        let mismatch = match reference.cell(i) {
            Some(ccell) => cell_mismatch(ccell, hcell).map_err(|err| {
                Error::new(
                    err.kind,
                    err.code,
                    Some(match err.details {
                        Some(details) => format!("{column}: {details}"),
                        None => column.clone(),
                    }),
                )
            })?,
            // the reference CSV has no such column; nothing to match
            None => true,
        };
        if mismatch {
            flags[i] = 1;
            mismatched.push(column.clone());
        }
    }

    Ok(Comparison { flags, mismatched })
}

/// Compare two cells of the form `<number>[ <unit>]`.
///
/// A unit on exactly one side is a mismatch no matter what the numbers say,
/// and differing unit strings are a mismatch even when the numbers agree.
fn cell_mismatch(cvalue: &str, hvalue: &str) -> Result<bool> {
    let ctokens: Vec<&str> = cvalue.split(' ').collect();
    let htokens: Vec<&str> = hvalue.split(' ').collect();

    let c = parse_number(ctokens[0])?;
    let h = parse_number(htokens[0])?;

    let mut mismatch = !decimals_equal(c, h, fractional_digits(htokens[0]));
    if ctokens.len() != htokens.len() {
        mismatch = true;
    }
    if ctokens.len() == 2 && htokens.len() == 2 && ctokens[1] != htokens[1] {
        mismatch = true;
    }

    Ok(mismatch)
}

fn parse_number(token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| {
        Error::new(
            ErrorKind::Compare,
            ErrorCode::ExpectedNumber,
            Some(format!("'{token}'")),
        )
    })
}

/// The number of fractional digits in a numeric token, or `None` when it has
/// no fractional part.  This is what sets the comparison precision: the
/// report's own formatting decides how finely its values are held to the
/// reference.
fn fractional_digits(token: &str) -> Option<u32> {
    let (_, frac) = token.split_once('.')?;
    Some(frac.chars().take_while(|c| c.is_ascii_digit()).count() as u32)
}

/// Equality at `digits` fractional digits.  Each call computes its own
/// precision; nothing carries over between comparisons.
fn decimals_equal(c: f64, h: f64, digits: Option<u32>) -> bool {
    match digits {
        Some(digits) if digits > 0 => {
            let scale = 10f64.powi(digits.min(17) as i32);
            let (cs, hs) = (c * scale, h * scale);
            if !cs.is_finite() || !hs.is_finite() {
                return c == h;
            }
            cs.round() == hs.round()
        }
        _ => c == h,
    }
}
