// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::{Path, PathBuf};

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::compare::Comparison;
use crate::reference::ReferenceRow;
use crate::report::ReportRecord;

pub const ROW_LABELS: [&str; 3] = ["CSV", "HTML", "Mismatch"];

/// Where the diff for a report goes: same folder, same base name, `.csv`.
pub fn result_path(report_path: &Path) -> PathBuf {
    report_path.with_extension("csv")
}

/// Write the three-row annotated diff for one report: the reference row, the
/// extracted row, and the 0/1 mismatch flags, labeled down the first column.
/// An existing file at `path` is overwritten.
pub fn write_result(
    path: &Path,
    columns: &[String],
    reference: &ReferenceRow,
    report: &ReportRecord,
    comparison: &Comparison,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| {
        Error::new(
            ErrorKind::Output,
            ErrorCode::CsvWrite,
            Some(format!("{}: {}", path.display(), err)),
        )
    })?;

    let write_err = |err: csv::Error| {
        Error::new(
            ErrorKind::Output,
            ErrorCode::CsvWrite,
            Some(format!("{}: {}", path.display(), err)),
        )
    };

    let mut header: Vec<&str> = vec![""];
    header.extend(columns.iter().map(String::as_str));
    writer.write_record(&header).map_err(write_err)?;

    let mut csv_row: Vec<&str> = vec![ROW_LABELS[0]];
    csv_row.extend(reference.cells());
    writer.write_record(&csv_row).map_err(write_err)?;

    let mut html_row: Vec<&str> = vec![ROW_LABELS[1]];
    html_row.extend(report.cells.iter().map(String::as_str));
    writer.write_record(&html_row).map_err(write_err)?;

    let mut mismatch_row: Vec<&str> = vec![ROW_LABELS[2]];
    mismatch_row.extend(
        comparison
            .flags
            .iter()
            .map(|&flag| if flag == 0 { "0" } else { "1" }),
    );
    writer.write_record(&mismatch_row).map_err(write_err)?;

    writer.flush().map_err(|err| {
        Error::new(
            ErrorKind::Output,
            ErrorCode::CsvWrite,
            Some(format!("{}: {}", path.display(), err)),
        )
    })
}
