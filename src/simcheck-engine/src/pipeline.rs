// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::{Path, PathBuf};

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::compare::{Comparison, compare_row};
use crate::config::Config;
use crate::discovery::discover_reports;
use crate::output::{result_path, write_result};
use crate::reference::ReferenceTable;
use crate::report::extract_report;

/// What a run did: the diff files it produced, the reports it had to give up
/// on, and the configured cases it never saw a report for.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub produced: Vec<PathBuf>,
    /// Reports that failed extraction or comparison, with the error.  A bad
    /// report costs only its own diff; the rest of the run continues.
    pub failures: Vec<(String, Error)>,
    pub missing_cases: Vec<String>,
    pub mismatch_count: usize,
}

impl RunSummary {
    pub fn checked_count(&self) -> usize {
        self.produced.len()
    }
}

/// Run the whole check: discover reports, load the reference table, then
/// extract, compare, and emit a diff per report.
///
/// Returns an error only for run-level failures (no reports at all, an
/// unreadable reference CSV); per-report failures are collected in the
/// summary instead.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let folder = config.folder();
    let discovered = discover_reports(&folder, &config.case_ids)?;

    if discovered.reports.is_empty() {
        return Err(Error::new(
            ErrorKind::Discovery,
            ErrorCode::NoReportsFound,
            Some(format!("no report in {} matched", folder.display())),
        ));
    }

    if discovered.missing.is_empty() {
        println!("Html files were found for all provided \"CASESTRs.\"");
    } else {
        println!("Html files could not be found for the following \"CASESTRs\": ");
        for case_id in &discovered.missing {
            println!("{case_id}");
        }
    }

    let columns = config.csv_columns();
    let html_columns = config.html_columns();
    let table = ReferenceTable::load(&config.reference_csv, &columns)?;

    let mut summary = RunSummary {
        missing_cases: discovered.missing,
        ..RunSummary::default()
    };

    for report_file in &discovered.reports {
        let path = folder.join(&report_file.filename);
        match check_one(config, &table, &columns, &html_columns, &path) {
            Ok((out_path, comparison)) => {
                summary.mismatch_count += comparison.mismatch_count();
                summary.produced.push(out_path);
            }
            Err(err) => {
                summary.failures.push((report_file.filename.clone(), err));
            }
        }
    }

    Ok(summary)
}

fn check_one(
    config: &Config,
    table: &ReferenceTable,
    columns: &[String],
    html_columns: &[String],
    path: &Path,
) -> Result<(PathBuf, Comparison)> {
    let record = extract_report(path, html_columns, &config.case_column, &config.summary_suffix)?;

    let row = match table.row(record.case_id()) {
        Some(row) => row,
        None => {
            return Err(Error::new(
                ErrorKind::Reference,
                ErrorCode::MissingCaseRow,
                Some(record.case_id().to_owned()),
            ));
        }
    };

    let comparison = compare_row(&row, &record, columns)?;
    for column in &comparison.mismatched {
        println!(
            "CASESTR-{}, has mismatches in the following column-\n{}",
            record.case_id(),
            column
        );
    }

    let out_path = result_path(path);
    write_result(&out_path, columns, &row, &record, &comparison)?;

    Ok((out_path, comparison))
}
