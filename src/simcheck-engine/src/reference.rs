// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::path::Path;

use crate::common::{Error, ErrorCode, ErrorKind, Result};

/// The reference CSV, projected to the configured columns and indexed by case
/// identifier.  Loaded once per run, immutable afterwards.
///
/// Cells are addressed by configured column position but resolved through the
/// file's header, so the file may order its columns however it likes.  A
/// configured column absent from the file yields no cell; only the case
/// column itself is required.
#[derive(Debug)]
pub struct ReferenceTable {
    columns: Vec<String>,
    // per configured column, its position in the file's header (if present)
    col_idx: Vec<Option<usize>>,
    records: Vec<csv::StringRecord>,
    index: HashMap<String, usize>,
}

/// A borrowed view of one reference row.
#[derive(Clone, Copy)]
pub struct ReferenceRow<'a> {
    table: &'a ReferenceTable,
    row: usize,
}

impl ReferenceTable {
    /// Load `path`, keeping only `columns` (case column first).  The header
    /// row is required; rows after the first with a given case identifier are
    /// ignored on lookup.
    pub fn load(path: &Path, columns: &[String]) -> Result<ReferenceTable> {
        let mut rdr = csv::ReaderBuilder::new().from_path(path).map_err(|err| {
            Error::new(
                ErrorKind::Reference,
                ErrorCode::CsvRead,
                Some(format!("{}: {}", path.display(), err)),
            )
        })?;

        let header = rdr
            .headers()
            .map_err(|err| {
                Error::new(
                    ErrorKind::Reference,
                    ErrorCode::CsvRead,
                    Some(err.to_string()),
                )
            })?
            .clone();

        let col_idx: Vec<Option<usize>> = columns
            .iter()
            .map(|name| header.iter().position(|h| h == name))
            .collect();

        let case_idx = match col_idx.first().copied().flatten() {
            Some(idx) => idx,
            None => {
                return Err(Error::new(
                    ErrorKind::Reference,
                    ErrorCode::MissingCaseColumn,
                    columns.first().cloned(),
                ));
            }
        };

        let mut records = Vec::new();
        let mut index = HashMap::new();
        for record in rdr.records() {
            let record = record.map_err(|err| {
                Error::new(
                    ErrorKind::Reference,
                    ErrorCode::CsvRead,
                    Some(err.to_string()),
                )
            })?;
            if let Some(case_id) = record.get(case_idx) {
                index.entry(case_id.to_owned()).or_insert(records.len());
            }
            records.push(record);
        }

        Ok(ReferenceTable {
            columns: columns.to_vec(),
            col_idx,
            records,
            index,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the row for a case identifier.
    pub fn row(&self, case_id: &str) -> Option<ReferenceRow<'_>> {
        self.index
            .get(case_id)
            .map(|&row| ReferenceRow { table: self, row })
    }
}

impl<'a> ReferenceRow<'a> {
    /// The cell at configured column position `col`, or `None` when that
    /// column was absent from the file.
    pub fn cell(&self, col: usize) -> Option<&'a str> {
        let idx = (*self.table.col_idx.get(col)?)?;
        self.table.records[self.row].get(idx)
    }

    /// All cells in configured column order; absent columns are empty.
    pub fn cells(&self) -> Vec<&'a str> {
        (0..self.table.columns.len())
            .map(|col| self.cell(col).unwrap_or(""))
            .collect()
    }
}
