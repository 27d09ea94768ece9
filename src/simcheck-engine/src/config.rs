// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::config_err;

fn default_case_column() -> String {
    "CASESTR".to_owned()
}

fn default_summary_suffix() -> String {
    "_Summary.html".to_owned()
}

/// Everything a check run needs: where the reference CSV and the report files
/// live, which cases to look at, and which fields to compare.
///
/// `csv_fields` and `html_fields` are positionally aligned: position i in one
/// names the same quantity as position i in the other.  `validate` rejects
/// lists of differing length, so a loaded `Config` can't silently mis-pair
/// columns.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Path to the reference CSV.
    pub reference_csv: PathBuf,
    /// Folder holding the HTML reports.  Defaults to the folder containing
    /// the reference CSV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
    /// Case identifiers to check, e.g. `Case_041`.
    pub case_ids: Vec<String>,
    /// Column names to compare from the reference CSV.
    pub csv_fields: Vec<String>,
    /// Field labels to extract from the HTML reports, in the same order as
    /// `csv_fields`.
    pub html_fields: Vec<String>,
    /// Name of the case identifier column in the reference CSV.
    #[serde(default = "default_case_column")]
    pub case_column: String,
    /// Filename suffix stripped to recover a report's case identifier.
    #[serde(default = "default_summary_suffix")]
    pub summary_suffix: String,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                return config_err!(BadConfig, format!("{}: {}", path.display(), err));
            }
        };
        Config::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Config> {
        let config: Config = match serde_json::from_reader(reader) {
            Ok(config) => config,
            Err(err) => {
                return config_err!(BadConfig, err.to_string());
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.csv_fields.len() != self.html_fields.len() {
            return config_err!(
                MismatchedFieldLists,
                format!(
                    "{} csv_fields but {} html_fields",
                    self.csv_fields.len(),
                    self.html_fields.len()
                )
            );
        }
        if self.csv_fields.is_empty() {
            return config_err!(BadConfig, "no fields configured".to_owned());
        }
        if self.case_ids.is_empty() {
            return config_err!(BadConfig, "no case identifiers configured".to_owned());
        }
        if self.case_column.is_empty() {
            return config_err!(BadConfig, "empty case_column".to_owned());
        }
        Ok(())
    }

    /// The folder scanned for reports, and where diff files are written.
    pub fn folder(&self) -> PathBuf {
        match self.folder {
            Some(ref folder) => folder.clone(),
            None => match self.reference_csv.parent() {
                Some(parent) if parent != Path::new("") => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    /// The CSV column projection: the case column followed by the configured
    /// CSV field names.
    pub fn csv_columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.csv_fields.len() + 1);
        columns.push(self.case_column.clone());
        columns.extend(self.csv_fields.iter().cloned());
        columns
    }

    /// The HTML field list with the case column prepended, aligned
    /// positionally with `csv_columns`.
    pub fn html_columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.html_fields.len() + 1);
        columns.push(self.case_column.clone());
        columns.extend(self.html_fields.iter().cloned());
        columns
    }

    /// A filled-in configuration matching the layout this tool was first
    /// written against; `simcheck print-config` emits it as a template.
    pub fn example() -> Config {
        Config {
            reference_csv: PathBuf::from("Sample Input Files/substitutionfile_20230620.csv"),
            folder: None,
            case_ids: vec![
                "Case_041".to_owned(),
                "Case_042".to_owned(),
                "Case_043".to_owned(),
                "Case_044".to_owned(),
                "Case_045".to_owned(),
                "Case_046".to_owned(),
            ],
            csv_fields: vec![
                "Mach_Ref".to_owned(),
                "V_Ref".to_owned(),
                "Ps_Ref".to_owned(),
                "SAT_Ref".to_owned(),
                "Rho_Ref".to_owned(),
            ],
            html_fields: vec![
                "Mach Ref".to_owned(),
                "V Ref".to_owned(),
                "Ps Ref".to_owned(),
                "SAT Ref".to_owned(),
                "Rho Ref".to_owned(),
            ],
            case_column: default_case_column(),
            summary_suffix: default_summary_suffix(),
        }
    }
}
