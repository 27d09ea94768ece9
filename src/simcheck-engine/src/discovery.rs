// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::Path;

use crate::common::{Error, ErrorCode, ErrorKind, Result};

/// One HTML report matched during discovery, with the case identifier whose
/// substring matched its file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFile {
    pub filename: String,
    pub case_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Discovered {
    pub reports: Vec<ReportFile>,
    /// Configured case identifiers matched by no file, each listed once.
    pub missing: Vec<String>,
}

/// Scan `folder` for report files.  A file matches a case identifier when its
/// name contains both the identifier and the substring "html".  A file whose
/// name contains several identifiers is matched (and later checked) once per
/// identifier.
pub fn discover_reports(folder: &Path, case_ids: &[String]) -> Result<Discovered> {
    let entries = std::fs::read_dir(folder).map_err(|err| {
        Error::new(
            ErrorKind::Discovery,
            ErrorCode::FileRead,
            Some(format!("{}: {}", folder.display(), err)),
        )
    })?;

    let mut filenames: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            Error::new(
                ErrorKind::Discovery,
                ErrorCode::FileRead,
                Some(format!("{}: {}", folder.display(), err)),
            )
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            filenames.push(name);
        }
    }
    // read_dir order is platform-dependent; sort so runs are deterministic
    filenames.sort();

    let mut reports = Vec::new();
    for name in &filenames {
        for case_id in case_ids {
            if name.contains(case_id.as_str()) && name.contains("html") {
                reports.push(ReportFile {
                    filename: name.clone(),
                    case_id: case_id.clone(),
                });
            }
        }
    }

    let missing: Vec<String> = case_ids
        .iter()
        .filter(|case_id| !reports.iter().any(|r| &r.case_id == *case_id))
        .cloned()
        .collect();

    Ok(Discovered { reports, missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn matches_files_containing_case_and_html() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Case_041_Summary.html");
        touch(dir.path(), "Case_042_Summary.html");
        touch(dir.path(), "Case_042_Summary.csv"); // no "html"
        touch(dir.path(), "notes.txt");

        let case_ids = vec!["Case_041".to_owned(), "Case_042".to_owned()];
        let discovered = discover_reports(dir.path(), &case_ids).unwrap();

        let names: Vec<&str> = discovered
            .reports
            .iter()
            .map(|r| r.filename.as_str())
            .collect();
        assert_eq!(names, vec!["Case_041_Summary.html", "Case_042_Summary.html"]);
        assert!(discovered.missing.is_empty());
    }

    #[test]
    fn missing_identifiers_listed_once_each() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Case_041_Summary.html");

        let case_ids = vec![
            "Case_041".to_owned(),
            "Case_042".to_owned(),
            "Case_043".to_owned(),
        ];
        let discovered = discover_reports(dir.path(), &case_ids).unwrap();

        assert_eq!(discovered.reports.len(), 1);
        assert_eq!(discovered.missing, vec!["Case_042", "Case_043"]);
    }

    #[test]
    fn empty_folder_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let case_ids = vec!["Case_041".to_owned()];
        let discovered = discover_reports(dir.path(), &case_ids).unwrap();
        assert!(discovered.reports.is_empty());
        assert_eq!(discovered.missing, vec!["Case_041"]);
    }

    #[test]
    fn file_matching_two_identifiers_is_listed_twice() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Case_041_Case_042_Summary.html");

        let case_ids = vec!["Case_041".to_owned(), "Case_042".to_owned()];
        let discovered = discover_reports(dir.path(), &case_ids).unwrap();
        assert_eq!(discovered.reports.len(), 2);
        assert_eq!(discovered.reports[0].case_id, "Case_041");
        assert_eq!(discovered.reports[1].case_id, "Case_042");
    }

    #[test]
    fn unreadable_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("does-not-exist");
        let case_ids = vec!["Case_041".to_owned()];
        assert!(discover_reports(&bogus, &case_ids).is_err());
    }
}
