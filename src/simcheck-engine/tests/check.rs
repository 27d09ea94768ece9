// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs;
use std::path::{Path, PathBuf};

use simcheck_engine::{Config, ErrorCode, pipeline};

const REFERENCE_CSV: &str = "\
CASESTR,Mach_Ref,V_Ref,Ps_Ref,SAT_Ref,Rho_Ref
Case_041,0.85,250.0,500,-10,1.2
Case_042,0.9,260.0,510,-12,1.1
";

fn summary_page(values: &[(&str, &str)]) -> String {
    let mut page = String::from("<html><body><table>\n");
    for (label, value) in values {
        page.push_str(&format!(
            "<tr><td>{label}</td></tr>\n\
             <tr><td>Type</td><td>SCALAR</td></tr>\n\
             <tr><td>Value</td><td>{value}</td></tr>\n"
        ));
    }
    page.push_str("</table></body></html>\n");
    page
}

fn test_config(dir: &Path, case_ids: &[&str]) -> Config {
    let mut config = Config::example();
    config.reference_csv = dir.join("reference.csv");
    config.case_ids = case_ids.iter().map(|s| s.to_string()).collect();
    config
}

fn write_reference(dir: &Path) {
    fs::write(dir.join("reference.csv"), REFERENCE_CSV).unwrap();
}

fn read_rows(path: &PathBuf) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(|c| c.to_owned()).collect())
        .collect()
}

#[test]
fn clean_run_produces_matching_diff() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    fs::write(
        dir.path().join("Case_041_Summary.html"),
        summary_page(&[
            ("Mach Ref", "0.85"),
            ("V Ref", "250.0"),
            ("Ps Ref", "500"),
            ("SAT Ref", "-10"),
            ("Rho Ref", "1.2"),
        ]),
    )
    .unwrap();

    let config = test_config(dir.path(), &["Case_041"]);
    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.checked_count(), 1);
    assert!(summary.failures.is_empty());
    assert!(summary.missing_cases.is_empty());
    assert_eq!(summary.mismatch_count, 0);

    let rows = read_rows(&summary.produced[0]);
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        vec!["", "CASESTR", "Mach_Ref", "V_Ref", "Ps_Ref", "SAT_Ref", "Rho_Ref"]
    );
    assert_eq!(
        rows[1],
        vec!["CSV", "Case_041", "0.85", "250.0", "500", "-10", "1.2"]
    );
    assert_eq!(
        rows[2],
        vec!["HTML", "Case_041", "0.85", "250.0", "500", "-10", "1.2"]
    );
    assert_eq!(rows[3], vec!["Mismatch", "0", "0", "0", "0", "0", "0"]);
}

#[test]
fn unit_mismatch_is_flagged_at_its_column() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    fs::write(
        dir.path().join("Case_041_Summary.html"),
        summary_page(&[
            ("Mach Ref", "0.85"),
            ("V Ref", "250.0 m/s"),
            ("Ps Ref", "500"),
            ("SAT Ref", "-10"),
            ("Rho Ref", "1.2"),
        ]),
    )
    .unwrap();

    let config = test_config(dir.path(), &["Case_041"]);
    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.mismatch_count, 1);
    let rows = read_rows(&summary.produced[0]);
    assert_eq!(rows[2][3], "250.0 m/s");
    assert_eq!(rows[3], vec!["Mismatch", "0", "0", "1", "0", "0", "0"]);
}

#[test]
fn malformed_report_fails_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    // Case_041's report lacks the Value marker for V Ref
    fs::write(
        dir.path().join("Case_041_Summary.html"),
        "<html><body><p>Mach Ref</p><p>TypeSCALAR</p><p>Value0.85</p>\
         <p>V Ref</p><p>TypeSCALAR</p></body></html>",
    )
    .unwrap();
    fs::write(
        dir.path().join("Case_042_Summary.html"),
        summary_page(&[
            ("Mach Ref", "0.9"),
            ("V Ref", "260.0"),
            ("Ps Ref", "510"),
            ("SAT Ref", "-12"),
            ("Rho Ref", "1.1"),
        ]),
    )
    .unwrap();

    let config = test_config(dir.path(), &["Case_041", "Case_042"]);
    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.checked_count(), 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, "Case_041_Summary.html");
    assert_eq!(summary.failures[0].1.code, ErrorCode::MissingValueMarker);

    // the good report still produced its diff
    assert!(dir.path().join("Case_042_Summary.csv").exists());
    assert!(!dir.path().join("Case_041_Summary.csv").exists());
}

#[test]
fn report_without_reference_row_fails_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    fs::write(
        dir.path().join("Case_043_Summary.html"),
        summary_page(&[
            ("Mach Ref", "0.8"),
            ("V Ref", "240.0"),
            ("Ps Ref", "490"),
            ("SAT Ref", "-9"),
            ("Rho Ref", "1.3"),
        ]),
    )
    .unwrap();

    let config = test_config(dir.path(), &["Case_043"]);
    let summary = pipeline::run(&config).unwrap();

    assert!(summary.produced.is_empty());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].1.code, ErrorCode::MissingCaseRow);
}

#[test]
fn zero_matches_is_fatal_and_produces_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());

    let config = test_config(dir.path(), &["Case_041"]);
    let err = pipeline::run(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::NoReportsFound);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".csv") && name != "reference.csv")
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_case_is_warned_but_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    fs::write(
        dir.path().join("Case_041_Summary.html"),
        summary_page(&[
            ("Mach Ref", "0.85"),
            ("V Ref", "250.0"),
            ("Ps Ref", "500"),
            ("SAT Ref", "-10"),
            ("Rho Ref", "1.2"),
        ]),
    )
    .unwrap();

    let config = test_config(dir.path(), &["Case_041", "Case_042"]);
    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.checked_count(), 1);
    assert_eq!(summary.missing_cases, vec!["Case_042"]);
}
