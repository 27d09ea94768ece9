// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    Generic,
    BadConfig,
    MismatchedFieldLists,
    NoReportsFound,
    FileRead,
    CsvRead,
    CsvWrite,
    MissingCaseColumn,
    MissingCaseRow,
    XmlRead,
    MissingField,
    MissingTypeMarker,
    MissingValueMarker,
    ExpectedNumber,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            Generic => "generic",
            BadConfig => "bad_config",
            MismatchedFieldLists => "mismatched_field_lists",
            NoReportsFound => "no_reports_found",
            FileRead => "file_read",
            CsvRead => "csv_read",
            CsvWrite => "csv_write",
            MissingCaseColumn => "missing_case_column",
            MissingCaseRow => "missing_case_row",
            XmlRead => "xml_read",
            MissingField => "missing_field",
            MissingTypeMarker => "missing_type_marker",
            MissingValueMarker => "missing_value_marker",
            ExpectedNumber => "expected_number",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Discovery,
    Reference,
    Report,
    Compare,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Config => "ConfigError",
            ErrorKind::Discovery => "DiscoveryError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Report => "ReportError",
            ErrorKind::Compare => "CompareError",
            ErrorKind::Output => "OutputError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! config_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Config, ErrorCode::$code, Some($str)))
    }}
);

#[macro_export]
macro_rules! report_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Report, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Report, ErrorCode::$code, None))
    }};
}
