// Copyright 2025 The Simcheck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use pico_args::Arguments;

use simcheck_engine::common::ErrorCode;
use simcheck_engine::{Config, extract_report, pipeline};

const VERSION: &str = "1.0";
const EXIT_FAILURE: i32 = 1;

macro_rules! die(
    ($($arg:tt)*) => { {
        eprintln!($($arg)*);
        std::process::exit(EXIT_FAILURE)
    } }
);

fn usage() -> ! {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "simcheck".to_string());
    die!(
        concat!(
            "simcheck {}: Check HTML simulation summary reports against a reference CSV.\n\
         \n\
         USAGE:\n",
            "    {} [SUBCOMMAND] [OPTION...] PATH\n",
            "\n\
         OPTIONS:\n",
            "    -h, --help       show this message\n",
            "    --config FILE    configuration file for the extract subcommand\n",
            "\n\
         SUBCOMMANDS:\n",
            "    check CONFIG     run the comparison described by a JSON config file\n",
            "    extract REPORT   print the fields extracted from one HTML report\n",
            "    print-config     print an example config file\n",
        ),
        VERSION,
        argv0
    );
}

#[derive(Clone, Default, Debug)]
struct Args {
    path: Option<PathBuf>,
    config: Option<PathBuf>,
    is_extract: bool,
    is_print_config: bool,
}

fn parse_args() -> StdResult<Args, Box<dyn std::error::Error>> {
    let mut parsed = Arguments::from_env();
    if parsed.contains(["-h", "--help"]) {
        usage();
    }

    let subcommand = parsed.subcommand()?;
    if subcommand.is_none() {
        eprintln!("error: subcommand required");
        usage();
    }

    let mut args: Args = Default::default();

    let subcommand = subcommand.unwrap();
    if subcommand == "check" {
    } else if subcommand == "extract" {
        args.is_extract = true;
    } else if subcommand == "print-config" {
        args.is_print_config = true;
    } else {
        eprintln!("error: unknown subcommand {}", subcommand);
        usage();
    }

    args.config = parsed.value_from_str::<_, PathBuf>("--config").ok();

    let free_arguments = parsed.finish();
    if free_arguments.is_empty() && !args.is_print_config {
        eprintln!("error: input path required");
        usage();
    }
    if let Some(path) = free_arguments.first() {
        args.path = Some(PathBuf::from(path));
    }

    Ok(args)
}

fn load_config(path: &Path) -> Config {
    match Config::from_file(path) {
        Ok(config) => config,
        Err(err) => {
            die!("config '{}' error: {}", path.display(), err);
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            usage();
        }
    };

    if args.is_print_config {
        let config = Config::example();
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                die!("error: {}", err);
            }
        }
        return;
    }

    if args.is_extract {
        let config_path = match args.config {
            Some(ref path) => path.clone(),
            None => {
                eprintln!("missing required argument --config FILE");
                std::process::exit(EXIT_FAILURE);
            }
        };
        let config = load_config(&config_path);
        let report_path = args.path.unwrap_or_default();
        let record = match extract_report(
            &report_path,
            &config.html_columns(),
            &config.case_column,
            &config.summary_suffix,
        ) {
            Ok(record) => record,
            Err(err) => {
                die!("report '{}' error: {}", report_path.display(), err);
            }
        };
        for (column, value) in config.html_columns().iter().zip(record.cells.iter()) {
            println!("{column}\t{value}");
        }
        return;
    }

    let config_path = args.path.unwrap_or_default();
    let config = load_config(&config_path);

    let summary = match pipeline::run(&config) {
        Ok(summary) => summary,
        Err(err) => {
            if err.code == ErrorCode::NoReportsFound {
                // a handled termination, not an error: nothing to check
                println!("No html files containing the provided \"CASESTRs\" were found");
                return;
            }
            die!("error: {}", err);
        }
    };

    for (filename, err) in &summary.failures {
        eprintln!("report '{}' error: {}", filename, err);
    }
    println!(
        "{} report(s) checked, {} mismatched value(s), {} failure(s)",
        summary.checked_count(),
        summary.mismatch_count,
        summary.failures.len()
    );

    if !summary.failures.is_empty() {
        std::process::exit(EXIT_FAILURE);
    }
}
