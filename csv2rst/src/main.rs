//! # csv2rst
//!
//! Convert CSV into reStructuredText grid tables.
//!
//! ## Usage
//!
//! ```bash
//! # Read from stdin, write to stdout
//! csv2rst < data.csv
//!
//! # Files, two extra spaces per column, wrap long columns at 30 chars
//! csv2rst -i data.csv -o table.rst -p 2 -w 30
//!
//! # Don't set the first row apart as a title row
//! csv2rst -i data.csv --no-title
//! ```
//!
//! Diagnostics go to stderr; `-v` (repeatable) or `RUST_LOG` raise the log level.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use csv2rstlib::{
    create_output, open_input, parse_positive_width_option, parse_width_option, read_table,
    write_grid, LayoutOptions,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("csv2rst")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Convert CSV into a reStructuredText grid table")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read input from FILE instead of stdin"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write output to FILE instead of stdout"),
        )
        .arg(
            Arg::new("extrapadding")
                .short('p')
                .long("extrapadding")
                .value_name("N")
                .allow_negative_numbers(true)
                .value_parser(|value: &str| {
                    parse_width_option("--extrapadding", value).map_err(|e| e.reason())
                })
                .help("Add N extra spaces to every column"),
        )
        .arg(
            Arg::new("wordwrap")
                .short('w')
                .long("wordwrap")
                .value_name("N")
                .allow_negative_numbers(true)
                .value_parser(|value: &str| {
                    parse_positive_width_option("--wordwrap", value).map_err(|e| e.reason())
                })
                .help("Word-wrap columns at N chars"),
        )
        .arg(
            Arg::new("no-title")
                .short('n')
                .long("no-title")
                .action(ArgAction::SetTrue)
                .help("Don't separate the first row with a '=' border"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more details to stderr (repeat for more)"),
        )
}

/// Build layout options from matches. clap has already range-checked the
/// numeric options.
fn extract_layout_options(matches: &ArgMatches) -> LayoutOptions {
    LayoutOptions::new()
        .padding(matches.get_one::<usize>("extrapadding").copied())
        .wordwrap(matches.get_one::<usize>("wordwrap").copied())
        .skip_title(matches.get_flag("no-title"))
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csv2rst={level},csv2rstlib={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let options = extract_layout_options(matches);
    let input = matches.get_one::<PathBuf>("input");
    let output = matches.get_one::<PathBuf>("output");
    debug!(?options, ?input, ?output, "starting conversion");

    // The whole table is read before the output is created, so the input
    // and output may name the same file.
    let table = read_table(open_input(input.map(PathBuf::as_path))?).with_context(|| {
        match input {
            Some(path) => format!("failed to read '{}'", path.display()),
            None => "failed to read standard input".to_string(),
        }
    })?;

    let mut writer = create_output(output.map(PathBuf::as_path))?;
    let widths = write_grid(&table, &mut writer, &options).context("failed to write table")?;

    info!(
        rows = table.len(),
        columns = widths.len(),
        "converted CSV to grid table"
    );
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold().for_stderr());
            ExitCode::FAILURE
        }
    }
}
