//! Command-line front end for svgpath.
//!
//! Provides commands for:
//! - Parsing path data into commands, with parser diagnostics
//! - Compiling path data into primitive drawing operations and bounds
//!
//! ## Usage
//!
//! ```bash
//! # Print the parsed commands
//! svgpath parse "M0,0 C10,10 20,0 30,0 S50,10 60,0"
//!
//! # Compile one path per line of a file, as JSON
//! svgpath compile --input paths.txt --json
//!
//! # SVG-exact arc flag lexing, with debug logging
//! svgpath --strict-arcs -vv compile "M0 0 A25 25 -30 0150 -25"
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use svgpath::ParserConfig;
use svgpath_common::{init_logging, LogConfig, LogFormat, Result, ResultExt, SvgPathError};
use tracing::{error, warn};

mod report;

use report::{read_inputs, CompileReport, ParseReport};

#[derive(Parser)]
#[command(name = "svgpath")]
#[command(about = "Parse and interpret SVG path data", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lex arc flags as single digits, so `A5 5 0 1110 10` has both flags set
    #[arg(long, global = true)]
    strict_arcs: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: pretty, compact or json
    #[arg(long, default_value = "pretty", global = true)]
    log_format: LogFormat,

    /// Log filter directives (e.g. "svgpath=trace"), overriding RUST_LOG and -v
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let config = LogConfig::from_verbosity(self.verbose).with_format(self.log_format);
        match self.log_filter {
            Some(ref filter) => config.with_filter(filter.as_str()),
            None => config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the commands parsed from path data
    Parse {
        #[command(flatten)]
        input: InputArgs,
        /// Emit JSON with `commands` and `diagnostics`
        #[arg(long)]
        json: bool,
    },

    /// Print the drawing operations path data compiles to
    Compile {
        #[command(flatten)]
        input: InputArgs,
        /// Emit JSON with `events`, `bounding_box` and `error`
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Path data strings
    data: Vec<String>,
    /// Read path data from a file, one string per line
    #[arg(short, long, conflicts_with = "data")]
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_config()) {
        eprintln!("warning: {}", err);
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!(category = err.category(), "{}", err);
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = if cli.strict_arcs {
        ParserConfig::strict_arcs()
    } else {
        ParserConfig::lenient()
    };

    match cli.command {
        Commands::Parse { input, json } => {
            let data = read_inputs(input.data, input.input.as_deref())?;
            let report = ParseReport::build(&data, config);
            for diagnostic in &report.diagnostics {
                warn!(%diagnostic, "Recovered from malformed path data");
            }
            emit(&report, json)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compile { input, json } => {
            let data = read_inputs(input.data, input.input.as_deref())?;
            let report = CompileReport::build(&data, config);
            emit(&report, json)?;

            match report.error {
                None => Ok(ExitCode::SUCCESS),
                Some(ref failure) => {
                    let err = SvgPathError::compile(failure.message.clone());
                    eprintln!("error: {}", err);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Print a report to stdout, as pretty JSON or as text.
fn emit<T: Serialize + std::fmt::Display>(report: &T, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(report).context("serializing report")?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }
    Ok(())
}
