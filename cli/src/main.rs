#![deny(missing_docs)]

//! # Entrig Setup CLI
//!
//! Command Line Interface wiring the Entrig push SDK into a React Native app.
//!
//! Usage: `entrig-setup ios` from the project root.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use entrig_core::AppError;
use output::Format;
use std::ffi::OsString;
use std::process::ExitCode;

mod logging;
mod output;
mod setup;

/// Printed when the platform argument is missing or not recognised.
const USAGE: &str = "Usage: entrig-setup ios";

#[derive(Parser, Debug)]
#[clap(name = "entrig-setup", author, version, about = "Entrig iOS setup for React Native")]
struct Cli {
    /// Platform to configure.
    #[clap(value_enum)]
    platform: Platform,

    #[clap(flatten)]
    setup: setup::SetupArgs,

    /// Increase log verbosity on stderr (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Platform {
    /// Patch the `ios/` project.
    Ios,
}

fn main() -> ExitCode {
    run(std::env::args_os())
}

/// Parses `args`, runs the requested setup and maps the outcome to an exit code.
///
/// Usage errors and fatal resolver errors exit 1. Failed or skipped steps do not.
fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            println!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    logging::init(cli.verbose);

    let result = match cli.platform {
        Platform::Ios => setup::execute(&cli.setup),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", fatal_message(&e, cli.setup.format));
            ExitCode::from(1)
        }
    }
}

/// Renders a fatal error. JSON output stays machine-readable.
fn fatal_message(err: &AppError, format: Format) -> String {
    match format {
        Format::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
        Format::Text => {
            let mut msg = format!("Error: {}", err);
            if matches!(err, AppError::IosDirNotFound(_)) {
                msg.push_str("\n   Make sure you run this from your React Native project root.");
            }
            msg
        }
    }
}
