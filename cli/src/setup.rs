#![deny(missing_docs)]

//! # Setup Command
//!
//! Runs the iOS pipeline: AppDelegate -> Entitlements -> Info.plist.
//! Partial success is reported, not turned into a failing exit code.

use crate::output::{render_text, Format};
use entrig_core::{run_setup, AppError, AppResult, SetupOptions};
use std::path::PathBuf;

/// Arguments for the setup command.
#[derive(clap::Args, Debug, Clone)]
pub struct SetupArgs {
    /// React Native project root containing the `ios/` directory.
    #[clap(long, env = "ENTRIG_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Application directory name inside `ios/`. Discovered automatically when omitted.
    #[clap(long, env = "ENTRIG_APP_NAME")]
    pub app_name: Option<String>,

    /// Output format for the run summary.
    #[clap(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Executes the setup.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &SetupArgs) -> AppResult<()> {
    if args.format == Format::Text {
        println!("Entrig iOS Setup for React Native\n");
    }

    let options = SetupOptions {
        project_root: args.project_dir.clone(),
        app_name: args.app_name.clone(),
    };
    tracing::debug!(?options, "starting setup");
    let report = run_setup(&options)?;

    match args.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::General(format!("Failed to serialize report: {}", e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}
