#![deny(missing_docs)]

//! # Setup Workflow
//!
//! Resolver -> AppDelegate -> Entitlements -> Info.plist.
//!
//! Only resolver errors abort the run. The three patch steps are independent:
//! each runs unconditionally and folds its own failures into the report.

use crate::delegate::patch_app_delegate;
use crate::entitlements::update_entitlements;
use crate::error::AppResult;
use crate::info_plist::update_info_plist;
use crate::project::resolve_ios_project;
use crate::report::SetupReport;
use std::path::PathBuf;

/// Inputs of a setup run.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// React Native project root (the directory containing `ios/`).
    pub project_root: PathBuf,
    /// Explicit application name; discovered from `ios/` when absent.
    pub app_name: Option<String>,
}

/// Runs the full iOS setup against `options.project_root`.
pub fn run_setup(options: &SetupOptions) -> AppResult<SetupReport> {
    let project = resolve_ios_project(&options.project_root, options.app_name.as_deref())?;
    tracing::info!(app = %project.app_name, "running Entrig iOS setup");

    let mut steps = Vec::with_capacity(4);
    steps.push(patch_app_delegate(&project));
    steps.extend(update_entitlements(&project));
    steps.push(update_info_plist(&project));

    Ok(SetupReport {
        app_name: project.app_name,
        steps,
    })
}
