#![deny(missing_docs)]

//! # Xcode Build Settings
//!
//! Points every app build configuration at a newly created entitlements file
//! by adding `CODE_SIGN_ENTITLEMENTS` next to `PRODUCT_BUNDLE_IDENTIFIER`.
//! Best effort: a missing or unrecognised `project.pbxproj` only produces a
//! warning with Xcode instructions.

use crate::backup::{backup_file, discard_backup};
use crate::error::AppResult;
use crate::project::IosProject;
use crate::report::{Step, StepOutcome, StepReport};
use regex::{Captures, Regex};
use std::fs;
use std::sync::OnceLock;

/// The build setting this module adds.
pub const CODE_SIGN_ENTITLEMENTS: &str = "CODE_SIGN_ENTITLEMENTS";

/// Appends a `CODE_SIGN_ENTITLEMENTS` line after every `PRODUCT_BUNDLE_IDENTIFIER`.
///
/// Returns the new content and the number of build configurations touched.
pub fn add_code_sign_entitlements(content: &str, entitlements: &str) -> (String, usize) {
    let mut count = 0;
    let patched = bundle_id_regex().replace_all(content, |caps: &Captures| {
        count += 1;
        format!(
            "{}\n\t\t\t\t{} = \"{}\";",
            &caps[0], CODE_SIGN_ENTITLEMENTS, entitlements
        )
    });
    (patched.into_owned(), count)
}

/// Registers the project's entitlements file in its Xcode project.
pub fn register_entitlements(project: &IosProject) -> StepReport {
    let path = project.pbxproj_path();
    let shown = project.display(&path);

    if !path.is_file() {
        tracing::warn!(file = %shown, "project.pbxproj not found");
        return StepReport::new(
            Step::BuildSettings,
            StepOutcome::Skipped {
                reason: "Could not find project.pbxproj to add the entitlements reference"
                    .to_string(),
                guidance: capability_guidance(project),
            },
        )
        .with_file(shown);
    }

    match rewrite(project, &path) {
        Ok(report) => report.with_file(shown),
        Err(e) => {
            tracing::error!(file = %shown, error = %e, "project.pbxproj update failed");
            StepReport::new(Step::BuildSettings, StepOutcome::Failed { error: e.to_string() })
                .with_file(shown)
        }
    }
}

fn rewrite(project: &IosProject, path: &std::path::Path) -> AppResult<StepReport> {
    let content = fs::read_to_string(path)?;

    if content.contains(CODE_SIGN_ENTITLEMENTS) {
        tracing::debug!("CODE_SIGN_ENTITLEMENTS already present");
        return Ok(StepReport::new(
            Step::BuildSettings,
            StepOutcome::AlreadyConfigured,
        ));
    }

    let backup = backup_file(path)?;
    let (patched, count) = add_code_sign_entitlements(&content, &project.entitlements_build_setting());

    if count == 0 {
        if let Some(b) = &backup {
            discard_backup(b)?;
        }
        tracing::warn!("no PRODUCT_BUNDLE_IDENTIFIER found in project.pbxproj");
        return Ok(StepReport::new(
            Step::BuildSettings,
            StepOutcome::Skipped {
                reason: "Could not auto-add the entitlements reference to project.pbxproj"
                    .to_string(),
                guidance: capability_guidance(project),
            },
        ));
    }

    fs::write(path, patched)?;
    tracing::info!(configurations = count, "CODE_SIGN_ENTITLEMENTS added");

    Ok(StepReport::new(
        Step::BuildSettings,
        StepOutcome::Patched {
            changes: vec![format!(
                "Added {} to project.pbxproj ({} build configurations)",
                CODE_SIGN_ENTITLEMENTS, count
            )],
            warnings: Vec::new(),
        },
    )
    .with_backup(backup.map(|b| project.display(&b))))
}

fn capability_guidance(project: &IosProject) -> Vec<String> {
    vec![
        format!("1. Open {}.xcworkspace in Xcode", project.app_name),
        "2. Select your target -> Signing & Capabilities".to_string(),
        "3. Click + Capability -> Push Notifications".to_string(),
    ]
}

fn bundle_id_regex() -> &'static Regex {
    static BUNDLE_ID_RE: OnceLock<Regex> = OnceLock::new();
    BUNDLE_ID_RE
        .get_or_init(|| Regex::new(r"\bPRODUCT_BUNDLE_IDENTIFIER\s*=\s*[^;]+;").expect("Invalid regex"))
}
