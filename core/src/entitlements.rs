#![deny(missing_docs)]

//! # Entitlements
//!
//! Ensures `<App>.entitlements` enables the push capability
//! (`aps-environment` = `development`). A missing file is created and, best
//! effort, registered in the Xcode project.

use crate::backup::backup_file;
use crate::error::{AppError, AppResult};
use crate::pbxproj::register_entitlements;
use crate::project::IosProject;
use crate::report::{Step, StepOutcome, StepReport};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Entitlement key enabling APNs.
pub const APS_ENVIRONMENT: &str = "aps-environment";

/// Value written for [`APS_ENVIRONMENT`].
pub const APS_VALUE: &str = "development";

fn aps_entry() -> String {
    format!(
        "\t<key>{}</key>\n\t<string>{}</string>\n",
        APS_ENVIRONMENT, APS_VALUE
    )
}

/// A minimal entitlements plist holding only the push capability.
pub fn default_entitlements() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">
<plist version=\"1.0\">
<dict>
{}</dict>
</plist>",
        aps_entry()
    )
}

/// Adds the `aps-environment` entry to an existing entitlements document.
///
/// Handles a root `<dict/>` shorthand; otherwise the entry goes right
/// before the last `</dict>` preceding `</plist>`. Content already holding the
/// key is returned as-is.
pub fn insert_aps_environment(content: &str) -> AppResult<String> {
    if content.contains(APS_ENVIRONMENT) {
        return Ok(content.to_string());
    }

    if let Some(root) = empty_root_dict_regex().find(content) {
        let mut patched = content.to_string();
        let dict_start = root.end() - "<dict/>".len();
        patched.replace_range(dict_start..root.end(), &format!("<dict>\n{}</dict>", aps_entry()));
        return Ok(patched);
    }

    let plist_end = content.rfind("</plist>").unwrap_or(content.len());
    let insert_at = content[..plist_end]
        .rfind("</dict>")
        .ok_or_else(|| AppError::Parse("could not find </dict> in entitlements file".into()))?;

    let mut patched = content.to_string();
    patched.insert_str(insert_at, &aps_entry());
    Ok(patched)
}

/// Ensures the project's entitlements enable push notifications.
///
/// Returns the entitlements report, followed by the build settings report
/// when a new file had to be created.
pub fn update_entitlements(project: &IosProject) -> Vec<StepReport> {
    let existing = project
        .entitlements_candidates()
        .into_iter()
        .find(|p| p.is_file());

    match existing {
        Some(path) => vec![patch_existing(project, &path)],
        None => create(project),
    }
}

fn patch_existing(project: &IosProject, path: &Path) -> StepReport {
    let shown = project.display(path);

    match patch_file(path) {
        Ok((outcome, backup)) => StepReport::new(Step::Entitlements, outcome)
            .with_file(shown)
            .with_backup(backup.map(|b| project.display(&b))),
        Err(e) => {
            tracing::error!(file = %shown, error = %e, "entitlements update failed");
            StepReport::new(Step::Entitlements, StepOutcome::Failed { error: e.to_string() })
                .with_file(shown)
        }
    }
}

fn patch_file(path: &Path) -> AppResult<(StepOutcome, Option<PathBuf>)> {
    let content = fs::read_to_string(path)?;
    if content.contains(APS_ENVIRONMENT) {
        tracing::debug!(file = %path.display(), "aps-environment already configured");
        return Ok((StepOutcome::AlreadyConfigured, None));
    }

    let patched = insert_aps_environment(&content)?;
    let backup = backup_file(path)?;
    fs::write(path, patched)?;
    tracing::info!(file = %path.display(), "aps-environment added");

    Ok((
        StepOutcome::Patched {
            changes: vec![format!("Added {} to entitlements", APS_ENVIRONMENT)],
            warnings: Vec::new(),
        },
        backup,
    ))
}

fn create(project: &IosProject) -> Vec<StepReport> {
    let path = project.default_entitlements_path();
    let shown = project.display(&path);
    let app_dir = project.app_dir();

    if !app_dir.is_dir() {
        tracing::error!(dir = %app_dir.display(), "app directory not found");
        return vec![StepReport::new(
            Step::Entitlements,
            StepOutcome::Failed {
                error: format!("{} not found", project.display(&app_dir)),
            },
        )
        .with_file(shown)];
    }

    if let Err(e) = fs::write(&path, default_entitlements()) {
        tracing::error!(file = %shown, error = %e, "could not create entitlements");
        return vec![StepReport::new(
            Step::Entitlements,
            StepOutcome::Failed {
                error: AppError::Io(e).to_string(),
            },
        )
        .with_file(shown)];
    }
    tracing::info!(file = %shown, "entitlements created");

    let created = StepReport::new(
        Step::Entitlements,
        StepOutcome::Created {
            changes: vec![format!("Added {} to entitlements", APS_ENVIRONMENT)],
        },
    )
    .with_file(shown);

    vec![created, register_entitlements(project)]
}

fn empty_root_dict_regex() -> &'static Regex {
    static ROOT_RE: OnceLock<Regex> = OnceLock::new();
    ROOT_RE.get_or_init(|| Regex::new(r"<plist[^>]*>\s*<dict/>").expect("Invalid regex"))
}
