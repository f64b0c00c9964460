#![deny(missing_docs)]

//! # Info.plist
//!
//! Declares the `remote-notification` background mode needed for silent pushes.

use crate::backup::backup_file;
use crate::error::{AppError, AppResult};
use crate::project::IosProject;
use crate::report::{Step, StepOutcome, StepReport};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Array key listing background execution modes.
pub const BACKGROUND_MODES: &str = "UIBackgroundModes";

/// Background mode token for silent push delivery.
pub const REMOTE_NOTIFICATION: &str = "remote-notification";

/// True when the manifest already declares the background mode.
pub fn is_configured(content: &str) -> bool {
    content.contains(BACKGROUND_MODES) && content.contains(REMOTE_NOTIFICATION)
}

/// Adds `remote-notification` to `UIBackgroundModes`, creating the key when needed.
///
/// An existing array gets the token as its first element. A new key goes in
/// front of the root dictionary's `</dict>`, i.e. the last one before `</plist>`.
pub fn add_background_mode(content: &str) -> AppResult<String> {
    if is_configured(content) {
        return Ok(content.to_string());
    }

    let mut patched = content.to_string();

    if content.contains(BACKGROUND_MODES) {
        let array_open = background_modes_regex().find(content).ok_or_else(|| {
            AppError::Parse(format!("{} is present but not followed by <array>", BACKGROUND_MODES))
        })?;
        patched.insert_str(
            array_open.end(),
            &format!("\n\t\t<string>{}</string>", REMOTE_NOTIFICATION),
        );
        return Ok(patched);
    }

    let plist_end = content.rfind("</plist>").unwrap_or(content.len());
    let dict_end = content[..plist_end]
        .rfind("</dict>")
        .ok_or_else(|| AppError::Parse("could not find the root </dict> in Info.plist".into()))?;

    patched.insert_str(
        dict_end,
        &format!(
            "\t<key>{}</key>\n\t<array>\n\t\t<string>{}</string>\n\t</array>\n",
            BACKGROUND_MODES, REMOTE_NOTIFICATION
        ),
    );
    Ok(patched)
}

/// Ensures the project's Info.plist declares the `remote-notification` background mode.
pub fn update_info_plist(project: &IosProject) -> StepReport {
    let path = project.info_plist_path();
    let shown = project.display(&path);

    if !path.is_file() {
        tracing::warn!(file = %shown, "Info.plist not found");
        return StepReport::new(
            Step::InfoPlist,
            StepOutcome::Skipped {
                reason: format!("{} not found", shown),
                guidance: vec![format!(
                    "Add {} to {} in Xcode (Signing & Capabilities -> Background Modes)",
                    REMOTE_NOTIFICATION, BACKGROUND_MODES
                )],
            },
        )
        .with_file(shown);
    }

    match patch_file(&path) {
        Ok((outcome, backup)) => StepReport::new(Step::InfoPlist, outcome)
            .with_file(shown)
            .with_backup(backup.map(|b| project.display(&b))),
        Err(e) => {
            tracing::error!(file = %shown, error = %e, "Info.plist update failed");
            StepReport::new(Step::InfoPlist, StepOutcome::Failed { error: e.to_string() })
                .with_file(shown)
        }
    }
}

fn patch_file(path: &Path) -> AppResult<(StepOutcome, Option<PathBuf>)> {
    let content = fs::read_to_string(path)?;
    if is_configured(&content) {
        tracing::debug!(file = %path.display(), "UIBackgroundModes already configured");
        return Ok((StepOutcome::AlreadyConfigured, None));
    }

    let patched = add_background_mode(&content)?;
    let backup = backup_file(path)?;
    fs::write(path, patched)?;
    tracing::info!(file = %path.display(), "remote-notification background mode added");

    Ok((
        StepOutcome::Patched {
            changes: vec![format!("Added {} to {}", REMOTE_NOTIFICATION, BACKGROUND_MODES)],
            warnings: Vec::new(),
        },
        backup,
    ))
}

fn background_modes_regex() -> &'static Regex {
    static MODES_RE: OnceLock<Regex> = OnceLock::new();
    MODES_RE.get_or_init(|| {
        Regex::new(r"<key>UIBackgroundModes</key>\s*<array>").expect("Invalid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>$(PRODUCT_NAME)</string>
	<key>NSAppTransportSecurity</key>
	<dict>
		<key>NSAllowsArbitraryLoads</key>
		<false/>
	</dict>
</dict>
</plist>
"#;

    #[test]
    fn test_adds_key_to_root_dict() {
        let patched = add_background_mode(INFO_PLIST).unwrap();
        assert!(patched.ends_with(
            "\t</dict>\n\t<key>UIBackgroundModes</key>\n\t<array>\n\t\t<string>remote-notification</string>\n\t</array>\n</dict>\n</plist>\n"
        ));
        assert_eq!(patched.matches(REMOTE_NOTIFICATION).count(), 1);
    }

    #[test]
    fn test_appends_to_existing_array() {
        let doc = INFO_PLIST.replace(
            "</dict>\n</plist>",
            "\t<key>UIBackgroundModes</key>\n\t<array>\n\t\t<string>fetch</string>\n\t\t<string>audio</string>\n\t</array>\n</dict>\n</plist>",
        );
        let patched = add_background_mode(&doc).unwrap();
        assert!(patched.contains(
            "<key>UIBackgroundModes</key>\n\t<array>\n\t\t<string>remote-notification</string>\n\t\t<string>fetch</string>\n\t\t<string>audio</string>\n\t</array>"
        ));
        assert_eq!(patched.matches(REMOTE_NOTIFICATION).count(), 1);
        assert_eq!(patched.matches(BACKGROUND_MODES).count(), 1);
    }

    #[test]
    fn test_configured_is_noop() {
        let doc = add_background_mode(INFO_PLIST).unwrap();
        assert!(is_configured(&doc));
        assert_eq!(add_background_mode(&doc).unwrap(), doc);
    }

    #[test]
    fn test_unparseable() {
        assert!(matches!(
            add_background_mode("<plist/>").unwrap_err(),
            AppError::Parse(_)
        ));
        assert!(matches!(
            add_background_mode("<key>UIBackgroundModes</key><string>x</string>").unwrap_err(),
            AppError::Parse(_)
        ));
    }

    #[test]
    fn test_update_info_plist() {
        let dir = tempdir().unwrap();
        let project = IosProject {
            root: dir.path().to_path_buf(),
            ios_dir: dir.path().join("ios"),
            app_name: "App".into(),
        };

        let missing = update_info_plist(&project);
        assert!(matches!(missing.outcome, StepOutcome::Skipped { .. }));

        fs::create_dir_all(project.app_dir()).unwrap();
        fs::write(project.info_plist_path(), INFO_PLIST).unwrap();

        let first = update_info_plist(&project);
        assert!(matches!(first.outcome, StepOutcome::Patched { .. }));
        assert_eq!(first.backup.as_deref(), Some("ios/App/Info.plist.backup"));

        let second = update_info_plist(&project);
        assert_eq!(second.outcome, StepOutcome::AlreadyConfigured);
    }
}
