#![deny(missing_docs)]

//! # AppDelegate Patching
//!
//! Wires the Entrig SDK into the host application's entry point.
//!
//! - **swift**: Automated patching of `AppDelegate.swift`.
//! - **objc**: Detection and manual instructions for `AppDelegate.mm` / `.m`.
//! - **snippets**: Inserted and printed code.
//!
//! The dialect is picked once from the file extension and dispatched through
//! [`DelegatePatcher`].

pub(crate) mod common;

/// Objective-C dialect.
pub mod objc;

/// Code snippets.
pub mod snippets;

/// Swift dialect.
pub mod swift;

pub use objc::ObjcPatcher;
pub use swift::{AppDelegateVariant, SwiftPatcher};

use crate::backup::backup_file;
use crate::error::AppResult;
use crate::project::IosProject;
use crate::report::{Step, StepOutcome, StepReport};
use std::fs;
use std::path::Path;

/// Source dialect of the AppDelegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `AppDelegate.swift`.
    Swift,
    /// `AppDelegate.mm` or `AppDelegate.m`.
    ObjC,
}

impl Dialect {
    /// Picks the dialect from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "swift" => Some(Dialect::Swift),
            "mm" | "m" => Some(Dialect::ObjC),
            _ => None,
        }
    }

    /// The patcher implementing this dialect.
    pub fn patcher(self) -> &'static dyn DelegatePatcher {
        match self {
            Dialect::Swift => &SwiftPatcher,
            Dialect::ObjC => &ObjcPatcher,
        }
    }
}

/// Result of inspecting an AppDelegate before patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The SDK call is already present.
    Marker,
    /// Notification delegate methods already exist; merging is left to the developer.
    Conflict,
    /// Safe to patch.
    Clean,
}

/// Patched source plus a log of the edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// The new file content.
    pub content: String,
    /// Applied edits.
    pub changes: Vec<String>,
    /// Edits skipped because their anchor was missing.
    pub warnings: Vec<String>,
}

impl Patched {
    /// Starts from `content` with no edits.
    pub fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            changes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when at least one edit was applied.
    pub fn is_modified(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// A dialect-specific AppDelegate mutator.
pub trait DelegatePatcher {
    /// The dialect this patcher handles.
    fn dialect(&self) -> Dialect;

    /// Classifies `content` as configured, conflicting or clean.
    fn detect(&self, content: &str) -> Detection;

    /// Applies the edits. Only meaningful on [`Detection::Clean`] content.
    fn patch(&self, content: &str) -> AppResult<Patched>;

    /// Code the developer must merge when automatic patching is not possible.
    fn manual_instructions(&self) -> Vec<String>;
}

/// Patches the project's AppDelegate, if one exists.
///
/// Never returns an error: failures are folded into the report so the
/// remaining steps still run.
pub fn patch_app_delegate(project: &IosProject) -> StepReport {
    let found = project
        .app_delegate_candidates()
        .into_iter()
        .find_map(|p| Dialect::from_path(&p).filter(|_| p.is_file()).map(|d| (p, d)));

    let Some((path, dialect)) = found else {
        tracing::warn!(app_dir = %project.app_dir().display(), "no AppDelegate found");
        return StepReport::new(
            Step::AppDelegate,
            StepOutcome::Skipped {
                reason: "No AppDelegate found (checked .swift, .mm, .m)".to_string(),
                guidance: snippets::missing_app_delegate_guidance(),
            },
        );
    };

    let shown = project.display(&path);
    match apply(dialect.patcher(), &path) {
        Ok((outcome, backup)) => StepReport::new(Step::AppDelegate, outcome)
            .with_file(shown)
            .with_backup(backup.map(|b| project.display(&b))),
        Err(e) => {
            tracing::error!(file = %shown, error = %e, "AppDelegate patch failed");
            StepReport::new(Step::AppDelegate, StepOutcome::Failed { error: e.to_string() })
                .with_file(shown)
        }
    }
}

fn apply(
    patcher: &dyn DelegatePatcher,
    path: &Path,
) -> AppResult<(StepOutcome, Option<std::path::PathBuf>)> {
    let content = fs::read_to_string(path)?;

    match patcher.detect(&content) {
        Detection::Marker => {
            tracing::debug!(file = %path.display(), "Entrig already configured");
            return Ok((StepOutcome::AlreadyConfigured, None));
        }
        Detection::Conflict => {
            return Ok((
                StepOutcome::ManualRequired {
                    reason: "Existing notification delegate methods detected".to_string(),
                    instructions: patcher.manual_instructions(),
                },
                None,
            ));
        }
        Detection::Clean => {}
    }

    if patcher.dialect() == Dialect::ObjC {
        return Ok((
            StepOutcome::ManualRequired {
                reason: "Automatic patching is only supported for Swift AppDelegates".to_string(),
                instructions: patcher.manual_instructions(),
            },
            None,
        ));
    }

    let patched = patcher.patch(&content)?;
    if !patched.is_modified() {
        return Ok((StepOutcome::AlreadyConfigured, None));
    }

    let backup = backup_file(path)?;
    fs::write(path, &patched.content)?;
    tracing::info!(file = %path.display(), edits = patched.changes.len(), "AppDelegate patched");

    Ok((
        StepOutcome::Patched {
            changes: patched.changes,
            warnings: patched.warnings,
        },
        backup,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup_path;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn project_with(file: &str, content: &str) -> (tempfile::TempDir, IosProject, PathBuf) {
        let dir = tempdir().unwrap();
        let app_dir = dir.path().join("ios/App");
        fs::create_dir_all(&app_dir).unwrap();
        let path = app_dir.join(file);
        fs::write(&path, content).unwrap();
        let project = IosProject {
            root: dir.path().to_path_buf(),
            ios_dir: dir.path().join("ios"),
            app_name: "App".into(),
        };
        (dir, project, path)
    }

    const MINIMAL: &str = "import UIKit\n\n@main\nclass AppDelegate: UIResponder, UIApplicationDelegate {\n  func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]?) -> Bool {\n    return true\n  }\n}\n";

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("AppDelegate.swift")), Some(Dialect::Swift));
        assert_eq!(Dialect::from_path(Path::new("AppDelegate.mm")), Some(Dialect::ObjC));
        assert_eq!(Dialect::from_path(Path::new("AppDelegate.m")), Some(Dialect::ObjC));
        assert_eq!(Dialect::from_path(Path::new("AppDelegate.h")), None);
        assert_eq!(Dialect::ObjC.patcher().dialect(), Dialect::ObjC);
    }

    #[test]
    fn test_swift_patch_writes_and_backs_up() {
        let (_dir, project, path) = project_with("AppDelegate.swift", MINIMAL);

        let report = patch_app_delegate(&project);
        assert!(matches!(report.outcome, StepOutcome::Patched { .. }));
        assert_eq!(report.file.as_deref(), Some("ios/App/AppDelegate.swift"));
        assert_eq!(report.backup.as_deref(), Some("ios/App/AppDelegate.swift.backup"));
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), MINIMAL);

        let patched = fs::read_to_string(&path).unwrap();
        assert!(patched.contains("Entrig.checkLaunchNotification(launchOptions)"));

        let again = patch_app_delegate(&project);
        assert_eq!(again.outcome, StepOutcome::AlreadyConfigured);
        assert_eq!(fs::read_to_string(&path).unwrap(), patched);
    }

    #[test]
    fn test_conflict_leaves_file_untouched() {
        let content = MINIMAL.replace(
            "}\n}\n",
            "}\n  func application(_ application: UIApplication, didRegisterForRemoteNotificationsWithDeviceToken deviceToken: Data) {}\n}\n",
        );
        let (_dir, project, path) = project_with("AppDelegate.swift", &content);

        let report = patch_app_delegate(&project);
        match report.outcome {
            StepOutcome::ManualRequired { instructions, .. } => {
                assert!(instructions.iter().any(|l| l.contains("Entrig.willPresentNotification")))
            }
            other => panic!("expected manual instructions, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_objc_gets_manual_instructions() {
        let content = "@implementation AppDelegate\n@end\n";
        let (_dir, project, path) = project_with("AppDelegate.mm", content);

        let report = patch_app_delegate(&project);
        assert!(matches!(report.outcome, StepOutcome::ManualRequired { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let (_dir, project, path) =
            project_with("AppDelegate.swift", "import UIKit\nclass AppDelegate: UIResponder {\n}\n");

        let report = patch_app_delegate(&project);
        assert!(matches!(report.outcome, StepOutcome::Failed { .. }));
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_missing_app_delegate_is_skipped() {
        let (_dir, project, _) = project_with("Info.plist", "<plist/>");
        let report = patch_app_delegate(&project);
        assert!(matches!(report.outcome, StepOutcome::Skipped { .. }));
        assert!(report.file.is_none());
    }
}
