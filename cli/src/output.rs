//! Console rendering of setup reports.

use entrig_core::{SetupReport, StepOutcome, StepReport};
use std::fmt::Write;

/// Summary output format.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Renders the report the way the interactive setup prints it.
pub fn render_text(report: &SetupReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found iOS project: {}\n", report.app_name);

    for step in &report.steps {
        render_step(&mut out, step);
    }

    match report.steps.iter().filter(|s| s.outcome.wrote()).count() {
        0 => {
            let _ = writeln!(out, "No files changed.");
        }
        written => {
            let _ = writeln!(out, "{} file(s) changed.", written);
        }
    }

    if report.is_clean() {
        let _ = writeln!(out, "Setup complete! Rebuild your iOS app to apply changes.");
    } else {
        let pending: Vec<String> = report.needs_attention().map(|s| s.step.to_string()).collect();
        let _ = writeln!(
            out,
            "Setup finished with manual steps remaining ({}). Rebuild your iOS app once they are done.",
            pending.join(", ")
        );
    }
    out
}

fn render_step(out: &mut String, step: &StepReport) {
    match &step.file {
        Some(file) => {
            let _ = writeln!(out, "[{}] {}", step.step, file);
        }
        None => {
            let _ = writeln!(out, "[{}]", step.step);
        }
    }

    if let Some(backup) = &step.backup {
        let _ = writeln!(out, "  Backup created: {}", backup);
    }

    match &step.outcome {
        StepOutcome::AlreadyConfigured => {
            let _ = writeln!(out, "  Already configured");
        }
        StepOutcome::Patched { changes, warnings } => {
            let _ = writeln!(out, "  Updated");
            bullets(out, changes);
            for w in warnings {
                let _ = writeln!(out, "  Warning: {}", w);
            }
        }
        StepOutcome::Created { changes } => {
            let _ = writeln!(out, "  Created");
            bullets(out, changes);
        }
        StepOutcome::ManualRequired {
            reason,
            instructions,
        } => {
            let _ = writeln!(out, "  Warning: {}", reason);
            let _ = writeln!(out, "  Please add the following manually:\n");
            for line in instructions {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    let _ = writeln!(out, "    {}", line);
                }
            }
        }
        StepOutcome::Skipped { reason, guidance } => {
            let _ = writeln!(out, "  Warning: {}", reason);
            for line in guidance {
                let _ = writeln!(out, "    {}", line);
            }
        }
        StepOutcome::Failed { error } => {
            let _ = writeln!(out, "  Error: {}", error);
        }
    }
    out.push('\n');
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "    - {}", item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrig_core::Step;

    #[test]
    fn test_render_clean_report() {
        let report = SetupReport {
            app_name: "App".into(),
            steps: vec![StepReport::new(
                Step::InfoPlist,
                StepOutcome::Patched {
                    changes: vec!["Added remote-notification to UIBackgroundModes".into()],
                    warnings: vec![],
                },
            )
            .with_file("ios/App/Info.plist")
            .with_backup(Some("ios/App/Info.plist.backup".into()))],
        };

        let text = render_text(&report);
        assert!(text.starts_with("Found iOS project: App\n"));
        assert!(text.contains("[Info.plist] ios/App/Info.plist\n  Backup created: ios/App/Info.plist.backup\n  Updated\n    - Added remote-notification"));
        assert!(text.contains("\n1 file(s) changed.\n"));
        assert!(text.ends_with("Setup complete! Rebuild your iOS app to apply changes.\n"));
    }

    #[test]
    fn test_render_manual_steps() {
        let report = SetupReport {
            app_name: "App".into(),
            steps: vec![StepReport::new(
                Step::AppDelegate,
                StepOutcome::ManualRequired {
                    reason: "Existing notification delegate methods detected".into(),
                    instructions: vec!["In didFinishLaunchingWithOptions:".into(), "".into()],
                },
            )],
        };

        let text = render_text(&report);
        assert!(text.contains("  Warning: Existing notification delegate methods detected"));
        assert!(text.contains("    In didFinishLaunchingWithOptions:\n\n"));
        assert!(text.contains("\nNo files changed.\n"));
        assert!(text.contains("manual steps remaining (AppDelegate)"));
    }
}
