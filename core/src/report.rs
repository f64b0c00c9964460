#![deny(missing_docs)]

//! # Setup Reports
//!
//! Every step reports a typed outcome instead of failing the run. The CLI
//! renders these as text or serializes them to JSON.

use serde::Serialize;
use std::fmt::Display;

/// The independent patch steps of a setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// AppDelegate hooks.
    AppDelegate,
    /// `aps-environment` entitlement.
    Entitlements,
    /// `CODE_SIGN_ENTITLEMENTS` in the Xcode project.
    BuildSettings,
    /// `UIBackgroundModes` in Info.plist.
    InfoPlist,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::AppDelegate => write!(f, "AppDelegate"),
            Step::Entitlements => write!(f, "Entitlements"),
            Step::BuildSettings => write!(f, "Build settings"),
            Step::InfoPlist => write!(f, "Info.plist"),
        }
    }
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The file already carried the change; nothing was written.
    AlreadyConfigured,

    /// The file was modified in place.
    Patched {
        /// Human-readable list of applied edits.
        changes: Vec<String>,
        /// Edits that could not be anchored and need manual follow-up.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },

    /// The file did not exist and was created.
    Created {
        /// Human-readable list of what the new file contains.
        changes: Vec<String>,
    },

    /// The file was left alone; the developer must merge the snippets by hand.
    ManualRequired {
        /// Why automatic patching was not attempted.
        reason: String,
        /// Code the developer has to add.
        instructions: Vec<String>,
    },

    /// The step had nothing to work on.
    Skipped {
        /// Why the step was skipped.
        reason: String,
        /// Follow-up hints for the developer.
        guidance: Vec<String>,
    },

    /// The step hit an error; other steps still ran.
    Failed {
        /// Rendered error.
        error: String,
    },
}

impl StepOutcome {
    /// True when the step left the project in the desired state.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            StepOutcome::AlreadyConfigured | StepOutcome::Patched { .. } | StepOutcome::Created { .. }
        )
    }

    /// True when the step wrote to disk.
    pub fn wrote(&self) -> bool {
        matches!(self, StepOutcome::Patched { .. } | StepOutcome::Created { .. })
    }
}

/// Outcome of a single step on a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Which step produced this report.
    pub step: Step,
    /// Target file, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Backup made before writing, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    /// The outcome.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl StepReport {
    /// Creates a report with no file or backup attached.
    pub fn new(step: Step, outcome: StepOutcome) -> Self {
        Self {
            step,
            file: None,
            backup: None,
            outcome,
        }
    }

    /// Attaches the target file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attaches the backup location, if any.
    pub fn with_backup(mut self, backup: Option<String>) -> Self {
        self.backup = backup;
        self
    }
}

/// Aggregated result of a setup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    /// The resolved application name.
    pub app_name: String,
    /// Step reports in execution order.
    pub steps: Vec<StepReport>,
}

impl SetupReport {
    /// True when every step succeeded without manual follow-up.
    pub fn is_clean(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.is_success())
    }

    /// Steps that need the developer's attention.
    pub fn needs_attention(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| !s.outcome.is_success())
    }

    /// Returns the report for `step`, if the run produced one.
    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }
}
