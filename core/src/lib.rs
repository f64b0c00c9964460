#![deny(missing_docs)]

//! # Entrig Core
//!
//! Idempotent patching engine that wires the Entrig push SDK into a React
//! Native iOS project: AppDelegate hooks, the `aps-environment` entitlement
//! (plus its Xcode build setting) and the `remote-notification` background mode.

/// Shared error types.
pub mod error;

/// Locating `ios/` and the application directory.
pub mod project;

/// `.backup` copies taken before every write.
pub mod backup;

/// Step outcomes and run reports.
pub mod report;

/// AppDelegate patching (Swift and Objective-C).
pub mod delegate;

/// Entitlements patching.
pub mod entitlements;

/// `project.pbxproj` build settings.
pub mod pbxproj;

/// Info.plist background modes.
pub mod info_plist;

/// The end-to-end setup pipeline.
pub mod workflow;

pub use delegate::{
    patch_app_delegate, AppDelegateVariant, DelegatePatcher, Detection, Dialect, ObjcPatcher,
    Patched, SwiftPatcher,
};
pub use entitlements::{default_entitlements, insert_aps_environment, update_entitlements};
pub use error::{AppError, AppResult};
pub use info_plist::{add_background_mode, update_info_plist};
pub use pbxproj::{add_code_sign_entitlements, register_entitlements};
pub use project::{resolve_ios_project, IosProject};
pub use report::{SetupReport, Step, StepOutcome, StepReport};
pub use workflow::{run_setup, SetupOptions};
