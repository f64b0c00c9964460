//! # Objective-C AppDelegate
//!
//! Legacy `AppDelegate.mm` / `AppDelegate.m`. The `@interface` / `@implementation`
//! split makes blind insertion unsafe, so only detection is automated and the
//! developer always receives the snippets to merge.

use super::common::matches_any;
use super::snippets::objc_manual_instructions;
use super::{DelegatePatcher, Detection, Dialect, Patched};
use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// Patcher for the legacy Objective-C dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjcPatcher;

impl DelegatePatcher for ObjcPatcher {
    fn dialect(&self) -> Dialect {
        Dialect::ObjC
    }

    fn detect(&self, content: &str) -> Detection {
        let configured = content.contains("[Entrig checkLaunchNotification")
            || content.contains("EntrigAppDelegate setup")
            || (content.contains("Entrig") && content.contains("checkLaunchNotification"));
        if configured {
            return Detection::Marker;
        }
        if matches_any(content, conflict_patterns()) {
            return Detection::Conflict;
        }
        Detection::Clean
    }

    fn patch(&self, _content: &str) -> AppResult<Patched> {
        Err(AppError::Unsupported(
            "automatic patching is only supported for Swift AppDelegates".into(),
        ))
    }

    fn manual_instructions(&self) -> Vec<String> {
        objc_manual_instructions()
    }
}

fn conflict_patterns() -> &'static [Regex] {
    static CONFLICT_RE: OnceLock<Vec<Regex>> = OnceLock::new();
    CONFLICT_RE.get_or_init(|| {
        [
            r"-\s*\(void\)\s*application:[^{]*didRegisterForRemoteNotificationsWithDeviceToken:",
            r"-\s*\(void\)\s*application:[^{]*didFailToRegisterForRemoteNotificationsWithError:",
            r"-\s*\(void\)\s*userNotificationCenter:[^{]*willPresentNotification:",
            r"-\s*\(void\)\s*userNotificationCenter:[^{]*didReceiveNotificationResponse:",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
    })
}
