#![deny(missing_docs)]

//! # Swift AppDelegate
//!
//! Automated patching for `AppDelegate.swift`. Edits are plain text insertions
//! anchored on regular expressions; each one is skipped when its target text is
//! already present, so a partially patched file converges on re-run.

use super::common::{find_closing_brace, insert_after, matches_any};
use super::snippets::{swift_delegate_methods, swift_manual_instructions, SWIFT_LAUNCH_SETUP};
use super::{DelegatePatcher, Detection, Dialect, Patched};
use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// Substrings proving the SDK is already wired in.
const MARKERS: &[&str] = &["Entrig.checkLaunchNotification", "EntrigAppDelegate.setup"];

/// Protocol appended to the class conformance list.
const DELEGATE_PROTOCOL: &str = "UNUserNotificationCenterDelegate";

/// Imports inserted after the first existing import line.
const IMPORTS: &[&str] = &["UserNotifications", "EntrigSDK"];

/// Base class generated by Expo SDK 54+ templates.
const EXPO_BASE_CLASS: &str = "ExpoAppDelegate";

/// Which AppDelegate template the file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDelegateVariant {
    /// `public class AppDelegate: ExpoAppDelegate`; overrides must be `public`.
    Expo,
    /// `class AppDelegate: RCTAppDelegate` or `UIResponder, UIApplicationDelegate`.
    Generic,
}

impl AppDelegateVariant {
    /// Classifies `content` by its base class.
    pub fn detect(content: &str) -> Self {
        if content.contains(EXPO_BASE_CLASS) {
            AppDelegateVariant::Expo
        } else {
            AppDelegateVariant::Generic
        }
    }

    fn visibility(self) -> &'static str {
        match self {
            AppDelegateVariant::Expo => "public ",
            AppDelegateVariant::Generic => "",
        }
    }

    fn class_regex(self) -> &'static Regex {
        match self {
            AppDelegateVariant::Expo => {
                static EXPO_RE: OnceLock<Regex> = OnceLock::new();
                EXPO_RE.get_or_init(|| {
                    Regex::new(r"((?:public\s+)?class\s+AppDelegate\s*:\s*ExpoAppDelegate)\s*\{")
                        .expect("Invalid regex")
                })
            }
            AppDelegateVariant::Generic => {
                static GENERIC_RE: OnceLock<Regex> = OnceLock::new();
                GENERIC_RE.get_or_init(|| {
                    Regex::new(r"(class\s+AppDelegate\s*:\s*[^{]+)\{").expect("Invalid regex")
                })
            }
        }
    }
}

/// Patcher for the modern Swift dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftPatcher;

impl DelegatePatcher for SwiftPatcher {
    fn dialect(&self) -> Dialect {
        Dialect::Swift
    }

    fn detect(&self, content: &str) -> Detection {
        if MARKERS.iter().any(|m| content.contains(m)) {
            return Detection::Marker;
        }
        if matches_any(content, conflict_patterns()) {
            return Detection::Conflict;
        }
        Detection::Clean
    }

    fn patch(&self, content: &str) -> AppResult<Patched> {
        let variant = AppDelegateVariant::detect(content);
        tracing::debug!(?variant, "patching Swift AppDelegate");

        let mut out = Patched::unchanged(content);

        // 1. Imports
        for module in IMPORTS {
            let line = format!("import {}", module);
            if out.content.contains(&line) {
                continue;
            }
            if insert_after(&mut out.content, import_regex(), &format!("\n{}", line)) {
                out.changes.push(format!("Added {}", line));
            } else {
                out.warnings
                    .push(format!("No import line found; add `{}` manually", line));
            }
        }

        // 2. Protocol conformance
        if !out.content.contains(DELEGATE_PROTOCOL) {
            if add_conformance(&mut out.content, variant.class_regex()) {
                out.changes
                    .push(format!("Added {} conformance", DELEGATE_PROTOCOL));
            } else {
                out.warnings.push(format!(
                    "AppDelegate class declaration not recognised; add {} manually",
                    DELEGATE_PROTOCOL
                ));
            }
        }

        // 3. Launch setup
        if !out.content.contains(MARKERS[0]) {
            let inserted = launch_regexes()
                .iter()
                .any(|re| insert_after(&mut out.content, re, SWIFT_LAUNCH_SETUP));
            if !inserted {
                return Err(AppError::Parse(
                    "could not find application(_:didFinishLaunchingWithOptions:) in AppDelegate.swift"
                        .into(),
                ));
            }
            out.changes.push(
                "Added notification delegate setup in didFinishLaunchingWithOptions".to_string(),
            );
        }

        // 4. Callback methods
        if !out
            .content
            .contains("didRegisterForRemoteNotificationsWithDeviceToken")
        {
            let close = find_closing_brace(&out.content, "class AppDelegate").ok_or_else(|| {
                AppError::Parse("could not find the closing brace of class AppDelegate".into())
            })?;
            out.content
                .insert_str(close, &swift_delegate_methods(variant.visibility()));
            out.changes.extend(
                [
                    "Added didRegisterForRemoteNotifications",
                    "Added didFailToRegisterForRemoteNotifications",
                    "Added userNotificationCenter:willPresent",
                    "Added userNotificationCenter:didReceive",
                ]
                .iter()
                .map(|s| s.to_string()),
            );
        }

        Ok(out)
    }

    fn manual_instructions(&self) -> Vec<String> {
        swift_manual_instructions()
    }
}

/// Rewrites `class AppDelegate: Base {` as `class AppDelegate: Base, UNUserNotificationCenterDelegate {`.
fn add_conformance(content: &mut String, re: &Regex) -> bool {
    let (range, replacement) = {
        let Some(caps) = re.captures(content.as_str()) else {
            return false;
        };
        let (Some(whole), Some(decl)) = (caps.get(0), caps.get(1)) else {
            return false;
        };
        (
            whole.range(),
            format!("{}, {} {{", decl.as_str().trim_end(), DELEGATE_PROTOCOL),
        )
    };
    content.replace_range(range, &replacement);
    true
}

fn import_regex() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| Regex::new(r"(?m)^import \w+").expect("Invalid regex"))
}

/// `didFinishLaunchingWithOptions` signatures: with `override` first, then without.
fn launch_regexes() -> &'static [Regex] {
    static LAUNCH_RE: OnceLock<Vec<Regex>> = OnceLock::new();
    LAUNCH_RE.get_or_init(|| {
        let signature = r"func\s+application\(\s*_\s+application:\s*UIApplication,\s*didFinishLaunchingWithOptions\s+launchOptions:[^)]*\)\s*->\s*Bool\s*\{";
        vec![
            Regex::new(&format!(r"(?:public\s+)?override\s+{}", signature)).expect("Invalid regex"),
            Regex::new(signature).expect("Invalid regex"),
        ]
    })
}

fn conflict_patterns() -> &'static [Regex] {
    static CONFLICT_RE: OnceLock<Vec<Regex>> = OnceLock::new();
    CONFLICT_RE.get_or_init(|| {
        [
            r"func application\([^)]*didRegisterForRemoteNotificationsWithDeviceToken",
            r"func application\([^)]*didFailToRegisterForRemoteNotificationsWithError",
            r"func userNotificationCenter\([^)]*willPresent",
            r"func userNotificationCenter\([^)]*didReceive.*response",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RN_APP_DELEGATE: &str = r#"import UIKit
import React
import React_RCTAppDelegate

@main
class AppDelegate: RCTAppDelegate {
  override func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey : Any]? = nil) -> Bool {
    self.moduleName = "MyApp"
    return super.application(application, didFinishLaunchingWithOptions: launchOptions)
  }

  override func bundleURL() -> URL? {
    Bundle.main.url(forResource: "main", withExtension: "jsbundle")
  }
}
"#;

    const EXPO_APP_DELEGATE: &str = r#"import Expo
import React
import ReactAppDependencyProvider

@UIApplicationMain
public class AppDelegate: ExpoAppDelegate {
  var window: UIWindow?

  public override func application(
    _ application: UIApplication,
    didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]? = nil
  ) -> Bool {
    return super.application(application, didFinishLaunchingWithOptions: launchOptions)
  }
}
"#;

    #[test]
    fn test_detect_marker() {
        let code = "class AppDelegate: RCTAppDelegate {\n  Entrig.checkLaunchNotification(launchOptions)\n}";
        assert_eq!(SwiftPatcher.detect(code), Detection::Marker);
        let code = "EntrigAppDelegate.setup(launchOptions: launchOptions)";
        assert_eq!(SwiftPatcher.detect(code), Detection::Marker);
    }

    #[test]
    fn test_detect_conflict() {
        let code = r#"class AppDelegate: UIResponder, UIApplicationDelegate {
  func userNotificationCenter(_ center: UNUserNotificationCenter,
                              willPresent notification: UNNotification,
                              withCompletionHandler completionHandler: @escaping (UNNotificationPresentationOptions) -> Void) {}
}"#;
        assert_eq!(SwiftPatcher.detect(code), Detection::Conflict);

        let code = "func application(_ application: UIApplication, didFailToRegisterForRemoteNotificationsWithError error: Error) {}";
        assert_eq!(SwiftPatcher.detect(code), Detection::Conflict);
    }

    #[test]
    fn test_detect_clean() {
        assert_eq!(SwiftPatcher.detect(RN_APP_DELEGATE), Detection::Clean);
        assert_eq!(SwiftPatcher.detect(EXPO_APP_DELEGATE), Detection::Clean);
    }

    #[test]
    fn test_variant_detection() {
        assert_eq!(AppDelegateVariant::detect(EXPO_APP_DELEGATE), AppDelegateVariant::Expo);
        assert_eq!(AppDelegateVariant::detect(RN_APP_DELEGATE), AppDelegateVariant::Generic);
    }

    #[test]
    fn test_patch_react_native_template() {
        let patched = SwiftPatcher.patch(RN_APP_DELEGATE).unwrap();
        let code = &patched.content;

        assert!(code.starts_with("import UIKit\nimport EntrigSDK\nimport UserNotifications\nimport React\n"));
        assert!(code.contains("class AppDelegate: RCTAppDelegate, UNUserNotificationCenterDelegate {"));
        assert!(code.contains(
            "= nil) -> Bool {\n    // Entrig: Setup push notification handling\n    UNUserNotificationCenter.current().delegate = self\n    Entrig.checkLaunchNotification(launchOptions)\n\n    self.moduleName"
        ));
        assert_eq!(code.matches("override func application(\n").count(), 2);
        assert!(!code.contains("public override"));
        assert_eq!(code.matches('{').count(), code.matches('}').count());
        assert!(code.trim_end().ends_with("completionHandler()\n  }\n}"));
        assert_eq!(patched.changes.len(), 8);
        assert!(patched.warnings.is_empty());

        // Patched output carries the marker
        assert_eq!(SwiftPatcher.detect(code), Detection::Marker);
    }

    #[test]
    fn test_patch_expo_template() {
        let patched = SwiftPatcher.patch(EXPO_APP_DELEGATE).unwrap();
        let code = &patched.content;

        assert!(code.contains(
            "public class AppDelegate: ExpoAppDelegate, UNUserNotificationCenterDelegate {"
        ));
        assert!(code.contains("public override func application(\n    _ application: UIApplication,\n    didRegisterForRemoteNotificationsWithDeviceToken"));
        assert_eq!(code.matches("public func userNotificationCenter(").count(), 2);
        assert_eq!(code.matches("Entrig.checkLaunchNotification(launchOptions)").count(), 1);
        assert_eq!(code.matches('{').count(), code.matches('}').count());
    }

    #[test]
    fn test_patch_keeps_existing_pieces() {
        let code = "import UIKit\nimport UserNotifications\n\nclass AppDelegate: UIResponder, UIApplicationDelegate, UNUserNotificationCenterDelegate {\n  func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]?) -> Bool {\n    return true\n  }\n}\n";
        let patched = SwiftPatcher.patch(code).unwrap();

        assert_eq!(patched.content.matches("import UserNotifications").count(), 1);
        assert_eq!(patched.content.matches("UNUserNotificationCenterDelegate {").count(), 1);
        assert_eq!(
            patched.changes.first().map(String::as_str),
            Some("Added import EntrigSDK")
        );
        assert!(patched.content.contains("-> Bool {\n    // Entrig: Setup"));
    }

    #[test]
    fn test_patch_without_launch_method_fails() {
        let code = "import UIKit\n\nclass AppDelegate: UIResponder {\n}\n";
        let err = SwiftPatcher.patch(code).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_patch_unbalanced_class_fails() {
        let code = "import UIKit\n\nclass AppDelegate: UIResponder {\n  func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]?) -> Bool {\n    return true\n  }\n";
        let err = SwiftPatcher.patch(code).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Parse Error: could not find the closing brace of class AppDelegate"
        );
    }

    #[test]
    fn test_patch_reports_missing_imports() {
        let code = "class AppDelegate: UIResponder {\n  func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplication.LaunchOptionsKey: Any]?) -> Bool {\n    return true\n  }\n}\n";
        let patched = SwiftPatcher.patch(code).unwrap();
        assert_eq!(patched.warnings.len(), 2);
        assert!(!patched.content.contains("import EntrigSDK"));
        assert!(patched.content.contains("Entrig.didReceiveNotification(response)"));
    }
}
