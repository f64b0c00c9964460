//! Code inserted into, or printed for, AppDelegate files.

/// Statements placed at the top of `didFinishLaunchingWithOptions`.
pub const SWIFT_LAUNCH_SETUP: &str = "
    // Entrig: Setup push notification handling
    UNUserNotificationCenter.current().delegate = self
    Entrig.checkLaunchNotification(launchOptions)
";

/// The four notification callbacks forwarded to the SDK.
///
/// `visibility` is prepended to every method (`"public "` for Expo's
/// `ExpoAppDelegate`, empty otherwise).
pub fn swift_delegate_methods(visibility: &str) -> String {
    format!(
        r#"
  // MARK: - Entrig Push Notification Handling

  {v}override func application(
    _ application: UIApplication,
    didRegisterForRemoteNotificationsWithDeviceToken deviceToken: Data
  ) {{
    Entrig.didRegisterForRemoteNotifications(deviceToken: deviceToken)
    super.application(application, didRegisterForRemoteNotificationsWithDeviceToken: deviceToken)
  }}

  {v}override func application(
    _ application: UIApplication,
    didFailToRegisterForRemoteNotificationsWithError error: Error
  ) {{
    Entrig.didFailToRegisterForRemoteNotifications(error: error)
    super.application(application, didFailToRegisterForRemoteNotificationsWithError: error)
  }}

  {v}func userNotificationCenter(
    _ center: UNUserNotificationCenter,
    willPresent notification: UNNotification,
    withCompletionHandler completionHandler: @escaping (UNNotificationPresentationOptions) -> Void
  ) {{
    Entrig.willPresentNotification(notification)
    completionHandler(Entrig.getPresentationOptions())
  }}

  {v}func userNotificationCenter(
    _ center: UNUserNotificationCenter,
    didReceive response: UNNotificationResponse,
    withCompletionHandler completionHandler: @escaping () -> Void
  ) {{
    Entrig.didReceiveNotification(response)
    completionHandler()
  }}
"#,
        v = visibility
    )
}

/// Calls to merge by hand into an existing Swift AppDelegate.
pub fn swift_manual_instructions() -> Vec<String> {
    [
        "In didFinishLaunchingWithOptions:",
        "  UNUserNotificationCenter.current().delegate = self",
        "  Entrig.checkLaunchNotification(launchOptions)",
        "",
        "In didRegisterForRemoteNotificationsWithDeviceToken:",
        "  Entrig.didRegisterForRemoteNotifications(deviceToken: deviceToken)",
        "",
        "In didFailToRegisterForRemoteNotificationsWithError:",
        "  Entrig.didFailToRegisterForRemoteNotifications(error: error)",
        "",
        "In userNotificationCenter:willPresent:",
        "  Entrig.willPresentNotification(notification)",
        "  completionHandler(Entrig.getPresentationOptions())",
        "",
        "In userNotificationCenter:didReceive:",
        "  Entrig.didReceiveNotification(response)",
        "  completionHandler()",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect()
}

/// Imports and calls to add to an Objective-C AppDelegate.
pub fn objc_manual_instructions() -> Vec<String> {
    [
        "@import EntrigSDK;",
        "#import <UserNotifications/UserNotifications.h>",
        "",
        "Add UNUserNotificationCenterDelegate to the @interface protocol list.",
        "",
        "In didFinishLaunchingWithOptions:",
        "  [UNUserNotificationCenter currentNotificationCenter].delegate = self;",
        "  [Entrig checkLaunchNotification:launchOptions];",
        "",
        "In didRegisterForRemoteNotificationsWithDeviceToken:",
        "  [Entrig didRegisterForRemoteNotificationsWithDeviceToken:deviceToken];",
        "",
        "In didFailToRegisterForRemoteNotificationsWithError:",
        "  [Entrig didFailToRegisterForRemoteNotificationsWithError:error];",
        "",
        "In userNotificationCenter:willPresentNotification:",
        "  [Entrig willPresentNotification:notification];",
        "  completionHandler([Entrig getPresentationOptions]);",
        "",
        "In userNotificationCenter:didReceiveNotificationResponse:",
        "  [Entrig didReceiveNotification:response];",
        "  completionHandler();",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect()
}

/// Guidance when no AppDelegate exists at all.
pub fn missing_app_delegate_guidance() -> Vec<String> {
    vec![
        "You will need to manually configure notification handling.".to_string(),
        "Call EntrigAppDelegate.setup(launchOptions:) from didFinishLaunchingWithOptions".to_string(),
        "and forward the remote-notification callbacks to Entrig.".to_string(),
    ]
}
