#![deny(missing_docs)]

//! # Target Resolution
//!
//! Locates the `ios/` directory of a React Native project and the single
//! application directory inside it. Purely read-only.

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names under `ios/` that never hold the application sources.
const EXCLUDED_DIRS: &[&str] = &["Pods", "build"];

/// Suffixes of Xcode bundles living next to the application directory.
const EXCLUDED_SUFFIXES: &[&str] = &[".xcodeproj", ".xcworkspace"];

/// AppDelegate file names, in lookup order.
const APP_DELEGATE_FILES: &[&str] = &["AppDelegate.swift", "AppDelegate.mm", "AppDelegate.m"];

/// A resolved iOS project: the native root plus the application name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IosProject {
    /// Root of the React Native project (the directory containing `ios/`).
    pub root: PathBuf,
    /// The `ios/` directory.
    pub ios_dir: PathBuf,
    /// Name of the application directory inside `ios/`.
    pub app_name: String,
}

impl IosProject {
    /// Directory holding the application's sources and plists.
    pub fn app_dir(&self) -> PathBuf {
        self.ios_dir.join(&self.app_name)
    }

    /// AppDelegate paths to probe, Swift first.
    pub fn app_delegate_candidates(&self) -> Vec<PathBuf> {
        let dir = self.app_dir();
        APP_DELEGATE_FILES.iter().map(|f| dir.join(f)).collect()
    }

    /// Entitlements paths to probe: the exact app name, then the name without whitespace.
    pub fn entitlements_candidates(&self) -> Vec<PathBuf> {
        let stripped: String = self
            .app_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let mut candidates = vec![self.default_entitlements_path()];
        let alt = self.app_dir().join(format!("{}.entitlements", stripped));
        if !candidates.contains(&alt) {
            candidates.push(alt);
        }
        candidates
    }

    /// Where a new entitlements file is created.
    pub fn default_entitlements_path(&self) -> PathBuf {
        self.app_dir()
            .join(format!("{}.entitlements", self.app_name))
    }

    /// The Xcode build-configuration manifest.
    pub fn pbxproj_path(&self) -> PathBuf {
        self.ios_dir
            .join(format!("{}.xcodeproj", self.app_name))
            .join("project.pbxproj")
    }

    /// The application's `Info.plist`.
    pub fn info_plist_path(&self) -> PathBuf {
        self.app_dir().join("Info.plist")
    }

    /// Value written to `CODE_SIGN_ENTITLEMENTS`, relative to `ios/`.
    pub fn entitlements_build_setting(&self) -> String {
        format!("{0}/{0}.entitlements", self.app_name)
    }

    /// Renders `path` relative to the project root for console output.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Resolves the iOS project rooted at `project_root`.
///
/// When `app_name` is given it is taken as-is (host tooling such as a prebuild
/// hook already knows the project name). Otherwise the first directory under
/// `ios/` that is not hidden, not a build/dependency cache and not an Xcode
/// bundle wins, in file name order (so `MyApp` is picked over `MyAppTests`).
///
/// # Arguments
///
/// * `project_root` - The React Native project root.
/// * `app_name` - Optional explicit application name.
pub fn resolve_ios_project(project_root: &Path, app_name: Option<&str>) -> AppResult<IosProject> {
    let ios_dir = project_root.join("ios");
    if !ios_dir.is_dir() {
        return Err(AppError::IosDirNotFound(ios_dir));
    }

    let app_name = match app_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => find_app_name(&ios_dir)?,
    };

    tracing::debug!(app = %app_name, ios_dir = %ios_dir.display(), "resolved iOS project");

    Ok(IosProject {
        root: project_root.to_path_buf(),
        ios_dir,
        app_name,
    })
}

fn find_app_name(ios_dir: &Path) -> AppResult<String> {
    let walker = WalkDir::new(ios_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_app_candidate(&name) {
            return Ok(name.into_owned());
        }
        tracing::trace!(dir = %name, "skipping non-app directory");
    }

    Err(AppError::AppNotFound(ios_dir.to_path_buf()))
}

fn is_app_candidate(name: &str) -> bool {
    !name.starts_with('.')
        && !EXCLUDED_DIRS.contains(&name)
        && !EXCLUDED_SUFFIXES.iter().any(|s| name.ends_with(s))
}
