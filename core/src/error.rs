//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// Resolver errors (`IosDirNotFound`, `AppNotFound`) abort a run. Every other
/// variant is scoped to the step that produced it.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The `ios/` directory is missing from the project root.
    #[from(ignore)]
    #[display("ios/ directory not found in {}", _0.display())]
    IosDirNotFound(PathBuf),

    /// No application directory could be picked inside `ios/`.
    #[from(ignore)]
    #[display("Could not determine app name from {}", _0.display())]
    AppNotFound(PathBuf),

    /// An anchor the patcher relies on is missing from the file.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The requested operation is not automated for this input.
    #[from(ignore)]
    #[display("Unsupported: {_0}")]
    Unsupported(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors that must stop the whole run before any step executes.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::IosDirNotFound(_) | AppError::AppNotFound(_))
    }
}
