// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in diff-paste return `error::Result<T>`.  No panics
// in production paths; host failures propagate unchanged to the embedding
// editor, which owns the user-facing error surface.

use std::fmt;

/// Every error that diff-paste can produce.
#[derive(Debug, thiserror::Error)]
pub enum DiffPasteError {
    /// An editor host call (paste, clipboard read, diff display, …) failed.
    #[error("host {action} failed: {message}")]
    Host {
        /// The name of the failing host action, for display purposes.
        action: &'static str,
        /// The host's own description of the failure.
        message: String,
    },

    /// A document identifier no longer resolves to an open document.
    #[error("document {0} is not open")]
    DocumentNotOpen(String),

    /// A URI outside the `diff-paste` scheme was handed to the provider.
    #[error("not a diff-paste URI: {0}")]
    ForeignUri(String),

    /// A command identifier that diff-paste does not register.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A standard I/O error while reading or writing the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for `Settings`.
    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffPasteError {
    /// Wrap a host-side failure so that `?` can be used on host results.
    pub fn host(action: &'static str, err: impl fmt::Display) -> Self {
        Self::Host {
            action,
            message: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiffPasteError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
