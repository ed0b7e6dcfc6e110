// ── Safety policy ────────────────────────────────────────────────────────────
// diff-paste is pure decision logic over a host-provided editor; it has no
// FFI surface, so unsafe code is forbidden outright.
#![forbid(unsafe_code)]

//! Review large clipboard pastes in a side-by-side diff.
//!
//! `DiffPaste` wraps an [`EditorHost`].  Its auto-paste command lets small
//! pastes through untouched; a paste whose clipboard text or replaced
//! selection reaches `diffPaste.minPasteSize` is captured, performed, and
//! shown as a diff against the pre-paste text unless only whitespace changed.

pub mod app;
pub mod classify;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod gate;
pub mod snapshot;

pub use app::{DiffPaste, PasteOutcome, WHITESPACE_ONLY_NOTICE};
pub use classify::changed_meaningfully;
pub use commands::Command;
pub use config::{Settings, SettingsFile, SettingsSource};
pub use editor::memory::MemoryEditor;
pub use editor::{DiffRequest, DocumentId, EditorHost};
pub use error::{DiffPasteError, Result};
pub use gate::PasteGate;
pub use snapshot::{PendingSnapshot, VirtualUri};
