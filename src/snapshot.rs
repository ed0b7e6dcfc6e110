// ── Pending snapshot & virtual content ────────────────────────────────────────
//
// The single slot that carries the pre-paste text from capture time to
// compare time, and the read-only `diff-paste:` resources that serve it as
// the left side of the diff view.

use crate::editor::DocumentId;
use crate::error::{DiffPasteError, Result};

/// URI scheme registered for the left side of the diff.
pub const SCHEME: &str = "diff-paste";

/// Fallback extension when the pasted-into document has none.
const DEFAULT_EXTENSION: &str = ".txt";

// ── VirtualUri ────────────────────────────────────────────────────────────────

/// A resource in the `diff-paste` scheme: `diff-paste://diff/original<ext>`.
///
/// The extension mirrors the real document's so the diff view highlights
/// both sides with the same language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualUri(String);

impl VirtualUri {
    /// The left-side resource for a paste into `doc`.
    pub fn original_for(doc: &DocumentId) -> Self {
        let ext = doc
            .dotted_extension()
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned());
        Self(format!("{SCHEME}://diff/original{ext}"))
    }

    /// Accept any URI in the `diff-paste` scheme.
    pub fn parse(uri: &str) -> Result<Self> {
        match uri.split_once("://") {
            Some((scheme, _)) if scheme.eq_ignore_ascii_case(SCHEME) => Ok(Self(uri.to_owned())),
            _ => Err(DiffPasteError::ForeignUri(uri.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VirtualUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── PendingSnapshot ───────────────────────────────────────────────────────────

/// A document's full text as it was immediately before a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSnapshot {
    pub document: DocumentId,
    pub text: String,
}

/// Holds at most one `PendingSnapshot`.
///
/// Every capture replaces whatever was held before, so a cleared or stale
/// snapshot is never compared against a later paste.
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    current: Option<PendingSnapshot>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` as the pre-paste state of `document`.
    pub fn capture(&mut self, document: DocumentId, text: String) {
        self.current = Some(PendingSnapshot { document, text });
    }

    /// The held text, or `""` once cleared.
    pub fn text(&self) -> &str {
        self.current.as_ref().map_or("", |s| s.text.as_str())
    }

    pub fn document(&self) -> Option<&DocumentId> {
        self.current.as_ref().map(|s| &s.document)
    }

    pub fn get(&self) -> Option<&PendingSnapshot> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
