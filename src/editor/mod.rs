// ── Editor host abstraction ───────────────────────────────────────────────────
//
// Everything diff-paste needs from the editor it runs inside: document text,
// selections, the clipboard, the native paste, diff display and notices.
// The flow in `app` talks only to `EditorHost`; it never touches a concrete
// editor.  `memory::MemoryEditor` is the in-process implementation.

pub mod memory;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::snapshot::VirtualUri;

// ── Document identity ─────────────────────────────────────────────────────────

/// Identifies one open document by its file-system path.
///
/// Untitled buffers use whatever placeholder path the host assigns them
/// (e.g. `Untitled-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(PathBuf);

impl DocumentId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The extension including its leading dot, or `None` when the file name
    /// has none (`Makefile`, `.bashrc`).
    pub fn dotted_extension(&self) -> Option<String> {
        self.0
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
    }

    /// The bare file name with its extension stripped.
    pub fn base_name(&self) -> String {
        self.0
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_owned())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ── Diff request ──────────────────────────────────────────────────────────────

/// Everything the host needs to open the side-by-side review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    /// Read-only left side, served by `DiffPaste::provide_content`.
    pub original: VirtualUri,
    /// Live document shown on the right.
    pub modified: DocumentId,
    /// Tab title, e.g. `"Diff (Paste) - main"`.
    pub title: String,
    /// `false`: the view stays open instead of being replaced by the next
    /// preview.
    pub preview: bool,
}

impl DiffRequest {
    /// The review for a paste into `doc`.
    pub fn for_paste(doc: &DocumentId) -> Self {
        Self {
            original: VirtualUri::original_for(doc),
            modified: doc.clone(),
            title: format!("Diff (Paste) - {}", doc.base_name()),
            preview: false,
        }
    }
}

// ── EditorHost ────────────────────────────────────────────────────────────────

/// Capabilities the embedding editor provides, one method per action.
///
/// Async methods are awaited one after another by the paste flow; the flow
/// never has two host calls outstanding.  Implementations report their own
/// failures as `DiffPasteError::Host`.
#[async_trait]
pub trait EditorHost: Send {
    /// The document under the focused editor, or `None` when no text editor
    /// has focus.
    fn active_document(&self) -> Option<DocumentId>;

    /// The full current text of `doc`.
    fn document_text(&self, doc: &DocumentId) -> Result<String>;

    /// The text of every selection in `doc`'s editor; empty selections
    /// (bare carets) contribute `""`.
    fn selected_texts(&self, doc: &DocumentId) -> Result<Vec<String>>;

    /// The pending clipboard text.
    async fn read_clipboard(&mut self) -> Result<String>;

    /// Run the editor's own paste on the active selections.
    async fn paste(&mut self) -> Result<()>;

    /// Open a side-by-side diff view.
    async fn show_diff(&mut self, request: DiffRequest) -> Result<()>;

    /// Show a non-modal information message.
    fn notify(&mut self, message: &str);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
