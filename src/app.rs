// ── Paste flow & controller state ─────────────────────────────────────────────
//
// A single `DiffPaste` is created when the host loads diff-paste and lives
// until `shutdown`.  It owns the only snapshot slot.  Every flow entry point
// takes `&mut self`, so two paste flows on one controller can never overlap;
// a host that shares the controller wraps it in its own lock and thereby
// queues the second invocation.

use tracing::{debug, info};

use crate::classify::changed_meaningfully;
use crate::commands::Command;
use crate::config::{Settings, SettingsSource};
use crate::editor::{DiffRequest, DocumentId, EditorHost};
use crate::error::Result;
use crate::snapshot::{PendingSnapshot, SnapshotSlot, VirtualUri};

/// Notice shown when a reviewed paste only moved whitespace around.
pub const WHITESPACE_ONLY_NOTICE: &str = "Diff Paste: Only whitespace/indentation changed.";

/// Which path a paste invocation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The host's own paste ran; nothing was captured.
    PlainPaste,
    /// The paste changed content and a diff view was opened.
    DiffShown,
    /// The paste changed whitespace only; the snapshot was dropped.
    WhitespaceOnly,
}

/// Top-level diff-paste state for one editor session.
pub struct DiffPaste<H> {
    host: H,
    settings: Box<dyn SettingsSource>,
    slot: SnapshotSlot,
}

impl<H: EditorHost> DiffPaste<H> {
    /// Controller with the default settings.
    pub fn new(host: H) -> Self {
        Self::with_settings(host, Settings::default())
    }

    pub fn with_settings(host: H, settings: impl SettingsSource + 'static) -> Self {
        Self {
            host,
            settings: Box::new(settings),
            slot: SnapshotSlot::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Drive the host between commands: open documents, move focus, load
    /// the clipboard.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Run the command registered under `cmd`.
    pub async fn execute(&mut self, cmd: Command) -> Result<PasteOutcome> {
        match cmd {
            Command::AutoPaste => self.auto_paste().await,
            Command::ForceDiffPaste => self.force_diff_paste().await,
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Paste, reviewing it in a diff when the clipboard text or the text it
    /// replaces reaches `diffPaste.minPasteSize`.
    pub async fn auto_paste(&mut self) -> Result<PasteOutcome> {
        let Some(doc) = self.host.active_document() else {
            return self.plain_paste().await;
        };

        let gate = self.settings.load().gate();
        let clipboard = self.host.read_clipboard().await?;
        let selections = self.host.selected_texts(&doc)?;
        let significant = gate.check(&clipboard, selections.iter().map(String::as_str));
        debug!(
            doc = %doc,
            min_paste_size = gate.min_paste_size(),
            significant,
            "paste gate evaluated"
        );

        if !significant {
            return self.plain_paste().await;
        }
        self.force_diff_paste().await
    }

    /// Paste and review the result, whatever its size.
    pub async fn force_diff_paste(&mut self) -> Result<PasteOutcome> {
        let Some(doc) = self.host.active_document() else {
            return self.plain_paste().await;
        };

        let before = self.host.document_text(&doc)?;
        self.slot.capture(doc.clone(), before);
        debug!(doc = %doc, "captured pre-paste snapshot");

        // On failure the slot stays populated; the next capture replaces it.
        self.host.paste().await?;

        let after = self.host.document_text(&doc)?;
        if changed_meaningfully(self.slot.text(), &after) {
            let request = DiffRequest::for_paste(&doc);
            info!(doc = %doc, original = %request.original, "showing paste diff");
            self.host.show_diff(request).await?;
            Ok(PasteOutcome::DiffShown)
        } else {
            info!(doc = %doc, "paste changed whitespace only");
            self.slot.clear();
            self.host.notify(WHITESPACE_ONLY_NOTICE);
            Ok(PasteOutcome::WhitespaceOnly)
        }
    }

    async fn plain_paste(&mut self) -> Result<PasteOutcome> {
        self.host.paste().await?;
        Ok(PasteOutcome::PlainPaste)
    }

    // ── Virtual content ───────────────────────────────────────────────────────

    /// Left-side text for a `diff-paste:` resource: the held snapshot
    /// verbatim, or `""` once it has been cleared.
    ///
    /// The URI's path is not consulted; there is only one slot to serve.
    pub fn provide_content(&self, _uri: &VirtualUri) -> &str {
        self.slot.text()
    }

    pub fn pending(&self) -> Option<&PendingSnapshot> {
        self.slot.get()
    }

    /// The document the live snapshot was taken from.
    pub fn pending_document(&self) -> Option<&DocumentId> {
        self.slot.document()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Drop any held snapshot; called when the host unloads diff-paste.
    pub fn shutdown(&mut self) {
        self.slot.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
