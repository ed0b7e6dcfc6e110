// ── In-memory editor host ─────────────────────────────────────────────────────
//
// A pure-Rust `EditorHost`: documents are plain `String`s with multi-range
// selections, the clipboard is a field, and diff views and notices are
// recorded instead of rendered.  Headless embedders drive diff-paste through
// it, and the flow tests in `app` run against it.

use std::ops::Range;

use async_trait::async_trait;

use super::{DiffRequest, DocumentId, EditorHost};
use crate::error::{DiffPasteError, Result};

/// One open document.
#[derive(Debug)]
struct Buffer {
    id: DocumentId,
    text: String,
    /// Byte ranges on char boundaries, never empty as a list: a bare caret
    /// is an empty range.
    selections: Vec<Range<usize>>,
}

impl Buffer {
    /// Clamp `r` into the text and onto char boundaries.
    fn normalise(&self, r: Range<usize>) -> Range<usize> {
        let snap = |mut i: usize| {
            i = i.min(self.text.len());
            while !self.text.is_char_boundary(i) {
                i -= 1;
            }
            i
        };
        let (a, b) = (snap(r.start), snap(r.end));
        a.min(b)..a.max(b)
    }

    /// Replace every selection with `insert`, leaving a caret after each
    /// insertion.  Overlapping selections are merged front to back.
    fn replace_selections(&mut self, insert: &str) {
        let mut sel = self.selections.clone();
        sel.sort_by_key(|r| r.start);

        let mut out = String::with_capacity(self.text.len() + insert.len() * sel.len());
        let mut carets = Vec::with_capacity(sel.len());
        let mut cursor = 0;
        for r in sel {
            let start = r.start.max(cursor);
            let end = r.end.max(start);
            out.push_str(&self.text[cursor..start]);
            out.push_str(insert);
            carets.push(out.len()..out.len());
            cursor = end;
        }
        out.push_str(&self.text[cursor..]);

        self.text = out;
        self.selections = carets;
    }
}

/// An `EditorHost` that lives entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    buffers: Vec<Buffer>,
    active: Option<DocumentId>,
    clipboard: String,
    diffs: Vec<DiffRequest>,
    notices: Vec<String>,
    pastes: usize,
    paste_failure: Option<String>,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Documents ─────────────────────────────────────────────────────────────

    /// Open `text` as a document at `path` and focus it, caret at offset 0.
    ///
    /// Re-opening an already open path replaces its text.
    pub fn open(&mut self, path: &str, text: &str) -> DocumentId {
        let id = DocumentId::new(path);
        self.buffers.retain(|b| b.id != id);
        self.buffers.push(Buffer {
            id: id.clone(),
            text: text.to_owned(),
            selections: vec![0..0],
        });
        self.active = Some(id.clone());
        id
    }

    pub fn close(&mut self, doc: &DocumentId) {
        self.buffers.retain(|b| &b.id != doc);
        if self.active.as_ref() == Some(doc) {
            self.active = None;
        }
    }

    pub fn focus(&mut self, doc: &DocumentId) -> Result<()> {
        self.buffer(doc)?;
        self.active = Some(doc.clone());
        Ok(())
    }

    /// Move focus away from every text editor (e.g. to a panel).
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The current text of `doc`, if it is open.
    pub fn text(&self, doc: &DocumentId) -> Option<&str> {
        self.buffer(doc).ok().map(|b| b.text.as_str())
    }

    // ── Selections ────────────────────────────────────────────────────────────

    /// Replace the selections of `doc` with the given byte ranges.
    ///
    /// Ranges are clamped to the text; an empty list leaves a caret at 0.
    pub fn set_selections(&mut self, doc: &DocumentId, ranges: Vec<Range<usize>>) -> Result<()> {
        let buf = self.buffer_mut(doc)?;
        let mut sel: Vec<_> = ranges.into_iter().map(|r| buf.normalise(r)).collect();
        if sel.is_empty() {
            sel.push(0..0);
        }
        buf.selections = sel;
        Ok(())
    }

    pub fn set_selection(&mut self, doc: &DocumentId, range: Range<usize>) -> Result<()> {
        self.set_selections(doc, vec![range])
    }

    pub fn set_caret(&mut self, doc: &DocumentId, pos: usize) -> Result<()> {
        self.set_selections(doc, vec![pos..pos])
    }

    /// Select all document text.
    pub fn select_all(&mut self, doc: &DocumentId) -> Result<()> {
        let len = self.buffer(doc)?.text.len();
        self.set_selections(doc, vec![0..len])
    }

    // ── Clipboard ─────────────────────────────────────────────────────────────

    pub fn set_clipboard(&mut self, text: &str) {
        self.clipboard = text.to_owned();
    }

    /// Make the next `paste` fail with `message`.
    pub fn fail_next_paste(&mut self, message: &str) {
        self.paste_failure = Some(message.to_owned());
    }

    // ── Recorded host output ──────────────────────────────────────────────────

    /// Diff views opened so far, oldest first.
    pub fn diffs(&self) -> &[DiffRequest] {
        &self.diffs
    }

    /// Information messages shown so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// How many native pastes have run, with or without a focused editor.
    pub fn paste_count(&self) -> usize {
        self.pastes
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    fn buffer(&self, doc: &DocumentId) -> Result<&Buffer> {
        self.buffers
            .iter()
            .find(|b| &b.id == doc)
            .ok_or_else(|| DiffPasteError::DocumentNotOpen(doc.to_string()))
    }

    fn buffer_mut(&mut self, doc: &DocumentId) -> Result<&mut Buffer> {
        self.buffers
            .iter_mut()
            .find(|b| &b.id == doc)
            .ok_or_else(|| DiffPasteError::DocumentNotOpen(doc.to_string()))
    }
}

#[async_trait]
impl EditorHost for MemoryEditor {
    fn active_document(&self) -> Option<DocumentId> {
        self.active.clone()
    }

    fn document_text(&self, doc: &DocumentId) -> Result<String> {
        Ok(self.buffer(doc)?.text.clone())
    }

    fn selected_texts(&self, doc: &DocumentId) -> Result<Vec<String>> {
        let buf = self.buffer(doc)?;
        Ok(buf
            .selections
            .iter()
            .map(|r| buf.text[r.clone()].to_owned())
            .collect())
    }

    async fn read_clipboard(&mut self) -> Result<String> {
        Ok(self.clipboard.clone())
    }

    async fn paste(&mut self) -> Result<()> {
        if let Some(message) = self.paste_failure.take() {
            return Err(DiffPasteError::host("paste", message));
        }
        self.pastes += 1;
        // No focused editor: the paste lands nowhere we model.
        if let Some(doc) = self.active.clone() {
            let clip = self.clipboard.clone();
            self.buffer_mut(&doc)?.replace_selections(&clip);
        }
        Ok(())
    }

    async fn show_diff(&mut self, request: DiffRequest) -> Result<()> {
        self.diffs.push(request);
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
