// ── Paste gate ────────────────────────────────────────────────────────────────
//
// Decides whether a paste is large enough to be reviewed in a diff.
// Pure Rust; no host calls.

/// Default for the `diffPaste.minPasteSize` setting.
pub const DEFAULT_MIN_PASTE_SIZE: usize = 100;

/// Length of `text` as editor hosts count it: UTF-16 code units.
///
/// A non-BMP character such as an emoji therefore counts as two.
pub fn host_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Threshold check applied by the auto-paste command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteGate {
    min_paste_size: usize,
}

impl PasteGate {
    pub fn new(min_paste_size: usize) -> Self {
        Self { min_paste_size }
    }

    pub fn min_paste_size(self) -> usize {
        self.min_paste_size
    }

    /// `true` when either the incoming clipboard text or the text it will
    /// replace reaches the threshold.  Both bounds are inclusive.
    pub fn is_significant(self, clipboard_len: usize, selected_len: usize) -> bool {
        clipboard_len >= self.min_paste_size || selected_len >= self.min_paste_size
    }

    /// Gate a concrete paste: `clipboard` is the pending clipboard text and
    /// `selections` the text of every selection it will replace.
    pub fn check<'a>(self, clipboard: &str, selections: impl IntoIterator<Item = &'a str>) -> bool {
        let selected_len = selections.into_iter().map(host_len).sum();
        self.is_significant(host_len(clipboard), selected_len)
    }
}

impl Default for PasteGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASTE_SIZE)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let gate = PasteGate::new(100);
        assert!(gate.is_significant(100, 0));
        assert!(gate.is_significant(0, 100));
        assert!(!gate.is_significant(99, 99));
    }

    // Either side alone is enough, whatever the other side is.
    #[test]
    fn either_length_triggers() {
        let gate = PasteGate::new(10);
        for other in [0, 5, 9, 10, 500] {
            assert!(gate.is_significant(10, other));
            assert!(gate.is_significant(other, 10));
        }
    }

    #[test]
    fn small_clipboard_replacing_large_selection_is_significant() {
        let gate = PasteGate::new(100);
        assert!(gate.is_significant(50, 150));
    }

    #[test]
    fn selection_lengths_are_summed() {
        let gate = PasteGate::new(10);
        assert!(!gate.check("x", ["abcd"]));
        assert!(gate.check("x", ["abcde", "fghij"]));
    }

    #[test]
    fn length_counts_utf16_units() {
        assert_eq!(host_len("abc"), 3);
        assert_eq!(host_len("é"), 1);
        assert_eq!(host_len("😀"), 2);
        assert!(PasteGate::new(2).check("😀", std::iter::empty()));
    }

    #[test]
    fn zero_threshold_gates_everything() {
        assert!(PasteGate::new(0).check("", std::iter::empty()));
    }

    #[test]
    fn default_threshold_is_one_hundred() {
        assert_eq!(PasteGate::default().min_paste_size(), 100);
    }
}
