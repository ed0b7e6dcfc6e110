// ── Change classifier ─────────────────────────────────────────────────────────
//
// Decides whether a paste changed more than whitespace.  Lines are split on
// `\n` only; a `\r` stays in the line and is removed by trimming like any
// other trailing whitespace.

/// Whitespace as editor hosts trim it: the ECMAScript `WhiteSpace` and
/// `LineTerminator` sets.  Unlike `char::is_whitespace` this excludes
/// U+0085 (NEL) and includes the BOM.
fn is_trimmable(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{0B}' | '\u{0C}' | ' ' | '\u{A0}' | '\u{FEFF}'
            | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
    )
}

fn trimmed(line: &str) -> &str {
    line.trim_matches(is_trimmable)
}

/// `true` when `new` differs from `old` by more than leading or trailing
/// whitespace on some line.
///
/// A different line count is always meaningful.  Lines are compared by
/// position, so reordering identical lines is meaningful too.
pub fn changed_meaningfully(old: &str, new: &str) -> bool {
    // `split` on "" yields one empty line, matching the host's view of an
    // empty document.
    if old.split('\n').count() != new.split('\n').count() {
        return true;
    }
    old.split('\n')
        .zip(new.split('\n'))
        .any(|(a, b)| trimmed(a) != trimmed(b))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
