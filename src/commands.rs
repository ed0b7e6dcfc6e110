// ── Command identifiers ───────────────────────────────────────────────────────
//
// The two actions diff-paste registers with the host's command palette and
// keybinding system.  Binding them (e.g. overriding Ctrl+V) is the host's job.

use crate::error::{DiffPasteError, Result};

/// An invocable diff-paste action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Gate on paste size; small pastes go straight through.
    AutoPaste,
    /// Always capture and compare, whatever the paste size.
    ForceDiffPaste,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::AutoPaste, Command::ForceDiffPaste];

    /// Stable identifier used in keybinding files.
    pub fn id(self) -> &'static str {
        match self {
            Self::AutoPaste => "diffPaste.autoDiffPaste",
            Self::ForceDiffPaste => "diffPaste.forceDiffPaste",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| DiffPasteError::UnknownCommand(id.to_owned()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_resolve_back_to_commands() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_id(cmd.id()).unwrap(), cmd);
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!(matches!(
            Command::from_id("editor.action.clipboardPasteAction"),
            Err(DiffPasteError::UnknownCommand(_))
        ));
    }
}
