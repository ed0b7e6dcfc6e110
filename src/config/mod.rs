// ── Settings ──────────────────────────────────────────────────────────────────
//
// Reads and writes the `diffPaste.*` keys of a JSON settings file.
// The file may hold unrelated editor settings; unknown keys are ignored on
// read and preserved on write.
// No `unsafe` — pure safe Rust + serde_json.

use std::{ffi::OsString, fs, io, path::PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::gate::{PasteGate, DEFAULT_MIN_PASTE_SIZE};

/// Key of the threshold in the settings file.
pub const MIN_PASTE_SIZE_KEY: &str = "diffPaste.minPasteSize";

// ── On-disk type ──────────────────────────────────────────────────────────────

/// The settings diff-paste reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Clipboard or replaced-selection length (UTF-16 units) at which
    /// auto-paste switches to a reviewed paste.
    #[serde(
        rename = "diffPaste.minPasteSize",
        default = "default_min_paste_size",
        deserialize_with = "size_from_number"
    )]
    pub min_paste_size: usize,
}

fn default_min_paste_size() -> usize {
    DEFAULT_MIN_PASTE_SIZE
}

/// Accept any JSON number, as editor settings do.
fn size_from_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<usize, D::Error> {
    f64::deserialize(d).map(threshold_from_number)
}

/// Lengths are whole numbers, so `len >= n` holds exactly when
/// `len >= ceil(n)`; anything at or below zero gates every paste.
fn threshold_from_number(n: f64) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        // `as` saturates at usize::MAX.
        n.ceil() as usize
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_paste_size: DEFAULT_MIN_PASTE_SIZE,
        }
    }
}

impl Settings {
    pub fn gate(self) -> PasteGate {
        PasteGate::new(self.min_paste_size)
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// Where the paste flow gets its settings.  Called once per gate evaluation,
/// so edits take effect on the next paste.
pub trait SettingsSource: Send + Sync {
    fn load(&self) -> Settings;
}

/// Fixed settings, e.g. from an embedder that manages its own config.
impl SettingsSource for Settings {
    fn load(&self) -> Settings {
        *self
    }
}

/// A JSON settings file re-read on every `load`.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user settings file (see `settings_path`).
    ///
    /// Returns `None` if no config directory can be determined.
    pub fn user() -> Option<Self> {
        settings_path().map(Self::new)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read and parse the file.  A missing file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<Settings>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// Write `settings` into the file, creating the parent directory if it
    /// does not exist.
    ///
    /// Only the `diffPaste.*` keys are replaced; every other key is kept.  A
    /// file that exists but is not a JSON object is left untouched and
    /// reported as an error.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let mut root = self.read_object()?;
        root.insert(
            MIN_PASTE_SIZE_KEY.to_owned(),
            Value::from(settings.min_paste_size),
        );

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &root)?;
        Ok(())
    }

    /// The file's top-level object; empty when the file is missing or blank.
    fn read_object(&self) -> Result<Map<String, Value>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }
}

impl SettingsSource for SettingsFile {
    /// Falls back to defaults on any error so that a broken settings file
    /// never blocks a paste.
    fn load(&self) -> Settings {
        match self.read() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable settings: {e}");
                Settings::default()
            }
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the per-user settings file path.
///
/// Tried in order: `%APPDATA%\DiffPaste\settings.json`,
/// `$XDG_CONFIG_HOME/diff-paste/settings.json` (when non-empty),
/// `$HOME/.config/diff-paste/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    resolve_settings_path(
        std::env::var_os("APPDATA"),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn resolve_settings_path(
    appdata: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(appdata) = appdata {
        let mut p = PathBuf::from(appdata);
        p.push("DiffPaste");
        p.push("settings.json");
        return Some(p);
    }
    let mut p = match xdg_config_home {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let mut home = PathBuf::from(home?);
            home.push(".config");
            home
        }
    };
    p.push("diff-paste");
    p.push("settings.json");
    Some(p)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn os(s: &str) -> Option<OsString> {
        Some(OsString::from(s))
    }

    #[test]
    fn parses_editor_style_key() {
        let s: Settings = serde_json::from_str(r#"{"diffPaste.minPasteSize": 250}"#).unwrap();
        assert_eq!(s.min_paste_size, 250);
    }

    /// Settings files are shared with the rest of the editor; foreign keys
    /// must not break parsing and a missing key means the default.
    #[test]
    fn missing_key_defaults_and_foreign_keys_are_ignored() {
        let json = r#"{"editor.fontSize": 14, "files.eol": "\n"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.min_paste_size, 100);
    }

    #[test]
    fn fractional_size_rounds_up() {
        let s: Settings = serde_json::from_str(r#"{"diffPaste.minPasteSize": 50.5}"#).unwrap();
        assert_eq!(s.min_paste_size, 51);
        assert!(!s.gate().is_significant(50, 0));
        assert!(s.gate().is_significant(51, 0));
    }

    #[test]
    fn non_positive_size_gates_every_paste() {
        for json in [
            r#"{"diffPaste.minPasteSize": -1}"#,
            r#"{"diffPaste.minPasteSize": 0}"#,
        ] {
            let s: Settings = serde_json::from_str(json).unwrap();
            assert_eq!(s.min_paste_size, 0, "{json}");
        }
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"diffPaste.minPasteSize": "big"}"#).is_err());
    }

    #[test]
    fn missing_file_reads_as_none_and_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("settings.json"));
        assert!(file.read().unwrap().is_none());
        assert_eq!(file.load(), Settings::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let file = SettingsFile::new(&path);
        assert!(file.read().is_err());
        assert_eq!(file.load(), Settings::default());
    }

    #[test]
    fn save_creates_directory_and_load_sees_it() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nested").join("settings.json"));
        file.save(&Settings { min_paste_size: 7 }).unwrap();
        assert_eq!(file.load().min_paste_size, 7);

        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("\"diffPaste.minPasteSize\": 7"));
    }

    #[test]
    fn save_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"editor.fontSize": 14, "diffPaste.minPasteSize": 100}"#).unwrap();

        let file = SettingsFile::new(&path);
        file.save(&Settings { min_paste_size: 5 }).unwrap();

        let root: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(root.get("editor.fontSize"), Some(&Value::from(14)));
        assert_eq!(root.get(MIN_PASTE_SIZE_KEY), Some(&Value::from(5)));
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn save_refuses_to_clobber_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();

        let file = SettingsFile::new(&path);
        assert!(file.save(&Settings { min_paste_size: 5 }).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }

    #[test]
    fn save_over_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "\n").unwrap();

        let file = SettingsFile::new(&path);
        file.save(&Settings { min_paste_size: 9 }).unwrap();
        assert_eq!(file.load().min_paste_size, 9);
    }

    #[test]
    fn fixed_settings_are_their_own_source() {
        let s = Settings { min_paste_size: 3 };
        assert_eq!(SettingsSource::load(&s), s);
        assert!(s.gate().is_significant(3, 0));
    }

    // ── settings_path ────────────────────────────────────────────────────────

    #[test]
    fn appdata_wins_over_everything() {
        let p = resolve_settings_path(os("C:/Users/me/AppData"), os("/xdg"), os("/home/me"));
        assert_eq!(
            p,
            Some(PathBuf::from("C:/Users/me/AppData").join("DiffPaste").join("settings.json"))
        );
    }

    #[test]
    fn xdg_config_home_before_home() {
        let p = resolve_settings_path(None, os("/xdg"), os("/home/me"));
        assert_eq!(p, Some(PathBuf::from("/xdg/diff-paste/settings.json")));
    }

    #[test]
    fn empty_xdg_config_home_falls_back_to_home() {
        let p = resolve_settings_path(None, os(""), os("/home/me"));
        assert_eq!(p, Some(PathBuf::from("/home/me/.config/diff-paste/settings.json")));

        let p = resolve_settings_path(None, None, os("/home/me"));
        assert_eq!(p, Some(PathBuf::from("/home/me/.config/diff-paste/settings.json")));
    }

    #[test]
    fn no_home_means_no_path() {
        assert_eq!(resolve_settings_path(None, None, None), None);
        assert_eq!(resolve_settings_path(None, os(""), None), None);
    }

    #[test]
    fn user_file_uses_resolved_path() {
        assert_eq!(
            SettingsFile::user().map(|f| f.path().to_path_buf()),
            settings_path()
        );
    }
}
