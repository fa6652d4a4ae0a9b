use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub instance: InstanceSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Sidecar lyric extensions, most preferred first.
    ///
    /// The first one that exists next to a track is used; later entries are
    /// only fallbacks.
    pub lyric_extensions: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
                "aac".into(),
            ],
            lyric_extensions: vec!["lrc".into(), "txt".into()],
        }
    }
}

impl LibrarySettings {
    /// Configured audio extensions, trimmed, dot-less and lowercased.
    pub fn normalized_extensions(&self) -> Vec<String> {
        normalize(&self.extensions)
    }

    /// Configured lyric extensions in priority order, normalized like
    /// [`Self::normalized_extensions`].
    pub fn normalized_lyric_extensions(&self) -> Vec<String> {
        normalize(&self.lyric_extensions)
    }
}

fn normalize(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InstanceSettings {
    /// Well-known session bus name. Owning it is what makes an instance the
    /// primary one.
    pub bus_name: String,
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            bus_name: "org.cadenza.Player".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Program and arguments of the UI process to launch once the instance
    /// lock is held.
    ///
    /// Example: ["cadenza-ui", "--dark"]
    ///
    /// Leave empty to wait for a UI that is started some other way.
    pub command: Vec<String>,
}
