//! Local UI preferences persisted as a JSON file.

use std::path::{Path, PathBuf};

use pulse_types::PreferencesError;
use serde::{Deserialize, Serialize};

/// Process-wide UI preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Render with the dark theme.
    pub dark_mode: bool,
}

/// Loads preferences once at startup and writes them back on every change.
///
/// The file and its parent directory are created lazily on first save.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferencesStore {
    /// Load from `path`.
    ///
    /// A missing file yields defaults. So does a corrupt one, with a
    /// warning; it is overwritten on the next save.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let current = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt preferences file");
                Preferences::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(PreferencesError::Io(e)),
        };
        Ok(Self { path, current })
    }

    /// The current preferences.
    #[must_use]
    pub fn get(&self) -> Preferences {
        self.current
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set dark mode, saving only if it changed.
    pub async fn set_dark_mode(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        if self.current.dark_mode == enabled {
            return Ok(());
        }
        self.update(Preferences { dark_mode: enabled }).await
    }

    /// Flip dark mode and save. Returns the new value.
    pub async fn toggle_dark_mode(&mut self) -> Result<bool, PreferencesError> {
        let enabled = !self.current.dark_mode;
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }

    /// Replace all preferences and save.
    pub async fn update(&mut self, preferences: Preferences) -> Result<(), PreferencesError> {
        self.save(&preferences).await?;
        self.current = preferences;
        Ok(())
    }

    async fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let contents = serde_json::to_string_pretty(preferences)
            .map_err(|e| PreferencesError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
