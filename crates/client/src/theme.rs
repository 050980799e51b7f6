//! Theme persistence and application.
//!
//! The local preference store is the source of the first paint; the server
//! value is loaded afterwards and wins when it arrives. Server failures never
//! revert what the user sees.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thoughtcache_core::theme::Theme;

use crate::api::ThoughtCacheApi;
use crate::error::ClientError;

/// CSS class toggled on the document root for the dark theme.
pub const DARK_CLASS: &str = "dark";

// ---------------------------------------------------------------------------
// Preference store
// ---------------------------------------------------------------------------

/// Local key-value persistence for UI preferences.
pub trait PreferenceStore: Send + Sync {
    fn load_theme(&self) -> Result<Option<Theme>, ClientError>;
    fn save_theme(&self, theme: Theme) -> Result<(), ClientError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    theme: Option<Theme>,
}

/// Preferences kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoredPreferences, ClientError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredPreferences::default()),
            Err(e) => Err(ClientError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, ClientError> {
        Ok(self.read()?.theme)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ClientError> {
        // A corrupt file is overwritten rather than blocking the toggle.
        let mut prefs = self.read().unwrap_or_default();
        prefs.theme = Some(theme);
        let bytes = serde_json::to_vec_pretty(&prefs)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, bytes)
            .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))
    }
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, ClientError> {
        let guard = self
            .theme
            .lock()
            .map_err(|_| ClientError::Storage("preference lock poisoned".into()))?;
        Ok(*guard)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ClientError> {
        let mut guard = self
            .theme
            .lock()
            .map_err(|_| ClientError::Storage("preference lock poisoned".into()))?;
        *guard = Some(theme);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Theme target
// ---------------------------------------------------------------------------

/// Whatever renders the theme (the document root in a browser shell).
pub trait ThemeTarget: Send + Sync {
    fn apply(&self, theme: Theme);
}

/// Class list of the document root element.
#[derive(Debug, Default)]
pub struct DocumentRoot {
    classes: Mutex<BTreeSet<String>>,
}

impl DocumentRoot {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .lock()
            .map(|classes| classes.contains(class))
            .unwrap_or(false)
    }
}

impl ThemeTarget for DocumentRoot {
    fn apply(&self, theme: Theme) {
        if let Ok(mut classes) = self.classes.lock() {
            if theme.is_dark() {
                classes.insert(DARK_CLASS.to_string());
            } else {
                classes.remove(DARK_CLASS);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the current theme and keeps the store, the target and the server in
/// step.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    target: Arc<dyn ThemeTarget>,
    current: Theme,
}

impl ThemeController {
    /// Read the locally stored theme and apply it immediately.
    pub fn hydrate(store: Arc<dyn PreferenceStore>, target: Arc<dyn ThemeTarget>) -> Self {
        let current = match store.load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored theme");
                Theme::default()
            }
        };
        target.apply(current);
        Self {
            store,
            target,
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Replace the local theme with the server's value.
    pub async fn load_from_server(&mut self, api: &dyn ThoughtCacheApi) -> Theme {
        match api.get_theme().await {
            Ok(theme) => self.set_local(theme),
            Err(e) => tracing::warn!(error = %e, "Failed to load theme from server"),
        }
        self.current
    }

    /// Flip between light and dark.
    pub async fn toggle(&mut self, api: &dyn ThoughtCacheApi) -> Theme {
        let next = self.current.toggled();
        self.set_theme(next, api).await
    }

    /// Store and apply `theme` locally, then persist it to the server.
    pub async fn set_theme(&mut self, theme: Theme, api: &dyn ThoughtCacheApi) -> Theme {
        self.set_local(theme);
        if let Err(e) = api.update_theme(theme).await {
            tracing::warn!(error = %e, theme = %theme, "Failed to save theme to server");
        }
        self.current
    }

    fn set_local(&mut self, theme: Theme) {
        if let Err(e) = self.store.save_theme(theme) {
            tracing::warn!(error = %e, "Failed to persist theme locally");
        }
        self.target.apply(theme);
        self.current = theme;
    }
}
