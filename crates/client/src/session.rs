//! Per-user client session and the side-effect seams views report through.

use std::sync::Arc;

use thoughtcache_core::sharing::share_url;
use thoughtcache_core::theme::Theme;

use crate::api::ThoughtCacheApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::theme::{FilePreferenceStore, PreferenceStore, ThemeController, ThemeTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient user-facing notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// System clipboard. Only success or failure is observable.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClientError>;
}

/// Notifier that only logs; useful for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => tracing::info!(message, "notice"),
            NoticeKind::Error => tracing::warn!(message, "notice"),
        }
    }
}

/// Everything a view needs: the API handle, the theme controller, the
/// notifier and the public origin for share links.
pub struct Session {
    api: Arc<dyn ThoughtCacheApi>,
    theme: ThemeController,
    notifier: Arc<dyn Notifier>,
    origin: String,
}

impl Session {
    /// Build a session and apply the locally stored theme right away.
    pub fn init(
        api: Arc<dyn ThoughtCacheApi>,
        store: Arc<dyn PreferenceStore>,
        target: Arc<dyn ThemeTarget>,
        notifier: Arc<dyn Notifier>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            api,
            theme: ThemeController::hydrate(store, target),
            notifier,
            origin: origin.into(),
        }
    }

    /// [`Session::init`] with the file-backed preference store named in `config`.
    pub fn from_config(
        config: &ClientConfig,
        api: Arc<dyn ThoughtCacheApi>,
        target: Arc<dyn ThemeTarget>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = Arc::new(FilePreferenceStore::new(&config.prefs_path));
        Self::init(api, store, target, notifier, config.origin.clone())
    }

    pub fn api(&self) -> &dyn ThoughtCacheApi {
        self.api.as_ref()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn share_url(&self, slug: &str) -> String {
        share_url(&self.origin, slug)
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Pull the theme saved on the server. Failures keep the local theme.
    pub async fn load_theme(&mut self) -> Theme {
        self.theme.load_from_server(self.api.as_ref()).await
    }

    pub async fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(self.api.as_ref()).await
    }

    pub fn notify_success(&self, message: &str) {
        self.notifier.notify(NoticeKind::Success, message);
    }

    /// Log a failure and show its user-facing message.
    pub fn report(&self, action: &str, err: &ClientError) {
        tracing::warn!(action, error = %err, "Client operation failed");
        self.notifier.notify(NoticeKind::Error, &err.user_message());
    }
}
