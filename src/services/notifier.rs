// Notifier
// User-facing notices (modal dialogs in the desktop shell)

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            title: "Warning".to_string(),
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log instead of showing them
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => log::info!("{}: {}", notice.title, notice.message),
            NoticeKind::Warning => log::warn!("{}: {}", notice.title, notice.message),
            NoticeKind::Error => log::error!("{}: {}", notice.title, notice.message),
        }
    }
}

/// Logs notices and shows them as native message dialogs
#[cfg(feature = "desktop")]
pub struct DialogNotifier<R: tauri::Runtime> {
    app_handle: tauri::AppHandle<R>,
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> DialogNotifier<R> {
    pub fn new(app_handle: tauri::AppHandle<R>) -> Self {
        Self { app_handle }
    }
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> Notifier for DialogNotifier<R> {
    fn notify(&self, notice: Notice) {
        use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

        LogNotifier.notify(notice.clone());
        let kind = match notice.kind {
            NoticeKind::Info => MessageDialogKind::Info,
            NoticeKind::Warning => MessageDialogKind::Warning,
            NoticeKind::Error => MessageDialogKind::Error,
        };
        self.app_handle
            .dialog()
            .message(notice.message)
            .title(notice.title)
            .kind(kind)
            .show(|_| {});
    }
}
