// Events
// Change notifications pushed to the web view

use serde::Serialize;
use serde_json::Value;

/// Events the state layer publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Payload: the full settings record
    SettingsChanged,
    /// Payload: the render-ready game list
    GamesUpdated,
}

impl AppEvent {
    pub fn name(self) -> &'static str {
        match self {
            AppEvent::SettingsChanged => "settings_changed",
            AppEvent::GamesUpdated => "games_updated",
        }
    }
}

/// Destination for published events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

/// Drops every event
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &str, _payload: Value) {}
}

/// Serialize `payload` and hand it to `sink`.
/// A payload that fails to serialize is logged and not sent.
pub fn emit_event<T: Serialize>(sink: &dyn EventSink, event: AppEvent, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => {
            log::debug!("Emitting '{}'", event.name());
            sink.emit(event.name(), value);
        }
        Err(e) => log::warn!("Failed to serialize '{}' payload: {e}", event.name()),
    }
}

/// Forwards events to every web view window
#[cfg(feature = "desktop")]
pub struct WebviewEvents<R: tauri::Runtime> {
    app: tauri::AppHandle<R>,
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> WebviewEvents<R> {
    pub fn new(app: tauri::AppHandle<R>) -> Self {
        Self { app }
    }
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> EventSink for WebviewEvents<R> {
    fn emit(&self, event: &str, payload: Value) {
        use tauri::Emitter;

        if let Err(e) = self.app.emit(event, payload) {
            log::warn!("Failed to emit '{event}': {e}");
        }
    }
}
