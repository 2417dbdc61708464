// Test doubles for the store and catalog

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;
use crate::error::{BackendError, BackendResult};
use crate::models::{AppSettings, GameEntryRaw};
use crate::services::{Backend, EventSink, Notice, Notifier};

/// Scripted backend that records every save
pub struct MockBackend {
    load_result: Mutex<BackendResult<AppSettings>>,
    scan_result: Mutex<BackendResult<Vec<GameEntryRaw>>>,
    save_error: Mutex<Option<BackendError>>,
    save_gate: Mutex<Option<Arc<Semaphore>>>,
    saves: Mutex<Vec<AppSettings>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            load_result: Mutex::new(Ok(AppSettings::default())),
            scan_result: Mutex::new(Ok(Vec::new())),
            save_error: Mutex::new(None),
            save_gate: Mutex::new(None),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn set_load_result(&self, result: BackendResult<AppSettings>) {
        *self.load_result.lock().unwrap() = result;
    }

    pub fn set_scan_result(&self, result: BackendResult<Vec<GameEntryRaw>>) {
        *self.scan_result.lock().unwrap() = result;
    }

    pub fn fail_saves(&self, error: Option<BackendError>) {
        *self.save_error.lock().unwrap() = error;
    }

    /// Make saves wait for permits from the returned semaphore
    pub fn hold_saves(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.save_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn saves(&self) -> Vec<AppSettings> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn load_settings(&self) -> BackendResult<AppSettings> {
        self.load_result.lock().unwrap().clone()
    }

    async fn save_settings(&self, settings: &AppSettings) -> BackendResult<()> {
        self.saves.lock().unwrap().push(settings.clone());

        let gate = self.save_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let error = self.save_error.lock().unwrap().clone();
        match error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn scan_games(&self) -> BackendResult<Vec<GameEntryRaw>> {
        self.scan_result.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingEventSink {
    pub fn names(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn last(&self, event: &str) -> Option<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == event)
            .map(|(_, payload)| payload.clone())
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &str, payload: Value) {
        self.events.lock().unwrap().push((event.to_string(), payload));
    }
}

pub fn raw_game(name: &str, video: Option<&str>) -> GameEntryRaw {
    GameEntryRaw {
        name: name.to_string(),
        icon_path: format!("/games/{name}/Icon.png"),
        background_path: format!("/games/{name}/Background.png"),
        background_video_path: video.map(str::to_string),
        show_sidebar: false,
    }
}
