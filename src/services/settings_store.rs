// SettingsStore Service
// Owns the live settings record, its load lifecycle and auto-save

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use serde::Serialize;
use tokio::sync::watch;
use crate::error::StoreError;
use crate::models::AppSettings;
use crate::services::{emit_event, AppEvent, Backend, EventSink, Notice, Notifier};

/// Load state of the settings record. Changes are only persisted once `Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Loaded,
}

#[derive(Debug, Default)]
struct SaveState {
    in_flight: bool,
    dirty: bool,
}

/// Clears the in-flight flag if a save loop is dropped mid-request.
///
/// The dirty flag survives so the next save or `flush` writes the
/// changes the dropped loop had taken over.
struct InFlight<'a> {
    state: &'a Mutex<SaveState>,
    finished: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.in_flight = false;
            if state.dirty {
                log::warn!("Settings save was cancelled with changes pending");
            }
        }
    }
}

/// Holds the settings record and persists every change after the first load.
///
/// At most one save request is in flight. Changes made while a save is
/// running are folded into one follow-up save of the latest record.
pub struct SettingsStore {
    settings: watch::Sender<AppSettings>,
    lifecycle: RwLock<Lifecycle>,
    save_state: Mutex<SaveState>,
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    events: Arc<dyn EventSink>,
}

impl SettingsStore {
    pub fn new(
        backend: Arc<dyn Backend>,
        notifier: Arc<dyn Notifier>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let (settings, _) = watch::channel(AppSettings::default());
        Self {
            settings,
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
            save_state: Mutex::new(SaveState::default()),
            backend,
            notifier,
            events,
        }
    }

    /// Load persisted settings and arm auto-save.
    ///
    /// A successful load replaces the whole record. On failure the defaults
    /// stay and the user is told why. Auto-save is armed either way.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.set_lifecycle(Lifecycle::Loading);

        let result = match self.backend.load_settings().await {
            Ok(loaded) => {
                log::info!("Loaded settings (profile '{}')", loaded.active_profile_name);
                self.apply(move |settings| *settings = loaded);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load settings: {e}");
                self.notifier
                    .notify(Notice::error(format!("Failed to load settings: {e}")));
                Err(StoreError::Load(e))
            }
        };

        self.set_lifecycle(Lifecycle::Loaded);
        result
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loaded(&self) -> bool {
        self.lifecycle() == Lifecycle::Loaded
    }

    pub fn snapshot(&self) -> AppSettings {
        self.settings.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppSettings> {
        self.settings.subscribe()
    }

    /// Mutate the record. Returns whether anything changed.
    ///
    /// A change made after the first load is saved before this returns,
    /// unless another save is already running, in which case that save
    /// picks it up.
    pub async fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut AppSettings),
    {
        if !self.apply(f) {
            return false;
        }

        if self.is_loaded() {
            self.persist().await;
        } else {
            log::debug!("Skipping save because settings are not loaded yet");
        }
        true
    }

    /// Save changes left behind by a cancelled save.
    ///
    /// Returns whether a save ran.
    pub async fn flush(&self) -> bool {
        let pending = {
            let state = self.save_state();
            state.dirty && !state.in_flight
        };
        if !pending || !self.is_loaded() {
            return false;
        }

        self.persist().await;
        true
    }

    /// Replace the whole record
    pub async fn replace(&self, settings: AppSettings) -> bool {
        self.update(move |current| *current = settings).await
    }

    fn apply<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut AppSettings),
    {
        let changed = self.settings.send_if_modified(|settings| {
            let before = settings.clone();
            f(settings);
            *settings != before
        });

        if changed {
            emit_event(self.events.as_ref(), AppEvent::SettingsChanged, &self.snapshot());
        }
        changed
    }

    async fn persist(&self) {
        {
            let mut state = self.save_state();
            if state.in_flight {
                state.dirty = true;
                return;
            }
            state.in_flight = true;
        }

        let mut in_flight = InFlight {
            state: &self.save_state,
            finished: false,
        };

        loop {
            self.save_state().dirty = false;
            let snapshot = self.snapshot();
            log::info!("Saving settings (profile '{}')", snapshot.active_profile_name);
            if let Err(e) = self.backend.save_settings(&snapshot).await {
                log::error!("Failed to save settings: {e}");
            }

            let mut state = self.save_state();
            if state.dirty {
                continue;
            }
            state.in_flight = false;
            in_flight.finished = true;
            break;
        }
    }

    fn set_lifecycle(&self, lifecycle: Lifecycle) {
        *self.lifecycle.write().unwrap_or_else(PoisonError::into_inner) = lifecycle;
    }

    fn save_state(&self) -> MutexGuard<'_, SaveState> {
        self.save_state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::models::BackgroundMode;
    use crate::services::testing::{MockBackend, RecordingEventSink, RecordingNotifier};
    use crate::services::NoticeKind;

    struct Harness {
        backend: Arc<MockBackend>,
        notifier: Arc<RecordingNotifier>,
        events: Arc<RecordingEventSink>,
        store: Arc<SettingsStore>,
    }

    fn harness() -> Harness {
        let backend = Arc::new(MockBackend::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEventSink::default());
        let store = Arc::new(SettingsStore::new(
            backend.clone(),
            notifier.clone(),
            events.clone(),
        ));
        Harness {
            backend,
            notifier,
            events,
            store,
        }
    }

    fn saved_record() -> AppSettings {
        AppSettings {
            background_mode: BackgroundMode::Video,
            background_image_path: "asset://localhost/img".to_string(),
            background_video_path: "asset://localhost/vid".to_string(),
            sidebar_opacity: 0.9,
            sidebar_blur: 1.0,
            content_opacity: 0.5,
            content_blur: 0.0,
            cache_directory: "/cache".to_string(),
            active_profile_name: "HSR".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initialize_overwrites_every_field() {
        let h = harness();
        h.backend.set_load_result(Ok(saved_record()));

        assert_eq!(h.store.lifecycle(), Lifecycle::Uninitialized);
        h.store.initialize().await.unwrap();

        assert_eq!(h.store.snapshot(), saved_record());
        assert_eq!(h.store.lifecycle(), Lifecycle::Loaded);
        assert!(h.backend.saves().is_empty());
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_failure_keeps_defaults_and_notifies() {
        let h = harness();
        h.backend
            .set_load_result(Err(BackendError::Parse("bad json at line 3".to_string())));

        let result = h.store.initialize().await;

        assert!(matches!(result, Err(StoreError::Load(_))));
        assert_eq!(h.store.snapshot(), AppSettings::default());
        assert!(h.store.is_loaded());

        let notices = h.notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].title, "Error");
        assert!(notices[0].message.contains("bad json at line 3"));
        assert!(h.backend.saves().is_empty());
    }

    #[tokio::test]
    async fn test_auto_save_armed_after_failed_load() {
        let h = harness();
        h.backend.set_load_result(Err(BackendError::Io("disk gone".to_string())));
        let _ = h.store.initialize().await;

        h.store.update(|s| s.content_blur = 9.0).await;
        assert_eq!(h.backend.saves().len(), 1);
    }

    #[tokio::test]
    async fn test_no_save_before_load() {
        let h = harness();
        let mut rx = h.store.subscribe();

        for blur in 1..=5 {
            assert!(h.store.update(|s| s.sidebar_blur = blur as f64).await);
        }

        assert!(h.backend.saves().is_empty());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().sidebar_blur, 5.0);
    }

    #[tokio::test]
    async fn test_one_save_per_mutation_after_load() {
        let h = harness();
        h.store.initialize().await.unwrap();

        h.store.update(|s| s.sidebar_opacity = 0.5).await;
        h.store.update(|s| s.content_opacity = 0.6).await;
        h.store.update(|s| s.active_profile_name = "GI".to_string()).await;

        let saves = h.backend.saves();
        assert_eq!(saves.len(), 3);
        assert_eq!(saves[0].sidebar_opacity, 0.5);
        assert_eq!(saves[1].content_opacity, 0.6);
        assert_eq!(saves[2], h.store.snapshot());
    }

    #[tokio::test]
    async fn test_unchanged_update_is_not_saved() {
        let h = harness();
        h.store.initialize().await.unwrap();

        let changed = h.store.update(|s| s.sidebar_blur = 20.0).await;

        assert!(!changed);
        assert!(h.backend.saves().is_empty());
        assert!(!h.events.names().contains(&AppEvent::SettingsChanged.name().to_string()));
    }

    #[tokio::test]
    async fn test_multi_field_update_saves_once() {
        let h = harness();
        h.store.initialize().await.unwrap();

        h.store.replace(saved_record()).await;

        let saves = h.backend.saves();
        assert_eq!(saves, vec![saved_record()]);
    }

    #[tokio::test]
    async fn test_save_failure_is_silent_and_not_blocking() {
        let h = harness();
        h.store.initialize().await.unwrap();
        h.backend.fail_saves(Some(BackendError::Io("read-only".to_string())));

        h.store.update(|s| s.content_blur = 1.0).await;
        h.backend.fail_saves(None);
        h.store.update(|s| s.content_blur = 2.0).await;

        let saves = h.backend.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].content_blur, 2.0);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_changes_coalesce() {
        let h = harness();
        h.store.initialize().await.unwrap();
        let gate = h.backend.hold_saves();

        let store = h.store.clone();
        let first = tokio::spawn(async move {
            store.update(|s| s.sidebar_blur = 1.0).await;
        });
        while h.backend.saves().is_empty() {
            tokio::task::yield_now().await;
        }

        // A save is in flight, so these only mark the record dirty
        h.store.update(|s| s.sidebar_blur = 2.0).await;
        h.store.update(|s| s.sidebar_blur = 3.0).await;
        assert_eq!(h.backend.saves().len(), 1);

        gate.add_permits(2);
        first.await.unwrap();

        let saves = h.backend.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].sidebar_blur, 1.0);
        assert_eq!(saves[1].sidebar_blur, 3.0);

        // The loop finished, so the next change saves on its own
        gate.add_permits(1);
        h.store.update(|s| s.sidebar_blur = 4.0).await;
        assert_eq!(h.backend.saves().len(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_save_releases_in_flight() {
        let h = harness();
        h.store.initialize().await.unwrap();
        let gate = h.backend.hold_saves();

        let store = h.store.clone();
        let stuck = tokio::spawn(async move {
            store.update(|s| s.sidebar_blur = 1.0).await;
        });
        while h.backend.saves().is_empty() {
            tokio::task::yield_now().await;
        }
        stuck.abort();
        let _ = stuck.await;

        gate.add_permits(1);
        h.store.update(|s| s.sidebar_blur = 2.0).await;
        assert_eq!(h.backend.saves().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_save_keeps_folded_change() {
        let h = harness();
        h.store.initialize().await.unwrap();
        let gate = h.backend.hold_saves();

        let store = h.store.clone();
        let stuck = tokio::spawn(async move {
            store.update(|s| s.sidebar_blur = 1.0).await;
        });
        while h.backend.saves().is_empty() {
            tokio::task::yield_now().await;
        }

        // Folded into the running save, which is then dropped
        assert!(h.store.update(|s| s.sidebar_blur = 2.0).await);
        stuck.abort();
        let _ = stuck.await;
        assert_eq!(h.backend.saves().len(), 1);

        gate.add_permits(1);
        assert!(h.store.flush().await);

        let saves = h.backend.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].sidebar_blur, 2.0);
        assert_eq!(saves[1], h.store.snapshot());

        // Nothing left to write
        assert!(!h.store.flush().await);
    }

    #[tokio::test]
    async fn test_next_change_after_cancel_saves_once() {
        let h = harness();
        h.store.initialize().await.unwrap();
        let gate = h.backend.hold_saves();

        let store = h.store.clone();
        let stuck = tokio::spawn(async move {
            store.update(|s| s.sidebar_blur = 1.0).await;
        });
        while h.backend.saves().is_empty() {
            tokio::task::yield_now().await;
        }
        h.store.update(|s| s.sidebar_blur = 2.0).await;
        stuck.abort();
        let _ = stuck.await;

        gate.add_permits(1);
        h.store.update(|s| s.content_blur = 3.0).await;

        let saves = h.backend.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].sidebar_blur, 2.0);
        assert_eq!(saves[1].content_blur, 3.0);
    }

    #[tokio::test]
    async fn test_flush_is_noop_without_pending_changes() {
        let h = harness();
        h.store.initialize().await.unwrap();
        h.store.update(|s| s.sidebar_blur = 1.0).await;

        assert!(!h.store.flush().await);
        assert_eq!(h.backend.saves().len(), 1);
    }

    #[tokio::test]
    async fn test_changes_are_emitted() {
        let h = harness();
        h.store.initialize().await.unwrap();
        h.store.update(|s| s.active_profile_name = "ZZZ".to_string()).await;

        let payload = h.events.last(AppEvent::SettingsChanged.name()).unwrap();
        assert_eq!(payload["currentConfigName"], "ZZZ");
    }
}
