//! Background worker for storage and capture operations.
//!
//! The [`LocationWorker`] owns the location database, the preference store and
//! the position provider, keeping the UI loop free of blocking I/O. It talks
//! to the UI over channels:
//!
//! - Receives [`Command`]s from the UI to perform operations
//! - Sends [`ScreenEvent`]s back to report results and status updates
//!
//! # Architecture
//!
//! The worker runs in a separate Tokio task and uses `tokio::select!` to handle:
//! - Incoming commands from the UI
//! - Results of the capture task, which runs on its own so that a clear can
//!   interrupt it
//!
//! Each capture is tagged with the epoch it started in. A clear cancels the
//! running capture and starts a new epoch, so a late fix can never re-populate
//! a cleared list.

use std::sync::Arc;

use mylocation_core::{
    CaptureOutcome, Command, Coordinates, Error as CoreError, LocationProvider, PositionOptions,
    ScreenEvent, capture_once_cancellable,
};
use mylocation_store::{KeyValueStore, LocationStore, PreferenceStore};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of one capture task.
#[derive(Debug)]
struct CaptureResult {
    epoch: u64,
    result: mylocation_core::Result<Coordinates>,
}

/// Background worker that handles storage and capture.
///
/// The store is held directly: the worker is its only user and every call is
/// serialized by the run loop.
pub struct LocationWorker {
    /// Receiver for commands from the UI thread.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI thread.
    event_tx: mpsc::Sender<ScreenEvent>,
    store: LocationStore,
    prefs: PreferenceStore<Box<dyn KeyValueStore>>,
    provider: Arc<dyn LocationProvider>,
    options: PositionOptions,
    capture_tx: mpsc::Sender<CaptureResult>,
    capture_rx: mpsc::Receiver<CaptureResult>,
    /// Bumped by every clear.
    capture_epoch: u64,
    /// Set while a capture is running.
    capture_cancel: Option<CancellationToken>,
}

impl LocationWorker {
    /// Create a new worker.
    ///
    /// # Arguments
    ///
    /// * `command_rx` - Channel receiver for commands from the UI
    /// * `event_tx` - Channel sender for events to the UI
    /// * `store` - Open location database
    /// * `prefs` - Theme preference store
    /// * `provider` - Position source
    pub fn new<K: KeyValueStore + 'static>(
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<ScreenEvent>,
        store: LocationStore,
        prefs: PreferenceStore<K>,
        provider: Arc<dyn LocationProvider>,
    ) -> Self {
        let kv: Box<dyn KeyValueStore> = Box::new(prefs.into_inner());
        let (capture_tx, capture_rx) = mpsc::channel(4);

        Self {
            command_rx,
            event_tx,
            store,
            prefs: PreferenceStore::new(kv),
            provider,
            options: PositionOptions::default(),
            capture_tx,
            capture_rx,
            capture_epoch: 0,
            capture_cancel: None,
        }
    }

    /// Options passed to every position request.
    #[must_use]
    pub fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed.
    pub async fn run(mut self) {
        info!(provider = self.provider.name(), "LocationWorker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) => {
                            info!("LocationWorker received shutdown command");
                            break;
                        }
                        Some(cmd) => {
                            self.handle_command(cmd).await;
                        }
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                Some(finished) = self.capture_rx.recv() => {
                    self.handle_capture_result(finished).await;
                }
            }
        }

        if let Some(token) = self.capture_cancel.take() {
            token.cancel();
        }
        info!("LocationWorker stopped");
    }

    /// Handle a single command from the UI.
    async fn handle_command(&mut self, cmd: Command) {
        debug!(?cmd, "Handling command");

        match cmd {
            Command::Mount => self.handle_mount().await,
            Command::Capture => self.handle_capture().await,
            Command::Clear => self.handle_clear().await,
            Command::SetDarkMode(dark) => self.handle_set_dark_mode(dark).await,
            Command::Shutdown => {
                // Handled in run() loop
            }
        }
    }

    /// Make sure the table exists, then load the list and the theme.
    async fn handle_mount(&mut self) {
        let schema = self.store.ensure_schema();
        match schema {
            Ok(()) => self.reload_locations().await,
            Err(e) => {
                error!(error = %e, "Failed to initialize location table");
                storage_failed(&self.event_tx, "initialize", e.to_string()).await;
            }
        }

        let dark = self.prefs.load_dark_mode();
        match dark {
            Ok(dark) => {
                debug!(dark, "Loaded dark mode preference");
                send(&self.event_tx, ScreenEvent::DarkModeLoaded(dark)).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read dark mode preference, using light");
                send(&self.event_tx, ScreenEvent::PreferenceFailed {
                    error: e.to_string(),
                })
                .await;
                send(&self.event_tx, ScreenEvent::DarkModeLoaded(false)).await;
            }
        }
    }

    async fn reload_locations(&mut self) {
        let records = self.store.list_all();
        match records {
            Ok(records) => {
                debug!(count = records.len(), "Loaded locations");
                send(&self.event_tx, ScreenEvent::LocationsLoaded(records)).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to load locations");
                storage_failed(&self.event_tx, "load", e.to_string()).await;
            }
        }
    }

    /// Start a capture unless one is already running.
    async fn handle_capture(&mut self) {
        if self.capture_cancel.is_some() {
            warn!("Capture already in progress, ignoring request");
            return;
        }

        let token = CancellationToken::new();
        self.capture_cancel = Some(token.clone());
        send(&self.event_tx, ScreenEvent::CaptureStarted).await;

        let epoch = self.capture_epoch;
        let provider = Arc::clone(&self.provider);
        let options = self.options;
        let tx = self.capture_tx.clone();
        info!(provider = provider.name(), epoch, "Starting capture");

        tokio::spawn(async move {
            let result = capture_once_cancellable(&*provider, &options, &token).await;
            let _ = tx.send(CaptureResult { epoch, result }).await;
        });
    }

    async fn handle_capture_result(&mut self, finished: CaptureResult) {
        if finished.epoch != self.capture_epoch {
            debug!(
                epoch = finished.epoch,
                current = self.capture_epoch,
                "Discarding capture result from before a clear"
            );
            return;
        }
        self.capture_cancel = None;

        let outcome = match finished.result {
            Ok(coords) => self.save_capture(coords).await,
            Err(CoreError::PermissionDenied) => {
                warn!("Location permission denied");
                CaptureOutcome::PermissionDenied
            }
            Err(CoreError::Cancelled) => CaptureOutcome::Cancelled,
            Err(e) => {
                error!(error = %e, "Capture failed");
                CaptureOutcome::Failed(e.to_string())
            }
        };

        send(&self.event_tx, ScreenEvent::CaptureFinished(outcome)).await;
    }

    async fn save_capture(&mut self, coords: Coordinates) -> CaptureOutcome {
        let inserted = self.store.insert(coords);
        let record = match inserted {
            Ok(record) => record,
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "Failed to save location");
                storage_failed(&self.event_tx, "save", message.clone()).await;
                return CaptureOutcome::Failed(message);
            }
        };

        info!(id = record.id, "Saved location");
        self.reload_locations().await;
        CaptureOutcome::Saved(record)
    }

    /// Delete every record. A running capture is cancelled first.
    async fn handle_clear(&mut self) {
        if let Some(token) = self.capture_cancel.take() {
            token.cancel();
            info!("Clear superseded the running capture");
            send(&self.event_tx, ScreenEvent::CaptureFinished(CaptureOutcome::Cancelled))
                .await;
        }
        self.capture_epoch = self.capture_epoch.wrapping_add(1);

        let cleared = self.store.clear_all();
        match cleared {
            Ok(deleted) => {
                info!(deleted, "Cleared locations");
                send(&self.event_tx, ScreenEvent::LocationsLoaded(Vec::new())).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to clear locations");
                storage_failed(&self.event_tx, "clear", e.to_string()).await;
                // The screen emptied its list optimistically; put it back.
                self.reload_locations().await;
            }
        }
    }

    async fn handle_set_dark_mode(&mut self, dark: bool) {
        let saved = self.prefs.save_dark_mode(dark);
        if let Err(e) = saved {
            warn!(error = %e, dark, "Failed to save dark mode preference");
            send(&self.event_tx, ScreenEvent::PreferenceFailed {
                error: e.to_string(),
            })
            .await;
        }
    }
}

/// Deliver an event, ignoring a closed UI.
///
/// Takes the sender rather than the worker so that no borrow of the
/// (non-`Sync`) store is held across the await.
async fn send(event_tx: &mpsc::Sender<ScreenEvent>, event: ScreenEvent) {
    if event_tx.send(event).await.is_err() {
        debug!("UI is gone, dropping event");
    }
}

async fn storage_failed(event_tx: &mpsc::Sender<ScreenEvent>, operation: &str, error: String) {
    send(
        event_tx,
        ScreenEvent::StorageFailed {
            operation: operation.to_string(),
            error,
        },
    )
    .await;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use mylocation_core::{MockProvider, MockProviderBuilder, PermissionStatus};
    use mylocation_store::{DARK_MODE_KEY, MemoryKeyValueStore};
    use tokio::task::JoinHandle;

    struct Harness {
        cmd_tx: mpsc::Sender<Command>,
        event_rx: mpsc::Receiver<ScreenEvent>,
        handle: JoinHandle<()>,
    }

    impl Harness {
        fn start(store: LocationStore, kv: MemoryKeyValueStore, provider: Arc<MockProvider>) -> Self {
            let (cmd_tx, cmd_rx) = mpsc::channel(32);
            let (event_tx, event_rx) = mpsc::channel(32);
            let worker =
                LocationWorker::new(cmd_rx, event_tx, store, PreferenceStore::new(kv), provider);
            let handle = tokio::spawn(worker.run());
            Self {
                cmd_tx,
                event_rx,
                handle,
            }
        }

        async fn send(&self, cmd: Command) {
            self.cmd_tx.send(cmd).await.unwrap();
        }

        async fn next(&mut self) -> ScreenEvent {
            tokio::time::timeout(Duration::from_secs(60), self.event_rx.recv())
                .await
                .expect("timed out waiting for event")
                .expect("worker closed the channel")
        }

        async fn shutdown(self) {
            self.cmd_tx.send(Command::Shutdown).await.unwrap();
            self.handle.await.unwrap();
        }
    }

    fn provider() -> Arc<MockProvider> {
        Arc::new(
            MockProviderBuilder::new()
                .position(-23.55052, -46.633308)
                .build(),
        )
    }

    #[tokio::test]
    async fn test_mount_loads_locations_and_theme() {
        let store = LocationStore::open_in_memory().unwrap();
        store.insert(Coordinates::new(1.0, 2.0).unwrap()).unwrap();
        let kv = MemoryKeyValueStore::new().with_item(DARK_MODE_KEY, "true");

        let mut h = Harness::start(store, kv, provider());
        h.send(Command::Mount).await;

        match h.next().await {
            ScreenEvent::LocationsLoaded(records) => assert_eq!(records.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(h.next().await, ScreenEvent::DarkModeLoaded(true));
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_mount_with_unreadable_preference() {
        let store = LocationStore::open_in_memory().unwrap();
        let kv = MemoryKeyValueStore::new().failing_reads();

        let mut h = Harness::start(store, kv, provider());
        h.send(Command::Mount).await;

        assert_eq!(h.next().await, ScreenEvent::LocationsLoaded(vec![]));
        assert!(matches!(h.next().await, ScreenEvent::PreferenceFailed { .. }));
        assert_eq!(h.next().await, ScreenEvent::DarkModeLoaded(false));
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_capture_saves_and_reloads() {
        let store = LocationStore::open_in_memory().unwrap();
        let mut h = Harness::start(store, MemoryKeyValueStore::new(), provider());
        h.send(Command::Capture).await;

        assert_eq!(h.next().await, ScreenEvent::CaptureStarted);
        let records = match h.next().await {
            ScreenEvent::LocationsLoaded(records) => records,
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Lat: -23.55052, Lon: -46.63331");

        match h.next().await {
            ScreenEvent::CaptureFinished(CaptureOutcome::Saved(record)) => {
                assert_eq!(record, records[0]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_permission_denied_leaves_list_unchanged() {
        let store = LocationStore::open_in_memory().unwrap();
        store.insert(Coordinates::new(1.0, 2.0).unwrap()).unwrap();
        let provider = Arc::new(
            MockProviderBuilder::new()
                .permission(PermissionStatus::Denied)
                .build(),
        );

        let mut h = Harness::start(store, MemoryKeyValueStore::new(), Arc::clone(&provider));
        h.send(Command::Capture).await;

        assert_eq!(h.next().await, ScreenEvent::CaptureStarted);
        assert_eq!(
            h.next().await,
            ScreenEvent::CaptureFinished(CaptureOutcome::PermissionDenied)
        );
        assert_eq!(provider.position_requests(), 0);

        h.send(Command::Mount).await;
        match h.next().await {
            ScreenEvent::LocationsLoaded(records) => assert_eq!(records.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let store = LocationStore::open_in_memory().unwrap();
        let provider = provider();
        provider.set_should_fail(true, Some("no satellites")).await;

        let mut h = Harness::start(store, MemoryKeyValueStore::new(), provider);
        h.send(Command::Capture).await;

        assert_eq!(h.next().await, ScreenEvent::CaptureStarted);
        match h.next().await {
            ScreenEvent::CaptureFinished(CaptureOutcome::Failed(msg)) => {
                assert!(msg.contains("no satellites"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        h.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_wins_over_running_capture() {
        let store = LocationStore::open_in_memory().unwrap();
        store.insert(Coordinates::new(1.0, 2.0).unwrap()).unwrap();
        let provider = Arc::new(
            MockProviderBuilder::new()
                .latency(Duration::from_secs(5))
                .build(),
        );

        let mut h = Harness::start(store, MemoryKeyValueStore::new(), provider);
        h.send(Command::Capture).await;
        h.send(Command::Clear).await;

        assert_eq!(h.next().await, ScreenEvent::CaptureStarted);
        assert_eq!(
            h.next().await,
            ScreenEvent::CaptureFinished(CaptureOutcome::Cancelled)
        );
        assert_eq!(h.next().await, ScreenEvent::LocationsLoaded(vec![]));

        // Let the cancelled task report back, then check nothing was stored.
        tokio::time::sleep(Duration::from_secs(10)).await;
        h.send(Command::Mount).await;
        assert_eq!(h.next().await, ScreenEvent::LocationsLoaded(vec![]));
        assert_eq!(h.next().await, ScreenEvent::DarkModeLoaded(false));
        h.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_capture_is_ignored_while_busy() {
        let store = LocationStore::open_in_memory().unwrap();
        let provider = Arc::new(
            MockProviderBuilder::new()
                .latency(Duration::from_secs(1))
                .build(),
        );

        let mut h = Harness::start(store, MemoryKeyValueStore::new(), Arc::clone(&provider));
        h.send(Command::Capture).await;
        h.send(Command::Capture).await;

        assert_eq!(h.next().await, ScreenEvent::CaptureStarted);
        assert!(matches!(h.next().await, ScreenEvent::LocationsLoaded(r) if r.len() == 1));
        assert!(matches!(
            h.next().await,
            ScreenEvent::CaptureFinished(CaptureOutcome::Saved(_))
        ));
        assert_eq!(provider.position_requests(), 1);
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_set_dark_mode_failure() {
        let store = LocationStore::open_in_memory().unwrap();
        let kv = MemoryKeyValueStore::new().failing_writes();

        let mut h = Harness::start(store, kv, provider());
        h.send(Command::SetDarkMode(true)).await;

        assert!(matches!(h.next().await, ScreenEvent::PreferenceFailed { .. }));
        h.shutdown().await;
    }
}
