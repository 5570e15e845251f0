//! Notification message manager
//!
//! Collects per-device warnings and the sticky modifiers status, merges them
//! into one notification body and writes it out whenever it changes. Every
//! state change goes through a single [`Dispatcher`], so the manager can be
//! shared freely between threads.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use tracing::{debug, warn};

use crate::domain::device::DeviceId;
use crate::domain::message::{MessageBoard, NotificationDocument};
use crate::domain::modifier::STICKY_SCAN_ORDER;

use super::dispatcher::{Dispatcher, DispatcherError};
use super::ports::{DeliveryClient, MessageSink, ModifierFlagSource};

/// Permission bits for directories created around the message file
pub const MESSAGE_DIR_MODE: u32 = 0o755;
/// Permission bits for the message file
pub const MESSAGE_FILE_MODE: u32 = 0o644;

const DISPATCHER_NAME: &str = "notification-message";

/// Build the sticky modifiers block from the current modifier state.
///
/// One `sticky <name>\n` line per active flag, in [`STICKY_SCAN_ORDER`].
/// Flags without a display name are skipped.
pub fn build_sticky_modifiers_message<M>(source: &M) -> String
where
    M: ModifierFlagSource + ?Sized,
{
    let mut message = String::new();
    for flag in STICKY_SCAN_ORDER {
        if source.is_sticky_active(flag) {
            if let Some(name) = source.display_name(flag) {
                let _ = writeln!(message, "sticky {}", name);
            }
        }
    }
    message
}

/// State owned by the dispatcher worker
struct ManagerState<K: MessageSink> {
    board: MessageBoard,
    /// Last body handed to the sink. None until the first write.
    previous_message: Option<String>,
    sink: K,
    message_file: PathBuf,
}

impl<K: MessageSink> ManagerState<K> {
    fn save_message(&self, message: &str) {
        let document = NotificationDocument::new(message);
        match self.sink.save(
            &document,
            &self.message_file,
            MESSAGE_DIR_MODE,
            MESSAGE_FILE_MODE,
        ) {
            Ok(()) => debug!(
                path = %self.message_file.display(),
                bytes = message.len(),
                "notification message saved"
            ),
            Err(e) => warn!(
                path = %self.message_file.display(),
                error = %e,
                "failed to save notification message"
            ),
        }
    }

    fn save_message_if_needed(&mut self) {
        let message = self.board.make_message();
        if self.previous_message.as_deref() != Some(message.as_str()) {
            self.save_message(&message);
            self.previous_message = Some(message);
        }
    }
}

/// Aggregates notification messages and persists the merged body.
///
/// All `async_*` methods return immediately; their effects are applied on
/// the dispatcher in call order. Dropping the manager waits for queued
/// updates to be written.
pub struct NotificationMessageManager<K: MessageSink + 'static> {
    dispatcher: Dispatcher<ManagerState<K>>,
    message_file: PathBuf,
    delivery_client: Option<Weak<dyn DeliveryClient>>,
}

impl<K: MessageSink + 'static> NotificationMessageManager<K> {
    /// Create a manager writing to `message_file`.
    ///
    /// An empty message is queued for writing straight away, so the file
    /// exists (and holds no stale text from an earlier run) even if no
    /// update ever arrives.
    pub fn new(sink: K, message_file: impl Into<PathBuf>) -> Result<Self, DispatcherError> {
        let message_file = message_file.into();
        let state = ManagerState {
            board: MessageBoard::new(),
            previous_message: None,
            sink,
            message_file: message_file.clone(),
        };
        let dispatcher = Dispatcher::spawn(DISPATCHER_NAME, state)?;

        dispatcher.enqueue(|state| {
            state.save_message("");
            state.previous_message = Some(String::new());
        });

        Ok(Self {
            dispatcher,
            message_file,
            delivery_client: None,
        })
    }

    /// Attach a delivery client. Only a weak handle is kept.
    pub fn with_delivery_client(mut self, client: &Arc<dyn DeliveryClient>) -> Self {
        self.delivery_client = Some(Arc::downgrade(client));
        self
    }

    /// The delivery client, if one was attached and is still alive
    pub fn delivery_client(&self) -> Option<Arc<dyn DeliveryClient>> {
        self.delivery_client.as_ref().and_then(Weak::upgrade)
    }

    /// Path of the notification message file
    pub fn message_file(&self) -> &Path {
        &self.message_file
    }

    /// Set (or replace) the warning shown for a device.
    ///
    /// An empty message counts as no warning.
    pub fn async_set_device_message(&self, id: DeviceId, message: impl Into<String>) {
        let message = message.into();
        self.dispatcher.enqueue(move |state| {
            state.board.set_device_message(id, message);
            state.save_message_if_needed();
        });
    }

    /// Forget a device. Unknown devices are ignored.
    pub fn async_erase_device(&self, id: DeviceId) {
        self.dispatcher.enqueue(move |state| {
            state.board.erase_device(id);
            state.save_message_if_needed();
        });
    }

    /// Refresh the sticky modifiers block from `source`.
    ///
    /// The source is read on the calling thread, at the time of the call;
    /// only the resulting text is handed to the dispatcher.
    pub fn async_update_sticky_modifiers_message<M>(&self, source: &M)
    where
        M: ModifierFlagSource + ?Sized,
    {
        let message = build_sticky_modifiers_message(source);
        self.dispatcher.enqueue(move |state| {
            state.board.set_sticky_modifiers_message(message);
            state.save_message_if_needed();
        });
    }

    /// Remove the sticky modifiers block
    pub fn async_clear_sticky_modifiers_message(&self) {
        self.dispatcher.enqueue(|state| {
            state.board.set_sticky_modifiers_message(String::new());
            state.save_message_if_needed();
        });
    }

    /// Resolve once every update queued before this call has been applied
    pub async fn wait_idle(&self) {
        let _ = self.dispatcher.query(|_| ()).await;
    }

    /// The last body written, after all previously queued updates.
    ///
    /// None if nothing has been written or the manager has shut down.
    pub async fn current_message(&self) -> Option<String> {
        self.dispatcher
            .query(|state| state.previous_message.clone())
            .await
            .ok()
            .flatten()
    }

    /// Whether updates are still accepted
    pub fn is_running(&self) -> bool {
        self.dispatcher.is_running()
    }

    /// Apply all queued updates and stop the dispatcher.
    ///
    /// Later updates are dropped with a warning. Also run on drop.
    pub fn shutdown(&mut self) {
        self.dispatcher.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SinkError;
    use crate::domain::modifier::ModifierFlag;
    use std::collections::HashSet;
    use std::sync::{Barrier, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SavedCall {
        body: String,
        path: PathBuf,
        dir_mode: u32,
        file_mode: u32,
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        calls: Arc<Mutex<Vec<SavedCall>>>,
    }

    impl RecordingSink {
        fn bodies(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.body.clone())
                .collect()
        }
    }

    impl MessageSink for RecordingSink {
        fn save(
            &self,
            document: &NotificationDocument,
            path: &Path,
            dir_mode: u32,
            file_mode: u32,
        ) -> Result<(), SinkError> {
            self.calls.lock().unwrap().push(SavedCall {
                body: document.body.clone(),
                path: path.to_path_buf(),
                dir_mode,
                file_mode,
            });
            Ok(())
        }
    }

    struct FailingSink;

    impl MessageSink for FailingSink {
        fn save(
            &self,
            _document: &NotificationDocument,
            path: &Path,
            _dir_mode: u32,
            _file_mode: u32,
        ) -> Result<(), SinkError> {
            Err(SinkError::WriteFailed {
                path: path.display().to_string(),
                message: "disk full".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MockModifiers {
        active: HashSet<ModifierFlag>,
        unnamed: HashSet<ModifierFlag>,
    }

    impl MockModifiers {
        fn with(flags: &[ModifierFlag]) -> Self {
            Self {
                active: flags.iter().copied().collect(),
                unnamed: HashSet::new(),
            }
        }
    }

    impl ModifierFlagSource for MockModifiers {
        fn is_sticky_active(&self, flag: ModifierFlag) -> bool {
            self.active.contains(&flag)
        }

        fn display_name(&self, flag: ModifierFlag) -> Option<String> {
            if self.unnamed.contains(&flag) {
                None
            } else {
                Some(flag.name().to_string())
            }
        }
    }

    struct MockClient;

    impl DeliveryClient for MockClient {
        fn is_connected(&self) -> bool {
            true
        }
    }

    fn manager() -> (NotificationMessageManager<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        let manager =
            NotificationMessageManager::new(sink.clone(), "/tmp/notemux-test/message.json")
                .unwrap();
        (manager, sink)
    }

    fn id(raw: u64) -> DeviceId {
        DeviceId::new(raw)
    }

    #[test]
    fn sticky_message_follows_scan_order() {
        let source = MockModifiers::with(&[
            ModifierFlag::Fn,
            ModifierFlag::RightShift,
            ModifierFlag::LeftControl,
        ]);
        assert_eq!(
            build_sticky_modifiers_message(&source),
            "sticky left_control\nsticky right_shift\nsticky fn\n"
        );
    }

    #[test]
    fn sticky_message_skips_unnamed_flags() {
        let mut source = MockModifiers::with(&[ModifierFlag::LeftShift, ModifierFlag::Fn]);
        source.unnamed.insert(ModifierFlag::LeftShift);
        assert_eq!(build_sticky_modifiers_message(&source), "sticky fn\n");
    }

    #[test]
    fn sticky_message_ignores_caps_lock() {
        let source = MockModifiers::with(&[ModifierFlag::CapsLock]);
        assert_eq!(build_sticky_modifiers_message(&source), "");
    }

    #[tokio::test]
    async fn construction_writes_empty_body() {
        let (manager, sink) = manager();
        manager.wait_idle().await;

        let calls = sink.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body, "");
        assert_eq!(calls[0].path, PathBuf::from("/tmp/notemux-test/message.json"));
        assert_eq!(calls[0].dir_mode, 0o755);
        assert_eq!(calls[0].file_mode, 0o644);
    }

    #[tokio::test]
    async fn unchanged_message_is_not_rewritten() {
        let (manager, sink) = manager();

        // Empty message for a new device leaves the body empty
        manager.async_set_device_message(id(1), "");
        manager.async_set_device_message(id(2), "A");
        manager.async_set_device_message(id(2), "A");
        manager.wait_idle().await;

        assert_eq!(sink.bodies(), vec!["", "A"]);
    }

    #[tokio::test]
    async fn device_message_precedes_sticky_block() {
        let (manager, sink) = manager();

        manager.async_set_device_message(id(1), "A");
        manager.async_set_device_message(id(2), "");
        manager.async_update_sticky_modifiers_message(&MockModifiers::with(&[ModifierFlag::Fn]));
        manager.wait_idle().await;

        assert_eq!(sink.bodies().last().unwrap(), "A\nsticky fn\n");
        assert_eq!(
            manager.current_message().await.as_deref(),
            Some("A\nsticky fn\n")
        );
    }

    #[tokio::test]
    async fn erase_falls_back_to_remaining_device() {
        let (manager, sink) = manager();

        manager.async_set_device_message(id(1), "A");
        manager.async_set_device_message(id(2), "B");
        manager.async_erase_device(id(1));
        manager.wait_idle().await;

        assert_eq!(sink.bodies(), vec!["", "A", "B"]);
    }

    #[tokio::test]
    async fn erase_unknown_device_does_not_write() {
        let (manager, sink) = manager();

        manager.async_erase_device(id(42));
        manager.wait_idle().await;

        assert_eq!(sink.bodies(), vec![""]);
    }

    #[tokio::test]
    async fn sticky_only_message() {
        let (manager, sink) = manager();

        manager.async_update_sticky_modifiers_message(&MockModifiers::with(&[
            ModifierFlag::LeftShift,
        ]));
        manager.wait_idle().await;

        assert_eq!(sink.bodies(), vec!["", "sticky left_shift\n"]);
    }

    #[tokio::test]
    async fn clear_twice_writes_once() {
        let (manager, sink) = manager();

        manager.async_update_sticky_modifiers_message(&MockModifiers::with(&[ModifierFlag::Fn]));
        manager.async_clear_sticky_modifiers_message();
        manager.async_clear_sticky_modifiers_message();
        manager.wait_idle().await;

        assert_eq!(sink.bodies(), vec!["", "sticky fn\n", ""]);
    }

    #[tokio::test]
    async fn sticky_source_is_read_at_call_time() {
        let (manager, sink) = manager();

        let mut source = MockModifiers::with(&[ModifierFlag::LeftCommand]);
        manager.async_update_sticky_modifiers_message(&source);
        // Later changes to the source must not leak into the queued update
        source.active.insert(ModifierFlag::RightCommand);
        manager.wait_idle().await;

        assert_eq!(sink.bodies().last().unwrap(), "sticky left_command\n");
    }

    #[test]
    fn updates_from_many_threads_keep_submission_order() {
        let sink = RecordingSink::default();
        let manager = Arc::new(
            NotificationMessageManager::new(sink.clone(), "/tmp/notemux-test/message.json")
                .unwrap(),
        );

        enum Step {
            Set(&'static str),
            Erase,
        }

        // Each step is submitted from its own thread, strictly one after the other.
        for step in [Step::Set("X"), Step::Erase, Step::Set("Y")] {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || match step {
                Step::Set(message) => manager.async_set_device_message(id(7), message),
                Step::Erase => manager.async_erase_device(id(7)),
            })
            .join()
            .unwrap();
        }

        let mut manager = Arc::try_unwrap(manager).ok().unwrap();
        manager.shutdown();

        assert_eq!(sink.bodies(), vec!["", "X", "", "Y"]);
    }

    #[test]
    fn contending_threads_keep_their_own_order() {
        const THREADS: u64 = 6;
        const STEPS: usize = 40;

        let sink = RecordingSink::default();
        let manager = Arc::new(
            NotificationMessageManager::new(sink.clone(), "/tmp/notemux-test/message.json")
                .unwrap(),
        );
        let barrier = Arc::new(Barrier::new(THREADS as usize));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let manager = Arc::clone(&manager);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    for step in 0..STEPS {
                        manager.async_set_device_message(id(t), format!("d{}-{}", t, step));
                    }
                    manager.async_erase_device(id(t));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut manager = Arc::try_unwrap(manager).ok().unwrap();
        manager.shutdown();
        let bodies = sink.bodies();

        // Device 0 always wins the merge, so each of its updates is written
        let lowest: Vec<String> = bodies
            .iter()
            .filter(|b| b.starts_with("d0-"))
            .cloned()
            .collect();
        let expected: Vec<String> = (0..STEPS).map(|step| format!("d0-{}", step)).collect();
        assert_eq!(lowest, expected);

        // Every other device's writes appear in the order they were submitted
        for t in 1..THREADS {
            let prefix = format!("d{}-", t);
            let steps: Vec<usize> = bodies
                .iter()
                .filter_map(|b| b.strip_prefix(prefix.as_str()))
                .map(|step| step.parse().unwrap())
                .collect();
            assert!(steps.windows(2).all(|w| w[0] < w[1]), "device {}: {:?}", t, steps);
        }

        assert_eq!(bodies.last().unwrap(), "");
    }

    #[test]
    fn concurrent_updates_never_interleave() {
        let sink = RecordingSink::default();
        let manager = Arc::new(
            NotificationMessageManager::new(sink.clone(), "/tmp/notemux-test/message.json")
                .unwrap(),
        );

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        manager.async_set_device_message(id(t), format!("t{}-{}", t, i));
                    }
                    manager.async_erase_device(id(t));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut manager = Arc::try_unwrap(manager).ok().unwrap();
        manager.shutdown();

        let bodies = sink.bodies();
        assert_eq!(bodies.last().unwrap(), "");
        // No two consecutive writes carry the same body
        assert!(bodies.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn drop_flushes_pending_updates() {
        let sink = RecordingSink::default();
        {
            let manager =
                NotificationMessageManager::new(sink.clone(), "/tmp/notemux-test/message.json")
                    .unwrap();
            manager.async_set_device_message(id(1), "pending");
        }
        assert_eq!(sink.bodies(), vec!["", "pending"]);
    }

    #[test]
    fn updates_after_shutdown_are_dropped() {
        let (mut manager, sink) = manager();
        manager.shutdown();
        assert!(!manager.is_running());

        manager.async_set_device_message(id(1), "late");
        manager.async_clear_sticky_modifiers_message();
        manager.shutdown();

        assert_eq!(sink.bodies(), vec![""]);
    }

    #[tokio::test]
    async fn sink_failure_does_not_stop_updates() {
        let manager =
            NotificationMessageManager::new(FailingSink, "/tmp/notemux-test/message.json")
                .unwrap();

        manager.async_set_device_message(id(1), "A");
        manager.async_set_device_message(id(1), "A");
        manager.wait_idle().await;

        // The failed write still counts as the latest body
        assert_eq!(manager.current_message().await.as_deref(), Some("A"));
        assert!(manager.is_running());
    }

    #[test]
    fn delivery_client_is_weak() {
        let client: Arc<dyn DeliveryClient> = Arc::new(MockClient);
        let (manager, _sink) = manager();
        let manager = manager.with_delivery_client(&client);

        assert!(manager.delivery_client().is_some_and(|c| c.is_connected()));

        drop(client);
        assert!(manager.delivery_client().is_none());
    }

    #[test]
    fn no_delivery_client_by_default() {
        let (manager, _sink) = manager();
        assert!(manager.delivery_client().is_none());
        assert_eq!(
            manager.message_file(),
            Path::new("/tmp/notemux-test/message.json")
        );
    }
}
