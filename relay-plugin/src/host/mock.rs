//! Mock host for testing.
//!
//! Records UI updates and sent messages, scripts config and device failures,
//! and lets tests invoke registered callbacks as the host would.

use super::{
    CallbackArgs, CallbackRegistry, ConfigStore, DeviceLink, HostError, NativeCallback, UiSink,
};
use async_trait::async_trait;
use relay_types::{CallbackId, ConfigMap, UiNode};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// A message delivered through the mock device link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Package name of the receiving app.
    pub target_app: String,
    /// Delivered payload.
    pub payload: String,
}

/// Mock host for testing.
///
/// Clones share state, so a test can keep one handle while the plugin owns
/// another.
#[derive(Default)]
pub struct MockHost {
    inner: Arc<Mutex<MockHostInner>>,
}

#[derive(Default)]
struct MockHostInner {
    config: ConfigMap,
    ui_updates: Vec<Vec<UiNode>>,
    callbacks: Vec<NativeCallback>,
    sent_messages: Vec<SentMessage>,
    deferred_sends: VecDeque<oneshot::Receiver<Result<(), String>>>,
    fail_next_read: Option<String>,
    fail_next_write: Option<String>,
    fail_next_ui: Option<String>,
    fail_next_register: Option<String>,
    fail_next_send: Option<String>,
}

impl MockHost {
    /// Create a new mock host with an empty config object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock host whose config store already holds `config`.
    pub fn with_config(config: ConfigMap) -> Self {
        let host = Self::new();
        host.lock().config = config;
        host
    }

    /// Current contents of the config store.
    pub fn config(&self) -> ConfigMap {
        self.lock().config.clone()
    }

    /// Every UI update, oldest first.
    pub fn ui_updates(&self) -> Vec<Vec<UiNode>> {
        self.lock().ui_updates.clone()
    }

    /// The most recent UI update.
    pub fn last_ui(&self) -> Option<Vec<UiNode>> {
        self.lock().ui_updates.last().cloned()
    }

    /// Every message sent through the device link.
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.lock().sent_messages.clone()
    }

    /// Number of registered callbacks.
    pub fn callback_count(&self) -> usize {
        self.lock().callbacks.len()
    }

    /// Cause the next `read_config()` to fail with the given error.
    pub fn fail_next_read(&self, error: &str) {
        self.lock().fail_next_read = Some(error.to_string());
    }

    /// Cause the next `write_config()` to fail with the given error.
    pub fn fail_next_write(&self, error: &str) {
        self.lock().fail_next_write = Some(error.to_string());
    }

    /// Cause the next `update_settings_ui()` to fail with the given error.
    pub fn fail_next_ui(&self, error: &str) {
        self.lock().fail_next_ui = Some(error.to_string());
    }

    /// Cause the next `register_callback()` to fail with the given error.
    pub fn fail_next_register(&self, error: &str) {
        self.lock().fail_next_register = Some(error.to_string());
    }

    /// Cause the next `send_message()` to fail with the given error.
    pub fn fail_next_send(&self, error: &str) {
        self.lock().fail_next_send = Some(error.to_string());
    }

    /// Hold the next `send_message()` until the returned sender completes it.
    ///
    /// Sending `Err(reason)` rejects the message; dropping the sender rejects
    /// it as unreachable.
    pub fn defer_next_send(&self) -> oneshot::Sender<Result<(), String>> {
        let (tx, rx) = oneshot::channel();
        self.lock().deferred_sends.push_back(rx);
        tx
    }

    /// Invoke a registered callback as the host would on user interaction.
    ///
    /// Returns `false` if no callback has that id.
    pub fn invoke(&self, id: CallbackId, args: CallbackArgs) -> bool {
        let callback = {
            let inner = self.lock();
            usize::try_from(id.value())
                .ok()
                .and_then(|raw| raw.checked_sub(1))
                .and_then(|index| inner.callbacks.get(index).cloned())
        };

        match callback {
            Some(callback) => {
                callback(args);
                true
            }
            None => false,
        }
    }

    /// Clear recorded UI updates and sent messages, keeping config and callbacks.
    pub fn clear_history(&self) {
        let mut inner = self.lock();
        inner.ui_updates.clear();
        inner.sent_messages.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockHostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for MockHost {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for MockHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MockHost")
            .field("config_keys", &inner.config.keys().collect::<Vec<_>>())
            .field("ui_updates", &inner.ui_updates.len())
            .field("callbacks", &inner.callbacks.len())
            .field("sent_messages", &inner.sent_messages.len())
            .finish()
    }
}

impl ConfigStore for MockHost {
    fn read_config(&self) -> Result<ConfigMap, HostError> {
        let mut inner = self.lock();

        // Check for forced failure
        if let Some(error) = inner.fail_next_read.take() {
            return Err(HostError::ConfigRead(error));
        }

        Ok(inner.config.clone())
    }

    fn write_config(&self, config: ConfigMap) -> Result<(), HostError> {
        let mut inner = self.lock();

        if let Some(error) = inner.fail_next_write.take() {
            return Err(HostError::ConfigWrite(error));
        }

        inner.config = config;
        Ok(())
    }
}

impl UiSink for MockHost {
    fn update_settings_ui(&self, nodes: Vec<UiNode>) -> Result<(), HostError> {
        let mut inner = self.lock();

        if let Some(error) = inner.fail_next_ui.take() {
            return Err(HostError::UiUpdate(error));
        }

        inner.ui_updates.push(nodes);
        Ok(())
    }
}

impl CallbackRegistry for MockHost {
    fn register_callback(&self, callback: NativeCallback) -> Result<CallbackId, HostError> {
        let mut inner = self.lock();

        if let Some(error) = inner.fail_next_register.take() {
            return Err(HostError::CallbackRegistration(error));
        }

        inner.callbacks.push(callback);
        Ok(CallbackId::new(inner.callbacks.len() as u64))
    }
}

#[async_trait]
impl DeviceLink for MockHost {
    async fn send_message(&self, target_app: &str, payload: &str) -> Result<(), HostError> {
        let deferred = {
            let mut inner = self.lock();

            if let Some(error) = inner.fail_next_send.take() {
                return Err(HostError::SendFailed(error));
            }

            inner.sent_messages.push(SentMessage {
                target_app: target_app.to_string(),
                payload: payload.to_string(),
            });
            inner.deferred_sends.pop_front()
        };

        match deferred {
            None => Ok(()),
            Some(outcome) => match outcome.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(error)) => Err(HostError::SendFailed(error)),
                Err(_) => Err(HostError::DeviceUnreachable(
                    "deferred send was dropped".to_string(),
                )),
            },
        }
    }
}
