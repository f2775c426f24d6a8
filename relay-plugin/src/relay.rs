//! CookieRelay - the plugin controller.
//!
//! This module provides [`CookieRelay`], which owns the pasted input and
//! drives one sync attempt per trigger.
//!
//! # Architecture
//!
//! CookieRelay uses the pure state machine and status projection from
//! relay-core and interprets their actions against the host traits.
//!
//! ```text
//! Host callbacks → CookieRelay → Host (config, UI, device link)
//!                      ↓
//!              relay-core (extractor, status, state machine)
//! ```
//!
//! # Example
//!
//! ```ignore
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let relay = CookieRelay::install(MockHost::new(), RelaySettings::default())?;
//!     relay.on_load()?;
//!     relay.on_change("MUSIC_U=abc")?;
//!     relay.trigger_sync().await?;
//!     Ok(())
//! }
//! ```

use relay_core::credential::extract;
use relay_core::state::{Action, Event, FlightGuard, SyncState};
use relay_core::status::{self, Controls, Phase};
use relay_types::PluginConfig;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use crate::error::{PersistError, PluginError, SyncError};
use crate::host::{CallbackArgs, Host, NativeCallback};
use crate::settings::{RelaySettings, TriggerPolicy};

/// The plugin controller.
///
/// Cheap to clone; clones share the same input, display state and host.
pub struct CookieRelay<H: Host> {
    inner: Arc<Inner<H>>,
}

struct Inner<H> {
    host: H,
    settings: RelaySettings,
    controls: Controls,
    shared: Mutex<Shared>,
}

/// Mutable state shared by every attempt and the input handler.
#[derive(Debug, Default)]
struct Shared {
    raw_input: String,
    phase: Phase,
    /// Bumped on every render; lets a late reset timer detect it was overtaken.
    render_epoch: u64,
    guard: FlightGuard,
}

/// Slot the registered callbacks use to reach the controller once it exists.
type RelaySlot<H> = Arc<OnceLock<Weak<Inner<H>>>>;

impl<H: Host> Clone for CookieRelay<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: Host> CookieRelay<H> {
    /// Install the plugin into a host.
    ///
    /// Registers the input and sync callbacks. Nothing is rendered until
    /// [`on_load`](Self::on_load) runs.
    pub fn install(host: H, settings: RelaySettings) -> Result<Self, PluginError> {
        settings.validate()?;

        let slot: RelaySlot<H> = Arc::new(OnceLock::new());
        let controls = Controls {
            input: host.register_callback(input_callback(Arc::clone(&slot)))?,
            sync: host.register_callback(sync_callback(Arc::clone(&slot)))?,
        };

        let inner = Arc::new(Inner {
            host,
            settings,
            controls,
            shared: Mutex::new(Shared::default()),
        });
        // Fresh slot, cannot already be set
        let _ = slot.set(Arc::downgrade(&inner));

        tracing::debug!(
            "Installed (input {}, sync {})",
            controls.input,
            controls.sync
        );
        Ok(Self { inner })
    }

    /// Lifecycle hook: restore the persisted input and render the default view.
    ///
    /// A failed or malformed config read is logged and returned, and the view
    /// is rendered with an empty input anyway.
    pub fn on_load(&self) -> Result<(), PersistError> {
        let loaded = self.load_config();
        let result = match loaded {
            Ok(config) => {
                let restored = config.saved_cookie.unwrap_or_default();
                tracing::info!(
                    "Loaded plugin config ({} chars of saved input)",
                    restored.len()
                );
                self.lock().raw_input = restored;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load plugin config: {}", e);
                Err(e)
            }
        };

        self.render(Phase::Default, None);
        result
    }

    /// Input change handler.
    ///
    /// Updates the in-memory input, then persists it best-effort. A
    /// persistence failure is logged and returned; the in-memory value is kept
    /// either way, so callers may ignore the result.
    pub fn on_change(&self, value: impl Into<String>) -> Result<(), PersistError> {
        let value = value.into();
        self.lock().raw_input = value.clone();

        self.persist(value).map_err(|e| {
            tracing::warn!("Failed to persist input: {}", e);
            e
        })
    }

    /// Run one sync attempt against the current input.
    ///
    /// Every outcome is rendered before this returns. Under
    /// [`TriggerPolicy::SingleFlight`] a trigger while another attempt is in
    /// flight returns [`SyncError::Busy`] without rendering.
    ///
    /// The single-flight token is returned even if this future is dropped
    /// mid-attempt, so a cancelled attempt never blocks later triggers.
    pub async fn trigger_sync(&self) -> Result<(), SyncError> {
        let _token = if self.single_flight() {
            match FlightToken::acquire(self) {
                Some(token) => Some(token),
                None => {
                    tracing::debug!("Sync already in flight, trigger ignored");
                    return Err(SyncError::Busy);
                }
            }
        } else {
            None
        };

        let raw = self.raw_input();
        self.run_attempt(raw).await
    }

    /// Current in-memory input.
    pub fn raw_input(&self) -> String {
        self.lock().raw_input.clone()
    }

    /// Phase of the most recent render.
    pub fn current_phase(&self) -> Phase {
        self.lock().phase
    }

    /// Callback ids of the input field and sync button.
    pub fn controls(&self) -> Controls {
        self.inner.controls
    }

    /// Active settings.
    pub fn settings(&self) -> &RelaySettings {
        &self.inner.settings
    }

    /// Drive a fresh state machine to a settled state.
    async fn run_attempt(&self, raw: String) -> Result<(), SyncError> {
        let mut state = SyncState::new();
        let mut pending = VecDeque::from([Event::SyncTriggered { raw }]);
        let mut last_epoch = 0;
        let mut send_detail = None;

        while let Some(event) = pending.pop_front() {
            let (next, actions) = state.on_event(event);
            state = next;

            for action in actions {
                match action {
                    Action::Render { phase, message } => {
                        last_epoch = self.render(phase, message);
                    }
                    Action::Extract { raw } => {
                        pending.push_back(Event::Extracted {
                            credential: extract(&raw),
                        });
                    }
                    Action::Send { credential } => {
                        let target = &self.inner.settings.target_app;
                        match self
                            .inner
                            .host
                            .send_message(target, credential.as_str())
                            .await
                        {
                            Ok(()) => {
                                tracing::info!("Credential delivered to {}", target);
                                pending.push_back(Event::SendResolved);
                            }
                            Err(e) => {
                                tracing::warn!("Failed to send credential to {}: {}", target, e);
                                send_detail = Some(e.to_string());
                                pending.push_back(Event::SendRejected);
                            }
                        }
                    }
                    Action::StartResetTimer => {
                        self.spawn_reset_timer(state.clone(), last_epoch);
                    }
                }
            }
        }

        match state.failure() {
            None => Ok(()),
            Some(failure) => Err(SyncError::from_failure(failure, send_detail)),
        }
    }

    /// Fire-and-forget timer that returns a success to the default view.
    ///
    /// Not cancellable. Under [`TriggerPolicy::Unguarded`] it renders even if
    /// something else rendered in the meantime.
    fn spawn_reset_timer(&self, state: SyncState, success_epoch: u64) {
        let relay = self.clone();
        let delay = self.inner.settings.reset_delay();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let (_, actions) = state.on_event(Event::ResetTimerFired);
            for action in actions {
                if let Action::Render { phase, message } = action {
                    relay.render_reset(phase, message, success_epoch);
                }
            }
        });
    }

    fn render(&self, phase: Phase, message: Option<&str>) -> u64 {
        let mut shared = self.lock();
        let epoch = advance(&mut shared, phase);
        self.push_ui(&shared, phase, message);
        epoch
    }

    fn render_reset(&self, phase: Phase, message: Option<&str>, success_epoch: u64) {
        let mut shared = self.lock();
        if self.single_flight() && shared.render_epoch != success_epoch {
            tracing::debug!("Reset timer overtaken by a newer render, skipping");
            return;
        }
        advance(&mut shared, phase);
        self.push_ui(&shared, phase, message);
    }

    /// Push the full node list to the host.
    ///
    /// Called with the shared state locked so the host sees renders in epoch
    /// order. The sink must not call back into the plugin synchronously.
    fn push_ui(&self, shared: &Shared, phase: Phase, message: Option<&str>) {
        tracing::debug!("Rendering {} status", phase);
        let nodes = status::render(phase, message, &shared.raw_input, &self.inner.controls);
        if let Err(e) = self.inner.host.update_settings_ui(nodes) {
            tracing::warn!("Failed to update settings UI: {}", e);
        }
    }

    fn load_config(&self) -> Result<PluginConfig, PersistError> {
        let map = self.inner.host.read_config()?;
        Ok(PluginConfig::from_map(&map, &self.inner.settings.config_key)?)
    }

    fn persist(&self, value: String) -> Result<(), PersistError> {
        let mut map = self.inner.host.read_config()?;
        PluginConfig::with_saved_cookie(value).merge_into(&mut map, &self.inner.settings.config_key);
        self.inner.host.write_config(map)?;
        Ok(())
    }

    fn single_flight(&self) -> bool {
        self.inner.settings.trigger_policy == TriggerPolicy::SingleFlight
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn from_slot(slot: &RelaySlot<H>) -> Option<Self> {
        slot.get()
            .and_then(Weak::upgrade)
            .map(|inner| Self { inner })
    }
}

/// Holds the single-flight token for one attempt; returns it on drop.
struct FlightToken<'a, H: Host> {
    relay: &'a CookieRelay<H>,
}

impl<'a, H: Host> FlightToken<'a, H> {
    fn acquire(relay: &'a CookieRelay<H>) -> Option<Self> {
        relay
            .lock()
            .guard
            .try_begin()
            .then_some(Self { relay })
    }
}

impl<H: Host> Drop for FlightToken<'_, H> {
    fn drop(&mut self) {
        self.relay.lock().guard.finish();
    }
}

fn advance(shared: &mut Shared, phase: Phase) -> u64 {
    shared.render_epoch += 1;
    shared.phase = phase;
    shared.render_epoch
}

fn input_callback<H: Host>(slot: RelaySlot<H>) -> NativeCallback {
    Arc::new(move |value: CallbackArgs| {
        let Some(relay) = CookieRelay::from_slot(&slot) else {
            tracing::debug!("Input changed after plugin was dropped");
            return;
        };
        // Persistence is best effort and already logged
        let _ = relay.on_change(value.unwrap_or_default());
    })
}

fn sync_callback<H: Host>(slot: RelaySlot<H>) -> NativeCallback {
    Arc::new(move |_: CallbackArgs| {
        let Some(relay) = CookieRelay::from_slot(&slot) else {
            tracing::debug!("Sync triggered after plugin was dropped");
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = relay.trigger_sync().await {
                        tracing::debug!("Sync attempt ended: {}", e);
                    }
                });
            }
            Err(_) => tracing::error!("Sync triggered outside a tokio runtime, ignoring"),
        }
    })
}
