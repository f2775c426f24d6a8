//! Sync state machine for cookie-relay.
//!
//! This module provides a pure, side-effect-free state machine for one sync
//! attempt. The state machine takes events as input and produces a new state
//! plus a list of actions to execute.
//!
//! The actual work (extracting, rendering, sending, timers) is performed by
//! relay-plugin, not by this module.

use std::time::Duration;

use crate::credential::Credential;
use crate::status::Phase;

/// Delay before a successful sync falls back to the default status.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Processing message while the input is being normalized.
pub const EXTRACTING_MESSAGE: &str = "extracting credential";
/// Processing message while waiting for the device link.
pub const SENDING_MESSAGE: &str = "sending to device";

/// Why a sync attempt ended in the error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Nothing was pasted.
    EmptyInput,
    /// The input holds no usable credential.
    InvalidCredential,
    /// The device link rejected the message.
    SendFailed,
}

impl Failure {
    /// Message shown to the user (after the `error: ` prefix).
    pub fn message(self) -> &'static str {
        match self {
            Failure::EmptyInput => "input is empty",
            Failure::InvalidCredential => "invalid credential format",
            Failure::SendFailed => "send failed, check device connection",
        }
    }
}

/// Sync state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Input accepted, waiting for extraction.
    Extracting,
    /// Credential handed to the device link, waiting for the outcome.
    Sending,
    /// Delivered; the reset timer is pending.
    Success,
    /// Attempt failed. Stays here until the user triggers again.
    Error {
        /// What went wrong.
        failure: Failure,
    },
}

impl SyncState {
    /// Create a new state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (relay-plugin)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        match (self, event) {
            // A trigger restarts from Idle semantics in every settled state
            (Self::Idle | Self::Success | Self::Error { .. }, Event::SyncTriggered { raw }) => {
                if raw.is_empty() {
                    fail(Failure::EmptyInput)
                } else {
                    (
                        Self::Extracting,
                        vec![
                            Action::Render {
                                phase: Phase::Processing,
                                message: Some(EXTRACTING_MESSAGE),
                            },
                            Action::Extract { raw },
                        ],
                    )
                }
            }

            // From Extracting
            (Self::Extracting, Event::Extracted { credential: None }) => {
                fail(Failure::InvalidCredential)
            }
            (
                Self::Extracting,
                Event::Extracted {
                    credential: Some(credential),
                },
            ) => (
                Self::Sending,
                vec![
                    Action::Render {
                        phase: Phase::Processing,
                        message: Some(SENDING_MESSAGE),
                    },
                    Action::Send { credential },
                ],
            ),

            // From Sending
            (Self::Sending, Event::SendResolved) => (
                Self::Success,
                vec![
                    Action::Render {
                        phase: Phase::Success,
                        message: None,
                    },
                    Action::StartResetTimer,
                ],
            ),
            (Self::Sending, Event::SendRejected) => fail(Failure::SendFailed),

            // From Success
            (Self::Success, Event::ResetTimerFired) => (
                Self::Idle,
                vec![Action::Render {
                    phase: Phase::Default,
                    message: None,
                }],
            ),

            // Invalid transitions - stay in current state
            (state, _) => (state, vec![]),
        }
    }

    /// The phase displayed while in this state.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Default,
            Self::Extracting | Self::Sending => Phase::Processing,
            Self::Success => Phase::Success,
            Self::Error { .. } => Phase::Error,
        }
    }

    /// Check if the attempt is still waiting on extraction or the device.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Extracting | Self::Sending)
    }

    /// The failure, if the attempt ended in error.
    pub fn failure(&self) -> Option<Failure> {
        match self {
            Self::Error { failure } => Some(*failure),
            _ => None,
        }
    }
}

fn fail(failure: Failure) -> (SyncState, Vec<Action>) {
    (
        SyncState::Error { failure },
        vec![Action::Render {
            phase: Phase::Error,
            message: Some(failure.message()),
        }],
    )
}

/// Events that can occur during a sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User pressed the sync button.
    SyncTriggered {
        /// Current input at the time of the trigger.
        raw: String,
    },
    /// Extraction finished.
    Extracted {
        /// Normalized credential, if the input held one.
        credential: Option<Credential>,
    },
    /// The device link accepted the message.
    SendResolved,
    /// The device link rejected the message.
    SendRejected,
    /// The post-success reset timer fired.
    ResetTimerFired,
}

/// Actions to be executed by relay-plugin.
///
/// These are instructions, not side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push a full UI update for this phase.
    Render {
        /// Phase to display.
        phase: Phase,
        /// Status message for Processing/Error.
        message: Option<&'static str>,
    },
    /// Normalize the input.
    Extract {
        /// Input captured at trigger time.
        raw: String,
    },
    /// Forward the credential to the companion app.
    Send {
        /// The fragment to forward.
        credential: Credential,
    },
    /// Start the post-success reset timer.
    StartResetTimer,
}

/// Single in-flight guard for the sync trigger.
///
/// `try_begin` hands out the token; a second caller is refused until
/// `finish` returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightGuard {
    /// No attempt running.
    #[default]
    Idle,
    /// An attempt holds the token.
    InFlight,
}

impl FlightGuard {
    /// Take the token. Returns `false` if an attempt already holds it.
    pub fn try_begin(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::InFlight;
                true
            }
            Self::InFlight => false,
        }
    }

    /// Return the token.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    /// Check if an attempt holds the token.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}
