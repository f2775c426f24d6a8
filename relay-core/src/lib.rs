//! # relay-core
//!
//! Pure logic for cookie-relay (no I/O, instant tests).
//!
//! This crate implements the credential extractor, the status projection and
//! the sync state machine without any host calls, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects:
//! - [`credential`] turns a pasted string into a `MUSIC_U=` fragment
//! - [`status`] projects a phase into the full settings UI node list
//! - [`state`] maps sync events to a new state plus actions
//!
//! The host calls (config store, UI sink, device link) are performed by
//! relay-plugin, which interprets the actions produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod credential;
pub mod state;
pub mod status;

pub use credential::{extract, extract_value, Credential, COOKIE_NAME, MIN_BARE_TOKEN_LEN};
pub use state::{
    Action, Event, Failure, FlightGuard, SyncState, DEFAULT_RESET_DELAY, EXTRACTING_MESSAGE,
    SENDING_MESSAGE,
};
pub use status::{
    render, status_text, Controls, Phase, StatusNode, INPUT_NODE_ID, SYNC_BUTTON_NODE_ID,
};
