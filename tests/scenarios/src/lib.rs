//! # cookie-relay-scenarios
//!
//! End-to-end scenario harness for cookie-relay.
//!
//! This crate drives the plugin through a [`MockHost`](relay_plugin::MockHost)
//! and checks the full render history:
//! - Extraction outcomes as seen by the user
//! - Complete sync flows, including the timed reset
//! - Persistence through the host config store
//! - Overlapping triggers under both trigger policies

#![warn(missing_docs)]
#![warn(clippy::all)]
