//! Status projection for the settings panel.
//!
//! [`render`] maps the current phase, an optional message and the current
//! input to the complete list of UI nodes. The host replaces its node list on
//! every update, so the projection always emits all six nodes: the input
//! field, the sync button and four status lines of which exactly one is
//! visible.

use relay_types::{CallbackId, UiNode};
use std::fmt;

/// Node id of the credential input field.
pub const INPUT_NODE_ID: &str = "cookie-input";
/// Node id of the sync button.
pub const SYNC_BUTTON_NODE_ID: &str = "sync-button";

/// Placeholder shown in the empty input field.
pub const INPUT_PLACEHOLDER: &str = "paste a cookie header or MUSIC_U token";
/// Caption of the sync button.
pub const SYNC_BUTTON_LABEL: &str = "Sync to device";

/// Default status when an input was restored from config.
pub const READY_TEXT: &str = "loaded previous credential, ready to sync";
/// Default status when there is no input yet.
pub const PROMPT_TEXT: &str = "please paste a credential";
/// Processing status when no message was given.
pub const PROCESSING_FALLBACK: &str = "processing";
/// Fixed success status.
pub const SUCCESS_TEXT: &str = "credential sent to device";
/// Prefix of every error status.
pub const ERROR_PREFIX: &str = "error: ";
/// Error detail when no message was given.
pub const ERROR_FALLBACK: &str = "unknown error";

/// Sync progress as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Nothing in progress.
    #[default]
    Default,
    /// Extracting or sending.
    Processing,
    /// The credential reached the device.
    Success,
    /// The last attempt failed.
    Error,
}

impl Phase {
    /// All phases, in display order.
    pub const ALL: [Phase; 4] = [
        Phase::Default,
        Phase::Processing,
        Phase::Success,
        Phase::Error,
    ];

    /// The status node that displays this phase.
    pub fn status_node(self) -> StatusNode {
        match self {
            Phase::Default => StatusNode::Default,
            Phase::Processing => StatusNode::Processing,
            Phase::Success => StatusNode::Success,
            Phase::Error => StatusNode::Error,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Default => "default",
            Phase::Processing => "processing",
            Phase::Success => "success",
            Phase::Error => "error",
        };
        f.write_str(name)
    }
}

/// The four mutually exclusive status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusNode {
    /// Idle line.
    Default,
    /// In-progress line.
    Processing,
    /// Success line.
    Success,
    /// Error line.
    Error,
}

impl StatusNode {
    /// All status nodes, in emission order.
    pub const ALL: [StatusNode; 4] = [
        StatusNode::Default,
        StatusNode::Processing,
        StatusNode::Success,
        StatusNode::Error,
    ];

    /// Stable node id.
    pub fn id(self) -> &'static str {
        match self {
            StatusNode::Default => "status-default",
            StatusNode::Processing => "status-processing",
            StatusNode::Success => "status-success",
            StatusNode::Error => "status-error",
        }
    }

    /// Look up a status node by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node| node.id() == id)
    }

    /// The phase this node displays.
    pub fn phase(self) -> Phase {
        match self {
            StatusNode::Default => Phase::Default,
            StatusNode::Processing => Phase::Processing,
            StatusNode::Success => Phase::Success,
            StatusNode::Error => Phase::Error,
        }
    }
}

/// Callback ids of the two interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Bound to the input field's change event.
    pub input: CallbackId,
    /// Bound to the sync button's click event.
    pub sync: CallbackId,
}

/// Compose the status text for a phase.
///
/// `message` is only used by Processing and Error; `raw_input` only by Default.
pub fn status_text(phase: Phase, message: Option<&str>, raw_input: &str) -> String {
    match phase {
        Phase::Default if raw_input.is_empty() => PROMPT_TEXT.to_string(),
        Phase::Default => READY_TEXT.to_string(),
        Phase::Processing => message.unwrap_or(PROCESSING_FALLBACK).to_string(),
        Phase::Success => SUCCESS_TEXT.to_string(),
        Phase::Error => format!("{}{}", ERROR_PREFIX, message.unwrap_or(ERROR_FALLBACK)),
    }
}

/// Project the full settings UI for a phase.
///
/// Returns the input field, the sync button and the four status lines, in
/// that order. Only the line for `phase` is visible; the controls are always
/// visible and enabled.
pub fn render(
    phase: Phase,
    message: Option<&str>,
    raw_input: &str,
    controls: &Controls,
) -> Vec<UiNode> {
    let active = phase.status_node();

    let mut nodes = Vec::with_capacity(2 + StatusNode::ALL.len());
    nodes.push(UiNode::text_input(
        INPUT_NODE_ID,
        raw_input,
        INPUT_PLACEHOLDER,
        controls.input,
    ));
    nodes.push(UiNode::button(
        SYNC_BUTTON_NODE_ID,
        SYNC_BUTTON_LABEL,
        controls.sync,
    ));

    for node in StatusNode::ALL {
        let text = if node == active {
            status_text(phase, message, raw_input)
        } else {
            String::new()
        };
        nodes.push(UiNode::text(node.id(), text).with_visible(node == active));
    }

    nodes
}
