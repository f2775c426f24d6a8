//! Settings UI descriptors.
//!
//! The host renders the plugin's settings panel from a flat list of nodes.
//! Every update replaces the whole list, so callers always send every node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier handed out by the host when a native callback is registered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(u64);

impl CallbackId {
    /// Wrap a raw host identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw host identifier.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb#{}", self.0)
    }
}

impl fmt::Debug for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackId({})", self.0)
    }
}

/// Typed payload of a UI node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    /// Static text display.
    Text {
        /// Text shown to the user.
        text: String,
    },
    /// Single-line text input.
    TextInput {
        /// Current field value.
        value: String,
        /// Hint shown while the field is empty.
        placeholder: String,
        /// Callback invoked with the new value on every edit.
        on_change: CallbackId,
    },
    /// Push button.
    Button {
        /// Button caption.
        label: String,
        /// Callback invoked on click.
        on_click: CallbackId,
    },
}

/// One node of the settings UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiNode {
    /// Stable identifier, unique within one update.
    pub id: String,
    /// Whether the node is shown.
    pub visible: bool,
    /// Whether the node rejects interaction.
    pub disabled: bool,
    /// What the node displays.
    pub content: NodeContent,
}

impl UiNode {
    /// A visible, enabled text node.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::enabled(id, NodeContent::Text { text: text.into() })
    }

    /// A visible, enabled text input.
    pub fn text_input(
        id: impl Into<String>,
        value: impl Into<String>,
        placeholder: impl Into<String>,
        on_change: CallbackId,
    ) -> Self {
        Self::enabled(
            id,
            NodeContent::TextInput {
                value: value.into(),
                placeholder: placeholder.into(),
                on_change,
            },
        )
    }

    /// A visible, enabled button.
    pub fn button(id: impl Into<String>, label: impl Into<String>, on_click: CallbackId) -> Self {
        Self::enabled(
            id,
            NodeContent::Button {
                label: label.into(),
                on_click,
            },
        )
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Text shown by a text node, if this is one.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Callback bound to an interactive node.
    pub fn callback(&self) -> Option<CallbackId> {
        match &self.content {
            NodeContent::TextInput { on_change, .. } => Some(*on_change),
            NodeContent::Button { on_click, .. } => Some(*on_click),
            NodeContent::Text { .. } => None,
        }
    }

    fn enabled(id: impl Into<String>, content: NodeContent) -> Self {
        Self {
            id: id.into(),
            visible: true,
            disabled: false,
            content,
        }
    }
}
