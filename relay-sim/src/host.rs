//! Filesystem-backed host for the simulator.
//!
//! - config lives in `<data_dir>/config.json`
//! - the settings panel is printed to stdout, one line per render
//! - "sending" to the device writes the payload to `<data_dir>/outbox/<app>.txt`

use async_trait::async_trait;
use relay_core::status::StatusNode;
use relay_plugin::{CallbackRegistry, ConfigStore, DeviceLink, HostError, NativeCallback, UiSink};
use relay_types::{CallbackId, ConfigMap, UiNode};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Directory delivered payloads are written to.
pub const OUTBOX_DIR: &str = "outbox";

/// Host implementation used by `relay-sim`.
pub struct SimHost {
    data_dir: PathBuf,
    offline: bool,
    callbacks: Mutex<Vec<NativeCallback>>,
}

impl SimHost {
    /// Create a host rooted at `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            offline: false,
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Make every send fail as if no device were paired.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Path of the persisted config object.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Path a payload for `target_app` is delivered to.
    pub fn outbox_path(&self, target_app: &str) -> PathBuf {
        outbox_path(&self.data_dir, target_app)
    }
}

/// Path a payload for `target_app` is delivered to under `data_dir`.
pub fn outbox_path(data_dir: &Path, target_app: &str) -> PathBuf {
    data_dir.join(OUTBOX_DIR).join(format!("{}.txt", target_app))
}

/// One-line summary of the visible status node, e.g. `[success] credential sent to device`.
pub fn describe_status(nodes: &[UiNode]) -> Option<String> {
    nodes.iter().find_map(|node| {
        let status = StatusNode::from_id(&node.id)?;
        node.visible.then(|| {
            format!(
                "[{}] {}",
                status.phase(),
                node.text_content().unwrap_or_default()
            )
        })
    })
}

impl ConfigStore for SimHost {
    fn read_config(&self) -> Result<ConfigMap, HostError> {
        let path = self.config_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigMap::new()),
            Err(e) => {
                return Err(HostError::ConfigRead(format!("{}: {}", path.display(), e)));
            }
        };
        serde_json::from_str(&contents)
            .map_err(|e| HostError::ConfigRead(format!("{}: {}", path.display(), e)))
    }

    fn write_config(&self, config: ConfigMap) -> Result<(), HostError> {
        let path = self.config_path();
        let contents = serde_json::to_string_pretty(&config)
            .map_err(|e| HostError::ConfigWrite(e.to_string()))?;
        std::fs::write(&path, contents)
            .map_err(|e| HostError::ConfigWrite(format!("{}: {}", path.display(), e)))
    }
}

impl UiSink for SimHost {
    fn update_settings_ui(&self, nodes: Vec<UiNode>) -> Result<(), HostError> {
        let line = describe_status(&nodes)
            .ok_or_else(|| HostError::UiUpdate("no visible status node".to_string()))?;
        println!("{}", line);
        Ok(())
    }
}

impl CallbackRegistry for SimHost {
    fn register_callback(&self, callback: NativeCallback) -> Result<CallbackId, HostError> {
        let mut callbacks = self.callbacks.lock().unwrap_or_else(PoisonError::into_inner);
        callbacks.push(callback);
        Ok(CallbackId::new(callbacks.len() as u64))
    }
}

#[async_trait]
impl DeviceLink for SimHost {
    async fn send_message(&self, target_app: &str, payload: &str) -> Result<(), HostError> {
        if self.offline {
            return Err(HostError::DeviceUnreachable(
                "simulator is offline".to_string(),
            ));
        }

        let path = self.outbox_path(target_app);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| HostError::SendFailed(format!("{}: {}", dir.display(), e)))?;
        }
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| HostError::SendFailed(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Wrote {} bytes to {}", payload.len(), path.display());
        Ok(())
    }
}
