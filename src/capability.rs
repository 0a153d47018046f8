//! On-demand loading of the edit capability.
//!
//! The popup, form, and validator are only needed once the user asks to
//! edit something. Their fallible piece — the status label table, with an
//! optional TOML override file — is loaded on a worker thread on the first
//! edit request. The loading indicator is acquired once per triggering
//! request and released exactly once when the pending load is resolved,
//! whichever way it ends.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use serde::Deserialize;

use crate::model::DeliveryStatus;
use crate::validate::{self, FormValidator};

/// Errors from loading the edit capability.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid labels file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("capability load worker disappeared")]
    WorkerLost,
}

/// Display labels for the status vocabulary.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    in_transit: String,
    delivered: String,
    canceled: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            in_transit: "In transit".to_string(),
            delivered: "Delivered".to_string(),
            canceled: "Canceled".to_string(),
        }
    }
}

impl StatusLabels {
    pub fn label(&self, status: DeliveryStatus) -> &str {
        match status {
            DeliveryStatus::InTransit => &self.in_transit,
            DeliveryStatus::Delivered => &self.delivered,
            DeliveryStatus::Canceled => &self.canceled,
        }
    }
}

/// Per-status label overrides read from the labels file.
///
/// Every key is optional; absent keys keep the built-in label.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct LabelOverrides {
    in_transit: Option<String>,
    delivered: Option<String>,
    canceled: Option<String>,
}

/// Everything the edit popup needs beyond the record itself.
#[derive(Debug, Clone, Default)]
pub struct EditCapability {
    labels: StatusLabels,
}

impl EditCapability {
    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }

    /// Builds the validator wired to the delivery form's fields.
    pub fn validator(&self) -> FormValidator {
        validate::delivery_rules()
    }
}

/// Loads the capability: built-in labels, then the override file if present.
///
/// A missing file is not an error — defaults apply. An unreadable or
/// unparseable file is.
pub fn load(labels_path: Option<&Path>) -> Result<EditCapability, CapabilityError> {
    let mut labels = StatusLabels::default();

    if let Some(path) = labels_path {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(CapabilityError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        if let Some(contents) = contents {
            let overrides: LabelOverrides =
                toml::from_str(&contents).map_err(|e| CapabilityError::Parse {
                    path: path.display().to_string(),
                    source: e,
                })?;
            if let Some(label) = overrides.in_transit {
                labels.in_transit = label;
            }
            if let Some(label) = overrides.delivered {
                labels.delivered = label;
            }
            if let Some(label) = overrides.canceled {
                labels.canceled = label;
            }
        }
    }

    Ok(EditCapability { labels })
}

/// Visibility flag for the loading indicator, shared with the painter.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    active: Rc<Cell<u32>>,
}

impl LoadingIndicator {
    /// Shows the indicator until the returned guard is dropped.
    pub fn acquire(&self) -> IndicatorGuard {
        self.active.set(self.active.get() + 1);
        IndicatorGuard {
            active: Rc::clone(&self.active),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.active.get() > 0
    }
}

/// Keeps the loading indicator visible while alive.
///
/// Dropping the guard releases the indicator exactly once, on the success
/// and failure paths alike.
#[derive(Debug)]
pub struct IndicatorGuard {
    active: Rc<Cell<u32>>,
}

impl Drop for IndicatorGuard {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
    }
}

/// An in-flight capability load.
///
/// Holds the worker's result channel and the indicator guard; the board
/// drops it after taking the result, which releases the indicator.
#[derive(Debug)]
pub struct PendingLoad {
    rx: mpsc::Receiver<Result<EditCapability, CapabilityError>>,
    _guard: IndicatorGuard,
}

impl PendingLoad {
    /// Checks the worker without blocking. `Some` once the load finished.
    ///
    /// There is no cancellation: a started load always completes or errors.
    pub fn poll(&self) -> Option<Result<EditCapability, CapabilityError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(CapabilityError::WorkerLost)),
        }
    }
}

/// Starts the capability load on a worker thread and acquires the
/// loading indicator for its duration.
pub fn load_in_background(
    labels_path: Option<PathBuf>,
    indicator: &LoadingIndicator,
) -> PendingLoad {
    let guard = indicator.acquire();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver may be gone if the board shut down; nothing to do.
        let _ = tx.send(load(labels_path.as_deref()));
    });
    PendingLoad { rx, _guard: guard }
}
