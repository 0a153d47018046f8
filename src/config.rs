//! Courier configuration.
//!
//! Deliveries are seeded from `~/.courier/deliveries.toml`. A missing file
//! falls back to the built-in sample deliveries; a present-but-invalid
//! file is a startup error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{DeliveryStatus, EditableDelivery};

/// One configured startup delivery.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeliverySeed {
    pub name: String,
    pub address: String,
    pub distance: f64,

    /// Defaults to `in_transit` when omitted.
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl DeliverySeed {
    fn seed(name: &str, address: &str, distance: f64, status: DeliveryStatus) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            distance,
            status,
        }
    }

    pub fn to_record(&self) -> EditableDelivery {
        EditableDelivery::new(
            self.name.clone(),
            self.address.clone(),
            self.distance,
            self.status,
        )
    }
}

/// Courier configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub deliveries: Vec<DeliverySeed>,
}

impl Config {
    /// Load the deliveries file at `path`, or the default location when
    /// `None`. Returns the sample deliveries when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or("could not determine home directory")?,
        };

        if !path.exists() {
            return Ok(Self::sample());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid deliveries file at {}: {e}", path.display()))?;

        Ok(config)
    }

    /// The deliveries file path: `~/.courier/deliveries.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".courier").join("deliveries.toml"))
    }

    /// The status-label overrides path: `~/.courier/labels.toml`.
    pub fn default_labels_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".courier").join("labels.toml"))
    }

    /// The deliveries shown when no file has been written yet.
    pub fn sample() -> Self {
        Self {
            deliveries: vec![
                DeliverySeed::seed("Olga", "12 Vymyslov St", 8.0, DeliveryStatus::InTransit),
                DeliverySeed::seed("Dmitry", "7 Zadachnaya St", 3.0, DeliveryStatus::Delivered),
                DeliverySeed::seed("Olya", "43 Tkachey St", 11.0, DeliveryStatus::Canceled),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_samples() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("deliveries.toml"))).unwrap();

        assert_eq!(config.deliveries.len(), 3);
        assert_eq!(config.deliveries[0].name, "Olga");
        assert_eq!(config.deliveries[2].status, DeliveryStatus::Canceled);
    }

    #[test]
    fn loads_deliveries_with_default_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deliveries.toml");
        fs::write(
            &path,
            r#"
[[deliveries]]
name = "Ivan"
address = "1 Pervaya St"
distance = 2.5

[[deliveries]]
name = "Anna"
address = "9 Devyataya St"
distance = 4.0
status = "delivered"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.deliveries.len(), 2);
        assert_eq!(config.deliveries[0].status, DeliveryStatus::InTransit);
        assert_eq!(config.deliveries[1].status, DeliveryStatus::Delivered);

        let record = config.deliveries[1].to_record();
        assert_eq!(record.name(), "Anna");
        assert_eq!(record.status(), DeliveryStatus::Delivered);
    }

    #[test]
    fn invalid_file_is_a_startup_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deliveries.toml");
        fs::write(&path, "deliveries = 3").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.contains("invalid deliveries file"));
    }

    #[test]
    fn unknown_status_in_the_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deliveries.toml");
        fs::write(
            &path,
            "[[deliveries]]\nname = \"X\"\naddress = \"Y\"\ndistance = 1.0\nstatus = \"lost\"\n",
        )
        .unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
