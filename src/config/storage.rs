//! Blob storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Blob storage configuration (local filesystem backend)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored blobs
    #[serde(default = "default_root")]
    pub root: String,

    /// URL prefix blobs are served under
    #[serde(default = "default_public_base")]
    pub public_base_url: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.root.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ROOT"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_base_url: default_public_base(),
        }
    }
}

fn default_root() -> String {
    "./data/blobs".to_string()
}

fn default_public_base() -> String {
    "/blobs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_root_is_rejected() {
        let cfg = StorageConfig {
            root: String::new(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
