//! Vault persistence layer
//!
//! Provides save/load functionality for vault snapshots.

use crate::vault::Vault;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: std::path::PathBuf,
    pub snapshot_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".vault_data"),
            snapshot_file: "vault.json".to_string(),
        }
    }
}

/// Vault snapshot storage manager
pub struct VaultStore {
    config: StoreConfig,
}

impl VaultStore {
    /// Create a new storage manager
    pub fn new(config: StoreConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StoreConfig::default())
    }

    /// Get the snapshot file path
    fn snapshot_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.snapshot_file)
    }

    /// Save a vault snapshot to disk
    pub fn save(&self, vault: &Vault) -> Result<(), StorageError> {
        let path = self.snapshot_path();

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("vault.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, vault)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::debug!("vault snapshot saved to {}", path.display());
        Ok(())
    }

    /// Load a vault snapshot from disk
    pub fn load(&self) -> Result<Vault, StorageError> {
        let path = self.snapshot_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Vault snapshot not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let mut vault: Vault = serde_json::from_reader(reader)?;

        // Rebuild membership index (not serialized)
        vault.rebuild_index();

        Ok(vault)
    }

    /// Check if a saved snapshot exists
    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }

    /// Delete the saved snapshot
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.snapshot_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
