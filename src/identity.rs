//! Persisted consumer identity.
//!
//! The backend scopes reservation lookups by a consumer id registered out
//! of band (phone-number verification, out of scope here). The pair is kept
//! in a small JSON file so it survives restarts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConsumerIdentity {
    pub consumer_id: String,
    pub phone_number: String,
}

impl ConsumerIdentity {
    /// Without a consumer id no reservation lookup can be scoped.
    pub fn is_registered(&self) -> bool {
        !self.consumer_id.is_empty()
    }
}

pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Save the identity to disk.
    pub async fn save(&self, identity: &ConsumerIdentity) -> Result<()> {
        let json = serde_json::to_string_pretty(identity)
            .context("Failed to serialize consumer identity")?;
        fs::write(&self.path, json).await
            .context("Failed to write identity file")?;
        Ok(())
    }

    /// Load the identity from disk; a missing file means unregistered.
    pub async fn load(&self) -> Result<ConsumerIdentity> {
        if !self.path.exists() {
            return Ok(ConsumerIdentity::default());
        }
        let json = fs::read_to_string(&self.path).await
            .context("Failed to read identity file")?;
        let identity = serde_json::from_str(&json)
            .context("Failed to deserialize consumer identity")?;
        Ok(identity)
    }

    /// Remove the stored identity.
    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
