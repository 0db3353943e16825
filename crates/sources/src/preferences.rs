//! Preference store implementations.
//!
//! `JsonPreferenceStore` keeps every viewer in one JSON object keyed by
//! viewer id.

use crate::traits::PreferenceStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog::{PreferenceSet, ViewerId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Preferences held in memory for the lifetime of the process
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    preferences: RwLock<HashMap<ViewerId, PreferenceSet>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load(&self, viewer_id: &str) -> Result<PreferenceSet> {
        Ok(self
            .preferences
            .read()
            .await
            .get(viewer_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, viewer_id: &str, preferences: &PreferenceSet) -> Result<()> {
        self.preferences
            .write()
            .await
            .insert(viewer_id.to_string(), preferences.clone());
        Ok(())
    }
}

/// Preferences persisted to a JSON file
pub struct JsonPreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<ViewerId, PreferenceSet>> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check {}", self.path.display()))?;
        if !exists {
            return Ok(HashMap::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed preference file {}", self.path.display()))
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn load(&self, viewer_id: &str) -> Result<PreferenceSet> {
        let mut all = self.read_all().await?;
        Ok(all.remove(viewer_id).unwrap_or_default())
    }

    async fn save(&self, viewer_id: &str, preferences: &PreferenceSet) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(viewer_id.to_string(), preferences.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!("Saved preferences for viewer {}", viewer_id);
        Ok(())
    }
}
