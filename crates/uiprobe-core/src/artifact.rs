//! Artifact storage for probe output
//!
//! Screenshots land in one flat directory under fixed, per-probe names
//! (`debug_initial.png`, `dump_tab_missing.png`, ...). Names are stable so a
//! rerun overwrites the previous capture instead of accumulating stale files.
//! The store only ever writes; nothing in uiprobe reads an artifact back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::Result;

/// Metadata for a stored probe artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Path the artifact was written to
    pub path: PathBuf,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// When created
    pub created_at: DateTime<Utc>,
    /// Human-readable description
    pub description: String,
}

/// Writes probe artifacts into the verification directory
pub struct ArtifactStore {
    base_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory artifacts are written to
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path a screenshot with the given name will be written to
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.png", name))
    }

    /// Store PNG screenshot data under a fixed name, overwriting any
    /// previous capture with the same name
    ///
    /// # Arguments
    /// * `name` - Artifact name without extension, e.g. `debug_initial`
    /// * `data` - PNG image data
    /// * `description` - Human-readable description
    pub async fn store_screenshot(
        &self,
        name: &str,
        data: &[u8],
        description: &str,
    ) -> Result<Artifact> {
        fs::create_dir_all(&self.base_dir).await?;

        let path = self.screenshot_path(name);
        fs::write(&path, data).await?;

        debug!("Stored artifact {} ({} bytes)", path.display(), data.len());

        Ok(Artifact {
            path,
            mime_type: "image/png".to_string(),
            size_bytes: data.len() as u64,
            created_at: Utc::now(),
            description: description.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_screenshot_path() {
        let store = ArtifactStore::new("verification");
        assert_eq!(
            store.screenshot_path("debug_initial"),
            PathBuf::from("verification/debug_initial.png")
        );
    }

    #[tokio::test]
    async fn test_store_screenshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(temp_dir.path());

        let artifact = store
            .store_screenshot("debug_initial", b"png bytes", "Initial page state")
            .await
            .unwrap();

        assert_eq!(artifact.size_bytes, 9);
        assert_eq!(artifact.mime_type, "image/png");
        assert_eq!(artifact.description, "Initial page state");
        assert!(artifact.path.exists());

        let content = fs::read(&artifact.path).await.unwrap();
        assert_eq!(content, b"png bytes");
    }

    #[tokio::test]
    async fn test_rerun_overwrites_same_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(temp_dir.path());

        let first = store
            .store_screenshot("debug_initial", b"first run", "Initial page state")
            .await
            .unwrap();
        let second = store
            .store_screenshot("debug_initial", b"second run --", "Initial page state")
            .await
            .unwrap();

        assert_eq!(first.path, second.path);
        let content = fs::read(&second.path).await.unwrap();
        assert_eq!(content, b"second run --");

        // No stale artifacts accumulate
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_store_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("verification");
        let store = ArtifactStore::new(&nested);

        store
            .store_screenshot("error", b"data", "Failure state")
            .await
            .unwrap();

        assert!(nested.join("error.png").exists());
    }
}
