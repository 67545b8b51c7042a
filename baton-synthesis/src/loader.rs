//! Work-order manifest loading.
//!
//! Manifests are read concurrently but collected back in the order their
//! paths were supplied, so everything downstream of the loader sees a
//! positional ordering independent of I/O completion times.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use baton_core::{Artifact, ManifestReadError, WorkOrderManifest};
use chrono::Utc;
use futures_util::{stream, StreamExt};
use tokio::time::timeout;

/// Source of work-order manifests, abstracted for testing.
#[async_trait]
pub trait ManifestReader: Send + Sync {
    async fn read_manifest(&self, path: &Path) -> Result<WorkOrderManifest, ManifestReadError>;
}

/// Loader tuning knobs.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum manifests read in flight at once
    pub max_concurrent: usize,
    /// Per-manifest read deadline
    pub read_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Reads manifests as JSON files on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsManifestReader {
    read_timeout: Duration,
}

impl FsManifestReader {
    pub fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.read_timeout)
    }
}

impl Default for FsManifestReader {
    fn default() -> Self {
        Self::from_config(&LoaderConfig::default())
    }
}

#[async_trait]
impl ManifestReader for FsManifestReader {
    async fn read_manifest(&self, path: &Path) -> Result<WorkOrderManifest, ManifestReadError> {
        let bytes = timeout(self.read_timeout, tokio::fs::read(path))
            .await
            .map_err(|_| ManifestReadError::Timeout {
                path: path.to_path_buf(),
                timeout_ms: self.read_timeout.as_millis() as u64,
            })?
            .map_err(|source| ManifestReadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|err| ManifestReadError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }
}

/// Load manifests and flatten their declared outputs into proposed artifacts.
///
/// A manifest that fails to load is logged and skipped; one bad work order
/// never blocks synthesis of the rest. Artifact order follows the supplied
/// path order, with each manifest's outputs kept in declaration order.
pub async fn load_artifacts(
    reader: &dyn ManifestReader,
    paths: &[PathBuf],
    config: &LoaderConfig,
) -> Vec<Artifact> {
    let loaded_at = Utc::now();

    // `buffered` yields results in submission order regardless of which
    // read finishes first.
    let manifests: Vec<Option<WorkOrderManifest>> = stream::iter(paths.iter())
        .map(|path| async move {
            match reader.read_manifest(path).await {
                Ok(manifest) => {
                    tracing::debug!(
                        path = %path.display(),
                        work_order_id = %manifest.work_order_id,
                        outputs = manifest.outputs.len(),
                        "Loaded work-order manifest"
                    );
                    Some(manifest)
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Skipping unreadable work-order manifest"
                    );
                    None
                }
            }
        })
        .buffered(config.max_concurrent.max(1))
        .collect()
        .await;

    manifests
        .into_iter()
        .flatten()
        .flat_map(|manifest| manifest.into_artifacts(loaded_at))
        .collect()
}
