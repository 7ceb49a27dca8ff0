use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::loader::{AssetLoadError, AssetLoader};

pub type AssetId = String;

/// Materialised asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetHandle {
    Image { width: u32, height: u32 },
    Text(Arc<str>),
    Binary { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded(AssetHandle),
    Failed { reason: String },
}

impl AssetStatus {
    /// Loaded and Failed both count as resolved.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }
}

/// Shared asset id → status map with a readiness barrier.
///
/// Entries leave `Pending` exactly once and are never reset.
#[derive(Clone)]
pub struct AssetRegistry {
    entries: Arc<RwLock<BTreeMap<AssetId, AssetStatus>>>,
    pending: Arc<watch::Sender<usize>>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            pending: Arc::new(pending),
        }
    }

    /// Seed entries in `Pending`. Ids that already exist are left alone.
    pub fn register<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<AssetId>,
    {
        let mut entries = self.entries.write();
        for id in ids {
            entries.entry(id.into()).or_insert(AssetStatus::Pending);
        }
        self.publish_pending(&entries);
    }

    /// Record the outcome of a load. Returns false if the entry is unknown
    /// or was already resolved.
    pub fn resolve(&self, id: &str, result: Result<AssetHandle, AssetLoadError>) -> bool {
        let mut entries = self.entries.write();
        let Some(status) = entries.get_mut(id) else {
            tracing::warn!(asset = %id, "Load result for unregistered asset ignored");
            return false;
        };
        if status.is_resolved() {
            tracing::debug!(asset = %id, "Asset already resolved, ignoring late result");
            return false;
        }

        *status = match result {
            Ok(handle) => {
                tracing::info!(asset = %id, "Asset loaded");
                AssetStatus::Loaded(handle)
            }
            Err(err) => {
                tracing::warn!(asset = %id, error = %err, "Asset failed to load");
                AssetStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        self.publish_pending(&entries);
        true
    }

    pub fn status(&self, id: &str) -> Option<AssetStatus> {
        self.entries.read().get(id).cloned()
    }

    /// True iff no entry is still pending.
    pub fn ready(&self) -> bool {
        *self.pending.borrow() == 0
    }

    /// `(resolved, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let entries = self.entries.read();
        let resolved = entries.values().filter(|s| s.is_resolved()).count();
        (resolved, entries.len())
    }

    /// Every entry in id order.
    pub fn snapshot(&self) -> Vec<(AssetId, AssetStatus)> {
        self.entries
            .read()
            .iter()
            .map(|(id, status)| (id.clone(), status.clone()))
            .collect()
    }

    pub fn pending_ids(&self) -> Vec<AssetId> {
        self.entries
            .read()
            .iter()
            .filter(|(_, status)| !status.is_resolved())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Suspend until every entry is resolved.
    pub async fn await_ready(&self) {
        let mut rx = self.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|pending| *pending == 0).await;
    }

    /// Start one independent task per pending asset. Must run inside a
    /// tokio runtime. A failing or hanging asset never affects its siblings;
    /// with `timeout` set, a hang becomes a failure instead.
    pub fn load(
        &self,
        loader: Arc<dyn AssetLoader>,
        timeout: Option<Duration>,
    ) -> Vec<JoinHandle<()>> {
        self.pending_ids()
            .into_iter()
            .map(|id| {
                let registry = self.clone();
                let loader = Arc::clone(&loader);
                tokio::spawn(async move {
                    let result = match timeout {
                        Some(limit) => tokio::time::timeout(limit, loader.load(&id))
                            .await
                            .unwrap_or(Err(AssetLoadError::TimedOut(limit))),
                        None => loader.load(&id).await,
                    };
                    registry.resolve(&id, result);
                })
            })
            .collect()
    }

    fn publish_pending(&self, entries: &BTreeMap<AssetId, AssetStatus>) {
        let pending = entries.values().filter(|s| !s.is_resolved()).count();
        self.pending.send_replace(pending);
    }
}
