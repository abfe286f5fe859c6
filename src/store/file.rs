use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{Record, Repository, Snapshot};
use crate::error::Result;

/// A collection persisted as one JSON file.
///
/// The file holds `{"next_id": …, "items": […]}`. Mutations are applied to a
/// copy, written to `<file>.tmp`, renamed over the real file and only then
/// made visible, so a failed write leaves both disk and memory at the
/// previous state.
pub struct JsonFileRepository<T> {
    path: PathBuf,
    state: RwLock<Snapshot<T>>,
}

impl<T: Record> JsonFileRepository<T> {
    /// Loads `path`, or starts from `seed` when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>, seed: Vec<T>) -> Result<Self> {
        let path = path.into();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot<T> = serde_json::from_slice(&bytes)?;
                info!(path = %path.display(), items = snapshot.items.len(), "collection loaded");
                snapshot
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot yet, starting from seed");
                Snapshot::seeded(seed)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, state: RwLock::new(state) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `op` on a copy of the state; persists and commits it when `op`
    /// reports a change.
    async fn mutate<R>(
        &self,
        op: impl FnOnce(&mut Snapshot<T>) -> R,
        changed: impl FnOnce(&R) -> bool,
    ) -> Result<R> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = op(&mut next);
        if changed(&out) {
            self.persist(&next).await?;
            *state = next;
        }
        Ok(out)
    }

    async fn persist(&self, snapshot: &Snapshot<T>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Repository<T> for JsonFileRepository<T> {
    async fn list(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    async fn get(&self, id: u64) -> Option<T> {
        self.state.read().await.get(id).cloned()
    }

    async fn insert(&self, draft: T::Draft) -> Result<T> {
        self.mutate(|s| s.insert(draft), |_| true).await
    }

    async fn update(&self, id: u64, f: &(dyn for<'a> Fn(&'a mut T) + Sync)) -> Result<bool> {
        self.mutate(|s| s.update(id, f), |found| *found).await
    }

    async fn remove(&self, id: u64) -> Result<bool> {
        self.mutate(|s| s.remove(id), |found| *found).await
    }

    async fn remove_where(&self, pred: &(dyn for<'a> Fn(&'a T) -> bool + Sync)) -> Result<usize> {
        self.mutate(|s| s.remove_where(pred), |n| *n > 0).await
    }
}
