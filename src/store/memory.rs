use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Record, Repository, Snapshot};
use crate::error::Result;

/// A collection held in process memory behind one lock.
///
/// Every operation takes the lock once, so a lookup and the mutation that
/// follows it can never interleave with another request's.
pub struct MemoryRepository<T> {
    state: RwLock<Snapshot<T>>,
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(items: Vec<T>) -> Self {
        Self { state: RwLock::new(Snapshot::seeded(items)) }
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    async fn get(&self, id: u64) -> Option<T> {
        self.state.read().await.get(id).cloned()
    }

    async fn insert(&self, draft: T::Draft) -> Result<T> {
        Ok(self.state.write().await.insert(draft))
    }

    async fn update(&self, id: u64, f: &(dyn for<'a> Fn(&'a mut T) + Sync)) -> Result<bool> {
        Ok(self.state.write().await.update(id, f))
    }

    async fn remove(&self, id: u64) -> Result<bool> {
        Ok(self.state.write().await.remove(id))
    }

    async fn remove_where(&self, pred: &(dyn for<'a> Fn(&'a T) -> bool + Sync)) -> Result<usize> {
        Ok(self.state.write().await.remove_where(pred))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::tests::Note;

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let repo: Arc<MemoryRepository<Note>> = Arc::new(MemoryRepository::new());
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..32 {
            let repo = Arc::clone(&repo);
            tasks.spawn(async move { repo.insert("n").await.unwrap().id });
        }
        let mut ids = Vec::new();
        while let Some(id) = tasks.join_next().await {
            ids.push(id.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn update_is_visible_to_the_next_read() {
        let repo = MemoryRepository::seeded(vec![Note::from_draft(1, "a")]);
        assert!(repo.update(1, &|n: &mut Note| n.pinned = true).await.unwrap());
        assert!(repo.get(1).await.unwrap().pinned);
        assert_eq!(repo.get(2).await, None);
    }

    #[tokio::test]
    async fn remove_where_through_a_trait_object() {
        let repo: Arc<dyn Repository<Note>> = Arc::new(MemoryRepository::new());
        for body in ["a", "b", "c"] {
            repo.insert(body).await.unwrap();
        }
        repo.update(2, &|n: &mut Note| n.pinned = true).await.unwrap();

        assert_eq!(repo.remove_where(&|n: &Note| !n.pinned).await.unwrap(), 2);
        let left: Vec<_> = repo.list().await.into_iter().map(|n| n.id).collect();
        assert_eq!(left, [2]);
    }
}
