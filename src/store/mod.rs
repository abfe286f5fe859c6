//! Record repositories.
//!
//! Each collection (todos, memos, feedback) sits behind a [`Repository`]:
//! insertion-ordered records with a per-collection id counter that only
//! ever grows. Ids are never reused, not even after the record that held
//! the highest id is removed.
//!
//! Two backends:
//! - [`MemoryRepository`] keeps everything in process memory.
//! - [`JsonFileRepository`] additionally writes a JSON snapshot after every
//!   mutation and reloads it on startup, counter included.

mod file;
mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use file::JsonFileRepository;
pub use memory::MemoryRepository;

/// A record stored in a [`Repository`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The fields a caller supplies; the repository supplies the id.
    type Draft: Send + 'static;

    fn id(&self) -> u64;
    fn from_draft(id: u64, draft: Self::Draft) -> Self;
}

/// Storage for one collection.
///
/// Lookups by an id that does not exist are not errors: `update` and
/// `remove` report `false` and leave the collection untouched. `Err` only
/// surfaces backend failures.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Every record, in insertion order.
    async fn list(&self) -> Vec<T>;

    async fn get(&self, id: u64) -> Option<T>;

    /// Appends a record built from `draft` under the next id.
    async fn insert(&self, draft: T::Draft) -> Result<T>;

    /// Applies `f` to the record with `id`. Returns whether it existed.
    async fn update(&self, id: u64, f: &(dyn for<'a> Fn(&'a mut T) + Sync)) -> Result<bool>;

    /// Removes the record with `id`. Returns whether it existed.
    async fn remove(&self, id: u64) -> Result<bool>;

    /// Removes every record matching `pred`, keeping the order of the rest.
    async fn remove_where(&self, pred: &(dyn for<'a> Fn(&'a T) -> bool + Sync)) -> Result<usize>;
}

/// The full state of a collection: its records and the next id to hand out.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct Snapshot<T> {
    pub next_id: u64,
    pub items: Vec<T>,
}

impl<T: Record> Snapshot<T> {
    /// Starts the counter just past the highest seeded id.
    pub fn seeded(items: Vec<T>) -> Self {
        let next_id = items.iter().map(Record::id).max().map_or(1, |max| max + 1);
        Self { next_id, items }
    }

    pub fn insert(&mut self, draft: T::Draft) -> T {
        let record = T::from_draft(self.next_id, draft);
        self.next_id += 1;
        self.items.push(record.clone());
        record
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn update(&mut self, id: u64, f: &(dyn for<'a> Fn(&'a mut T) + Sync)) -> bool {
        match self.items.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        match self.items.iter().position(|r| r.id() == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn remove_where(&mut self, pred: &(dyn for<'a> Fn(&'a T) -> bool + Sync)) -> usize {
        let before = self.items.len();
        self.items.retain(|r| !pred(r));
        before - self.items.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Note {
        pub id: u64,
        pub body: String,
        pub pinned: bool,
    }

    impl Record for Note {
        type Draft = &'static str;

        fn id(&self) -> u64 { self.id }

        fn from_draft(id: u64, body: &'static str) -> Self {
            Self { id, body: body.to_owned(), pinned: false }
        }
    }

    #[test]
    fn counter_starts_after_highest_seed() {
        let snap = Snapshot::seeded(vec![Note::from_draft(7, "a"), Note::from_draft(3, "b")]);
        assert_eq!(snap.next_id, 8);
        assert_eq!(Snapshot::<Note>::seeded(Vec::new()).next_id, 1);
    }

    #[test]
    fn ids_are_not_reused_after_removing_the_last() {
        let mut snap = Snapshot::<Note>::seeded(Vec::new());
        let a = snap.insert("a");
        let b = snap.insert("b");
        assert!(snap.remove(b.id));
        let c = snap.insert("c");
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[test]
    fn missing_ids_leave_the_collection_alone() {
        let mut snap = Snapshot::seeded(vec![Note::from_draft(1, "a")]);
        assert!(!snap.update(99, &|n: &mut Note| n.pinned = true));
        assert!(!snap.remove(99));
        assert_eq!(snap.items.len(), 1);
        assert!(!snap.items[0].pinned);
    }
}
