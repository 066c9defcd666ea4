//! Ordered in-memory list keyed by a monotonically increasing id.
//! Ids are handed out by the collection and never reused, even after deletes.

use researchai_common::Reference;

pub trait Record {
    fn id(&self) -> u64;
}

impl Record for Reference {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    next_id: u64,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new(), next_id: 1 }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records; new ids continue after the largest seed id.
    pub fn from_seed(items: Vec<T>) -> Self {
        let next_id = items.iter().map(Record::id).max().map_or(1, |max| max + 1);
        Self { items, next_id }
    }

    /// Append a record built around the next id.
    pub fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(build(id));
        &self.items[self.items.len() - 1]
    }

    /// Remove by id, keeping the relative order of the rest.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}
