use crate::errors::{GraphError, Result};
use crate::graph::{Distance, VertexId};

use std::collections::BTreeSet;


/// Key of a frontier entry: best known distance, then the rank of the vertex name
/// Ranks are unique per graph so keys are totally ordered
pub type FrontierKey<C> = (Distance<C>, usize);


/// Min-priority container over vertex ids
/// Holds every vertex at most once
pub trait PriorityContainer<K: Ord> {

    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Add a vertex, replacing its key if it is already held
    fn insert(&mut self, id: VertexId, key: K);

    /// Remove and return the entry with the smallest key
    fn extract_min(&mut self) -> Result<(VertexId, K)>;

    /// Remove a vertex, returning the key it was held under
    fn remove(&mut self, id: VertexId) -> Option<K>;

    fn reinsert(&mut self, id: VertexId, key: K) {
        self.insert(id, key);
    }

    /// Lower the key of a vertex
    /// Remove then reinsert, implementations may do better
    fn decrease_key(&mut self, id: VertexId, key: K) {
        self.remove(id);
        self.reinsert(id, key);
    }

    fn key(&self, id: VertexId) -> Option<&K>;

    fn contains(&self, id: VertexId) -> bool {
        self.key(id).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}


/// Binary min-heap tracking the heap position of every vertex
/// decrease_key is a single sift-up
#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    heap: Vec<(K, VertexId)>,
    positions: Vec<Option<usize>>, // vertex id -> slot in heap
}

impl<K: Ord> IndexedHeap<K> {

    fn position(&self, id: VertexId) -> Option<usize> {
        self.positions.get(id).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].1] = Some(a);
        self.positions[self.heap[b].1] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].0 < self.heap[parent].0 {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < self.heap.len() && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    /// Take the entry at slot out of the heap and restore the heap property
    fn take(&mut self, slot: usize) -> (K, VertexId) {
        let last = self.heap.len() - 1;
        self.swap(slot, last);

        let entry = match self.heap.pop() {
            Some(entry) => entry,
            None => unreachable!("slot {slot} taken from an empty heap"),
        };
        self.positions[entry.1] = None;

        if slot < self.heap.len() {
            self.sift_down(slot);
            self.sift_up(slot);
        }
        entry
    }
}

impl<K: Ord> Default for IndexedHeap<K> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K: Ord> PriorityContainer<K> for IndexedHeap<K> {

    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    fn insert(&mut self, id: VertexId, key: K) {
        if self.contains(id) {
            self.remove(id);
        }
        if self.positions.len() <= id {
            self.positions.resize(id + 1, None);
        }
        let slot = self.heap.len();
        self.heap.push((key, id));
        self.positions[id] = Some(slot);
        self.sift_up(slot);
    }

    fn extract_min(&mut self) -> Result<(VertexId, K)> {
        if self.heap.is_empty() {
            return Err(GraphError::EmptyContainer);
        }
        let (key, id) = self.take(0);
        Ok((id, key))
    }

    fn remove(&mut self, id: VertexId) -> Option<K> {
        let slot = self.position(id)?;
        Some(self.take(slot).0)
    }

    fn decrease_key(&mut self, id: VertexId, key: K) {
        match self.position(id) {
            Some(slot) if key <= self.heap[slot].0 => {
                self.heap[slot].0 = key;
                self.sift_up(slot);
            }
            _ => self.insert(id, key),
        }
    }

    fn key(&self, id: VertexId) -> Option<&K> {
        self.position(id).map(|slot| &self.heap[slot].0)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.positions.iter_mut().for_each(|p| *p = None);
    }
}


/// Ordered set of (key, vertex) pairs
/// Decrease-key is a remove followed by a reinsert
#[derive(Debug, Clone)]
pub struct OrderedSetFrontier<K> {
    set: BTreeSet<(K, VertexId)>,
    keys: Vec<Option<K>>, // vertex id -> key it is held under
}

impl<K: Ord + Clone> Default for OrderedSetFrontier<K> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K: Ord + Clone> PriorityContainer<K> for OrderedSetFrontier<K> {

    fn with_capacity(capacity: usize) -> Self {
        Self {
            set: BTreeSet::new(),
            keys: vec![None; capacity],
        }
    }

    fn insert(&mut self, id: VertexId, key: K) {
        self.remove(id);
        if self.keys.len() <= id {
            self.keys.resize(id + 1, None);
        }
        self.set.insert((key.clone(), id));
        self.keys[id] = Some(key);
    }

    fn extract_min(&mut self) -> Result<(VertexId, K)> {
        let (key, id) = self.set.pop_first().ok_or(GraphError::EmptyContainer)?;
        self.keys[id] = None;
        Ok((id, key))
    }

    fn remove(&mut self, id: VertexId) -> Option<K> {
        let key = self.keys.get_mut(id)?.take()?;
        self.set.remove(&(key.clone(), id));
        Some(key)
    }

    fn key(&self, id: VertexId) -> Option<&K> {
        self.keys.get(id).and_then(Option::as_ref)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn clear(&mut self) {
        self.set.clear();
        self.keys.iter_mut().for_each(|k| *k = None);
    }
}
