//! Binary min-heap ordered by a caller-supplied key.

use std::marker::PhantomData;

use crate::error::SearchError;

/// A binary min-heap over items of type `T`, ordered by `key(item)`.
///
/// The ordering lives in the key function given at construction rather than
/// in an `Ord` impl on `T`, so the same item type can be queued under
/// different priorities. Ties are resolved structurally and deterministically:
/// an item only rises above its parent when its key is strictly smaller, and
/// sift-down prefers the left child unless the right child is strictly
/// smaller.
pub struct PriorityQueue<T, K, F = fn(&T) -> K> {
    data: Vec<T>,
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<T, K, F> PriorityQueue<T, K, F>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    /// Create an empty queue ordered by `key`.
    pub fn new(key: F) -> Self {
        Self {
            data: Vec::new(),
            key,
            _key: PhantomData,
        }
    }

    /// Create an empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize, key: F) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            key,
            _key: PhantomData,
        }
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.key)(&self.data[a]) < (self.key)(&self.data[b])
    }

    /// Add an item. O(log n).
    pub fn enqueue(&mut self, item: T) {
        self.data.push(item);
        let mut child = self.data.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(child, parent) {
                break;
            }
            self.data.swap(child, parent);
            child = parent;
        }
    }

    /// Remove and return the item with the smallest key. O(log n).
    pub fn dequeue(&mut self) -> Result<T, SearchError> {
        if self.data.is_empty() {
            return Err(SearchError::EmptyQueue);
        }
        // The last item takes the root's place before sifting down.
        let front = self.data.swap_remove(0);
        let len = self.data.len();
        let mut parent = 0;
        loop {
            let mut child = parent * 2 + 1;
            if child >= len {
                break;
            }
            let right = child + 1;
            if right < len && self.less(right, child) {
                child = right;
            }
            if !self.less(child, parent) {
                break;
            }
            self.data.swap(parent, child);
            parent = child;
        }
        Ok(front)
    }

    /// The item with the smallest key, without removing it.
    pub fn peek(&self) -> Result<&T, SearchError> {
        self.data.first().ok_or(SearchError::EmptyQueue)
    }
}

impl<T, K, F> PriorityQueue<T, K, F> {
    /// Number of queued items.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear membership scan, O(n).
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(item)
    }

    /// Linear scan for any item matching `pred`, O(n).
    pub fn contains_by(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.data.iter().any(pred)
    }

    /// Current contents in heap-array order. Only the first item is
    /// guaranteed to be the minimum.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Drop every item, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<'a, T, K, F> IntoIterator for &'a PriorityQueue<T, K, F> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: std::fmt::Debug, K, F> std::fmt::Debug for PriorityQueue<T, K, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
