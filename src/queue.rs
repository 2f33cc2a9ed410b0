use std::cmp::Ordering;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// Generic ordered buffering container.
///
/// Supports FIFO/LIFO insertion, incremental sorted insertion, bulk resort,
/// indexed reads, and one caller-defined scalar slot. The scanner uses it to
/// buffer [`Entry`](crate::Entry) records between load and drain, but the
/// container itself is payload-agnostic.
///
/// The scalar slot is a deliberate escape hatch: an opaque per-queue integer
/// the producer and consumer agree on out of band. The scanner stores the
/// maximum observed name width there so a columnar renderer can size itself
/// without a second pass.
///
/// The queue is a buffer, not a work queue — no blocking, no condition
/// variables. To share one across threads, wrap it in a `std::sync::Mutex`.
pub struct Queue<T> {
    items: VecDeque<T>,
    scalar: u64,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            scalar: 0,
        }
    }

    /// Append `item` at the tail. O(1) amortized.
    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Prepend `item` at the head. O(1) amortized.
    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// Insert `item` immediately before the first existing element that
    /// orders after it, scanning linearly from the front; append at the
    /// tail if no such element exists.
    ///
    /// Equal elements keep the existing one first, so repeated sorted
    /// insertion is stable.
    pub fn insert_sorted<F>(&mut self, item: T, cmp: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let pos = self
            .items
            .iter()
            .position(|existing| cmp(&item, existing) == Ordering::Less);
        match pos {
            Some(i) => self.items.insert(i, item),
            None => self.items.push_back(item),
        }
    }

    /// Remove and return the head element, or `None` if the queue is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Read the element at `index` without removing it.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable indexed read. Collaborators that attach lazily-computed
    /// fields to buffered entries (digests, version info) go through this.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Number of buffered elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Store the caller-defined scalar.
    pub fn set_scalar(&mut self, value: u64) {
        self.scalar = value;
    }

    /// Read the caller-defined scalar. Zero until set.
    pub fn scalar(&self) -> u64 {
        self.scalar
    }

    /// Resort the whole queue in one pass: flatten into a contiguous slice,
    /// comparison-sort it, keep the chain in the sorted order. Cheaper than
    /// repeated sorted insertion for large batches produced all at once.
    ///
    /// The sort is stable.
    pub fn sort_all<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.make_contiguous().sort_by(cmp);
    }

    /// Iterate over buffered elements front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Mutably iterate over buffered elements front to back.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = Queue::new();
        q.push_back(1);
        q.push_back(2);
        q.push_back(3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
        assert_eq!(q.pop_front(), Some(3));
        assert_eq!(q.pop_front(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn push_front_prepends() {
        let mut q = Queue::new();
        q.push_back(2);
        q.push_front(1);
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
    }

    #[test]
    fn insert_sorted_keeps_order() {
        let mut q = Queue::new();
        for n in [5, 1, 4, 2, 3] {
            q.insert_sorted(n, |a, b| a.cmp(b));
        }
        let drained: Vec<_> = std::iter::from_fn(|| q.pop_front()).collect();
        assert_eq!(drained, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_sorted_appends_equal_after_existing() {
        let mut q = Queue::new();
        q.insert_sorted((1, "first"), |a, b| a.0.cmp(&b.0));
        q.insert_sorted((1, "second"), |a, b| a.0.cmp(&b.0));
        assert_eq!(q.pop_front(), Some((1, "first")));
        assert_eq!(q.pop_front(), Some((1, "second")));
    }

    #[test]
    fn sort_all_resorts_in_place() {
        let mut q = Queue::new();
        for n in [3, 1, 2] {
            q.push_back(n);
        }
        q.sort_all(|a, b| a.cmp(b));
        assert_eq!(q.get(0), Some(&1));
        assert_eq!(q.get(1), Some(&2));
        assert_eq!(q.get(2), Some(&3));
    }

    #[test]
    fn indexed_reads() {
        let mut q = Queue::new();
        q.push_back("a".to_string());
        q.push_back("b".to_string());
        assert_eq!(q.get(1).map(String::as_str), Some("b"));
        assert_eq!(q.get(2), None);
        if let Some(s) = q.get_mut(0) {
            s.push('!');
        }
        assert_eq!(q.get(0).map(String::as_str), Some("a!"));
    }

    #[test]
    fn scalar_slot() {
        let mut q: Queue<i32> = Queue::new();
        assert_eq!(q.scalar(), 0);
        q.set_scalar(17);
        assert_eq!(q.scalar(), 17);
    }
}
