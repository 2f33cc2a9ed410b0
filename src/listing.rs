use std::cmp::Ordering;
use std::fmt;

use crate::entry::{default_order, Entry};
use crate::error::ScanError;
use crate::queue::Queue;

/// Total order over two entries, supplied at load or sort time.
pub type Compare = dyn Fn(&Entry, &Entry) -> Ordering;

/// The output of a completed load: the buffered entries, the found-count,
/// and every non-fatal failure met along the way.
///
/// `errors` is always populated — unreadable subtrees and failed stats
/// degrade the scan rather than aborting it, and the causes accumulate here
/// as `(path, cause)` records instead of vanishing.
///
/// A listing is consumed by [`process`](Listing::process); once drained it is
/// gone, so a stale handle cannot be reused.
pub struct Listing {
    queue: Queue<Entry>,

    /// Number of entries retained by the scan, recursion included.
    pub found: usize,

    /// Non-fatal failures encountered during the scan, in discovery order.
    /// All of them satisfy [`ScanError::is_recoverable`].
    pub errors: Vec<ScanError>,

    /// Comparator captured at load time, used by `sort(None)`.
    cmp: Option<Box<Compare>>,
}

impl fmt::Debug for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listing")
            .field("len", &self.queue.len())
            .field("found", &self.found)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Listing {
    pub(crate) fn new(
        queue: Queue<Entry>,
        found: usize,
        errors: Vec<ScanError>,
        cmp: Option<Box<Compare>>,
    ) -> Self {
        Self {
            queue,
            found,
            errors,
            cmp,
        }
    }

    /// Number of entries currently buffered.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Read the entry at `index` in current order.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.queue.get(index)
    }

    /// Mutable indexed read. External collaborators fill the digest and
    /// version slots through this before the listing is drained.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.queue.get_mut(index)
    }

    /// Iterate over buffered entries in current order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.queue.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.queue.iter_mut()
    }

    /// Widest entry name seen by the scan, in characters. Zero for an empty
    /// listing. Lets a columnar renderer size itself without a second pass.
    pub fn max_name_width(&self) -> usize {
        self.queue.scalar() as usize
    }

    /// Resort the buffered entries.
    ///
    /// `None` falls back to the comparator captured at load time, or to
    /// [`default_order`] if none was given: directories first, then
    /// case-insensitive name order.
    pub fn sort(&mut self, cmp: Option<&Compare>) {
        match cmp.or(self.cmp.as_deref()) {
            Some(c) => self.queue.sort_all(|a, b| c(a, b)),
            None => self.queue.sort_all(default_order),
        }
    }

    /// Drain the listing: pop every entry in current order, invoke the
    /// visitor, and drop the entry — owned fields and attached slots are
    /// freed exactly once regardless of what the visitor returns.
    ///
    /// Consumes `self`; the handle cannot be touched again after draining.
    /// Returns the number of entries the visitor answered `true` for.
    pub fn process<F>(mut self, mut visitor: F) -> usize
    where
        F: FnMut(&mut Entry) -> bool,
    {
        let mut kept = 0;
        while let Some(mut entry) = self.queue.pop_front() {
            if visitor(&mut entry) {
                kept += 1;
            }
        }
        kept
    }
}
