use std::cmp::Ordering;

use crate::entry::Entry;
use crate::error::ScanError;
use crate::flags::ScanFlags;
use crate::listing::{Compare, Listing};
use crate::scanner::{run, ScanOptions, DEFAULT_MAX_DEPTH};

// ---------------------------------------------------------------------------
// ScanBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a scan.
///
/// Created via [`lskit::scan()`](crate::scan). Configure with chained
/// builder methods, then call [`run()`](ScanBuilder::run) to load the
/// listing.
///
/// # Example
///
/// ```rust,ignore
/// let listing = lskit::scan("src/*.rs|*.toml")
///     .types(ScanFlags::NON_EXEC_FILE | ScanFlags::EXEC_FILE)
///     .recursive()
///     .hide_vcs()
///     .run()?;
/// ```
pub struct ScanBuilder {
    path: String,
    flags: ScanFlags,
    comparator: Option<Box<Compare>>,
    max_depth: usize,
}

impl ScanBuilder {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flags: ScanFlags::TYPES,
            comparator: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    /// Replace the whole flag set — type-filter bits and modifiers alike.
    pub fn flags(mut self, flags: ScanFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Restrict retention to the given type-filter bits, leaving the
    /// behaviour modifiers untouched. All seven types are retained by
    /// default.
    pub fn types(mut self, types: ScanFlags) -> Self {
        self.flags = (self.flags - ScanFlags::TYPES) | types.types();
        self
    }

    /// Show dot-entries: wildcards may match a leading dot and hidden
    /// directories are descended into.
    pub fn show_all(mut self) -> Self {
        self.flags |= ScanFlags::SHOW_ALL;
        self
    }

    /// Match case-sensitively. Matching is case-folded by default.
    pub fn use_case(mut self) -> Self {
        self.flags |= ScanFlags::USE_CASE;
        self
    }

    /// Descend into subdirectories, matching the same leaf glob at every
    /// level.
    pub fn recursive(mut self) -> Self {
        self.flags |= ScanFlags::RECURSE;
        self
    }

    /// Skip version-control directories (`CVS`, `.git`, `.svn`) during
    /// descent.
    pub fn hide_vcs(mut self) -> Self {
        self.flags |= ScanFlags::HIDE_VCS;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Capture a comparator for later sorting. `Listing::sort(None)` uses
    /// it; without one, sorting falls back to the default order
    /// (directories first, case-insensitive names).
    pub fn comparator<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&Entry, &Entry) -> Ordering + 'static,
    {
        self.comparator = Some(Box::new(cmp));
        self
    }

    /// Bound recursive descent to `depth` levels below the scan base.
    /// Branches past the bound are pruned and recorded as
    /// [`ScanError::DepthLimit`] in the listing's errors.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the scan and return the loaded listing.
    ///
    /// Blocks until the traversal completes.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration problems: an empty scan path or
    /// a leaf expression whose glob atoms do not compile. Filesystem
    /// failures during traversal never abort the scan — they accumulate in
    /// [`Listing::errors`].
    pub fn run(self) -> Result<Listing, ScanError> {
        let opts = ScanOptions {
            flags: self.flags,
            max_depth: self.max_depth,
        };
        run(&self.path, opts, self.comparator)
    }
}
