//! # lskit
//!
//! Traversal-and-matching core shared by the ls-family listing tools.
//!
//! lskit owns the three pieces with real algorithmic content: a generic
//! buffering container ([`Queue`]), a recursive directory scanner with type
//! classification, and a boolean wildcard-combinator language for filtering
//! names ([`match_expr`]). It does **not** own column layout, colour
//! rendering, config loading, or argument parsing — those belong to the
//! front-end utilities, which consume the [`Entry`] records produced here.
//!
//! # Quick Start
//!
//! ```rust
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), "").unwrap();
//! std::fs::write(dir.path().join("b.log"), "").unwrap();
//!
//! let mut listing = lskit::scan(format!("{}/*.txt", dir.path().display()))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(listing.found, 1);
//! listing.sort(None);
//! let shown = listing.process(|entry| {
//!     println!("{}", entry.name);
//!     true
//! });
//! assert_eq!(shown, 1);
//! ```
//!
//! # Combinator expressions
//!
//! The leaf of a scan path may be a flat boolean expression over glob atoms:
//! `&` is and, `|` is or, and a `^` prefix negates the atom it precedes.
//! Evaluation is strictly left to right with **no operator precedence**, and
//! a false `&` combination short-circuits — `"a|b&c"` means `(a|b)` then
//! `&c`. Existing search expressions depend on this order; it is a feature,
//! not a bug.
//!
//! ```rust
//! use lskit::{match_expr, ScanFlags};
//!
//! let f = ScanFlags::empty();
//! assert!(match_expr("notes.txt", "*.txt|*.md", f));
//! assert!(match_expr("draft.md", "*.md&^final*", f));
//! assert!(!match_expr("c", "a&b|c", f)); // short-circuits at the `&`
//! ```
//!
//! # Lifecycle
//!
//! `scan(path).run()` loads exactly one traversal into a [`Listing`];
//! [`Listing::sort`] optionally reorders it; [`Listing::process`] drains and
//! frees every entry exactly once. `process` takes the listing by value, so
//! a drained handle is unusable by construction.

#![forbid(unsafe_code)]

mod builder;
mod entry;
mod error;
mod flags;
mod listing;
mod pattern;
mod queue;
mod scanner;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScanBuilder;
pub use entry::{default_order, Entry, EntryKind};
pub use error::ScanError;
pub use flags::ScanFlags;
pub use listing::{Compare, Listing};
pub use pattern::{match_expr, match_pattern};
pub use queue::Queue;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ScanBuilder`] for `path`.
///
/// The path splits at its last separator into a base directory and a leaf
/// glob (or combinator expression); a trailing separator means `*`, and a
/// bare name scans the current working directory.
///
/// # Example
///
/// ```rust
/// use lskit::ScanFlags;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("sub")).unwrap();
/// std::fs::write(dir.path().join("x.rs"), "").unwrap();
///
/// let listing = lskit::scan(format!("{}/", dir.path().display()))
///     .types(ScanFlags::DIR)
///     .run()
///     .unwrap();
///
/// assert_eq!(listing.found, 1); // only the subdirectory survives the filter
/// ```
pub fn scan(path: impl Into<String>) -> ScanBuilder {
    ScanBuilder::new(path)
}
