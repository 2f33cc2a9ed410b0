use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tracing::{debug, warn};

use crate::entry::{Entry, EntryKind};
use crate::error::ScanError;
use crate::flags::ScanFlags;
use crate::listing::{Compare, Listing};
use crate::pattern::{match_expr, validate_expr};
use crate::queue::Queue;

// ---------------------------------------------------------------------------
// ScanOptions
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the scanner.
///
/// `pub(crate)` — not part of the public API. Callers configure these
/// via the builder methods (`.flags()`, `.max_depth()`).
pub(crate) struct ScanOptions {
    pub flags: ScanFlags,
    pub max_depth: usize,
}

/// Default bound on depth-first descent. Keeps a pathological real tree from
/// exhausting the native stack; overridable via the builder.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 128;

/// Directory names skipped during descent under [`ScanFlags::HIDE_VCS`].
const VCS_NAMES: [&str; 3] = ["CVS", ".git", ".svn"];

// ---------------------------------------------------------------------------
// Path parsing
// ---------------------------------------------------------------------------

/// Split a scan path into its base directory and leaf glob.
///
/// Everything after the last separator is the leaf (or `*` if the path ends
/// in a separator); everything up to and including the separator is the base.
/// A path with no separator scans the current working directory.
pub(crate) fn split_path(path: &str) -> (PathBuf, String) {
    match path.rfind(MAIN_SEPARATOR) {
        Some(i) => {
            let (base, leaf) = path.split_at(i + 1);
            let leaf = if leaf.is_empty() { "*" } else { leaf };
            (PathBuf::from(base), leaf.to_string())
        }
        None => (PathBuf::from("."), path.to_string()),
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute one scan over `path` with the given options.
///
/// This is the whole traversal — single-threaded, synchronous, depth-first.
/// Called by `ScanBuilder::run()` after the builder assembles its options.
pub(crate) fn run(
    path: &str,
    opts: ScanOptions,
    cmp: Option<Box<Compare>>,
) -> Result<Listing, ScanError> {
    if path.is_empty() {
        return Err(ScanError::InvalidPath(path.to_string()));
    }

    let (base, pattern) = split_path(path);
    validate_expr(&pattern).map_err(ScanError::InvalidPattern)?;

    // Entries carry an absolute directory prefix regardless of how the
    // caller spelled the scan path.
    let base = std::path::absolute(&base).map_err(|e| ScanError::Io {
        path: base.clone(),
        source: e,
    })?;

    let mut queue = Queue::new();
    let mut errors = Vec::new();
    let found = scan_dir(
        &base,
        Path::new(""),
        &pattern,
        &opts,
        0,
        &mut queue,
        &mut errors,
    );

    Ok(Listing::new(queue, found, errors, cmp))
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Scan one directory level, recursing depth-first where the flags allow.
/// Returns the number of entries retained at this level and below.
fn scan_dir(
    base: &Path,
    rel: &Path,
    pattern: &str,
    opts: &ScanOptions,
    depth: usize,
    queue: &mut Queue<Entry>,
    errors: &mut Vec<ScanError>,
) -> usize {
    let dir = base.join(rel);
    let reader = match fs::read_dir(&dir) {
        Ok(r) => r,
        Err(e) => {
            // Unreadable directories contribute nothing; the scan goes on.
            debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
            errors.push(io_error(dir, e));
            return 0;
        }
    };

    let mut found = 0;

    for item in reader {
        let item = match item {
            Ok(i) => i,
            Err(e) => {
                errors.push(io_error(dir.clone(), e));
                continue;
            }
        };

        let name = item.file_name().to_string_lossy().into_owned();

        // One lstat per candidate, shared by both branches. Symlinks are
        // never followed, so cycles cannot occur.
        let meta = fs::symlink_metadata(item.path());

        // Recursion branch: descend into visible subdirectories. The
        // recursive found-count lands in our total before this entry is
        // tested against the match branch.
        if opts.flags.contains(ScanFlags::RECURSE)
            && (opts.flags.contains(ScanFlags::SHOW_ALL) || !name.starts_with('.'))
        {
            if let Ok(m) = &meta {
                let vcs_hidden = opts.flags.contains(ScanFlags::HIDE_VCS)
                    && VCS_NAMES.contains(&name.as_str());
                if m.file_type().is_dir() && !vcs_hidden {
                    if depth + 1 > opts.max_depth {
                        errors.push(ScanError::DepthLimit(item.path()));
                    } else {
                        found += scan_dir(
                            base,
                            &rel.join(&name),
                            pattern,
                            opts,
                            depth + 1,
                            queue,
                            errors,
                        );
                    }
                }
            }
        }

        // Match branch, independent of recursion: filter by name, classify,
        // filter by type, retain.
        if !match_expr(&name, pattern, opts.flags) {
            continue;
        }

        let (kind, metadata) = match meta {
            Ok(m) => (classify(&m), Some(m)),
            Err(e) => {
                // Keep the matched entry even without metadata, but surface
                // the cause to the caller.
                warn!(path = %item.path().display(), error = %e, "stat failed on matched entry");
                errors.push(ScanError::Stat {
                    path: item.path(),
                    source: e,
                });
                (EntryKind::File, None)
            }
        };

        if (kind.flag() & opts.flags.types()).is_empty() {
            continue;
        }

        let entry = Entry {
            name,
            dir: base.to_path_buf(),
            rel: rel.to_path_buf(),
            kind,
            metadata,
            digest: None,
            version: None,
        };

        // Running maximum name width, for later columnar layout.
        if queue.scalar() < entry.width() as u64 {
            queue.set_scalar(entry.width() as u64);
        }

        queue.push_back(entry);
        found += 1;
    }

    found
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Map an lstat result into exactly one [`EntryKind`].
#[cfg(unix)]
fn classify(meta: &fs::Metadata) -> EntryKind {
    use std::os::unix::fs::{FileTypeExt, PermissionsExt};

    let ft = meta.file_type();
    if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_symlink() {
        EntryKind::Symlink
    } else if ft.is_block_device() || ft.is_char_device() {
        EntryKind::Device
    } else if ft.is_socket() {
        EntryKind::Socket
    } else if ft.is_fifo() {
        EntryKind::Fifo
    } else if meta.permissions().mode() & 0o111 != 0 {
        EntryKind::ExecFile
    } else {
        EntryKind::File
    }
}

#[cfg(not(unix))]
fn classify(meta: &fs::Metadata) -> EntryKind {
    let ft = meta.file_type();
    if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_symlink() {
        EntryKind::Symlink
    } else {
        EntryKind::File
    }
}

// ---------------------------------------------------------------------------
// Map std::io::Error to ScanError
// ---------------------------------------------------------------------------

fn io_error(path: PathBuf, source: std::io::Error) -> ScanError {
    match source.kind() {
        std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path),
        std::io::ErrorKind::NotFound => ScanError::NotFound(path),
        _ => ScanError::Io { path, source },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_name_scans_cwd() {
        let (base, glob) = split_path("*.txt");
        assert_eq!(base, PathBuf::from("."));
        assert_eq!(glob, "*.txt");
    }

    #[test]
    fn split_at_last_separator() {
        let (base, glob) = split_path("/usr/share/doc/*.gz");
        assert_eq!(base, PathBuf::from("/usr/share/doc/"));
        assert_eq!(glob, "*.gz");
    }

    #[test]
    fn split_trailing_separator_means_star() {
        let (base, glob) = split_path("/etc/");
        assert_eq!(base, PathBuf::from("/etc/"));
        assert_eq!(glob, "*");
    }

    #[test]
    fn split_root() {
        let (base, glob) = split_path("/");
        assert_eq!(base, PathBuf::from("/"));
        assert_eq!(glob, "*");
    }
}
