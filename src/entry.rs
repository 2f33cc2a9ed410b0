use std::cmp::Ordering;
use std::fs::Metadata;
use std::path::PathBuf;

use crate::flags::ScanFlags;

/// One discovered filesystem object.
///
/// Produced by the scanner, buffered in a [`Queue`](crate::Queue), handed to
/// the caller's visitor during drain. All owned fields — including the
/// consumer slots — are released when the entry drops, exactly once.
///
/// Invariants: `dir` is absolute; `name` never contains a path separator;
/// `rel` accumulates only through recursive descent and is empty at the scan
/// root.
pub struct Entry {
    /// Leaf name of the object.
    pub name: String,

    /// Absolute directory prefix of the scan base.
    pub dir: PathBuf,

    /// Prefix relative to the scan base, grown one component per level of
    /// recursive descent.
    pub rel: PathBuf,

    /// What kind of object this is.
    pub kind: EntryKind,

    /// Raw lstat metadata. `None` when the stat failed but the entry was
    /// retained anyway; consumers must cope with its absence.
    pub metadata: Option<Metadata>,

    /// Content digest slot. Zeroed by the scanner; an external checksum
    /// collaborator fills it in place via [`Listing::get_mut`](crate::Listing::get_mut).
    pub digest: Option<String>,

    /// Parsed version tuple slot, filled the same way as `digest`.
    pub version: Option<Vec<u32>>,
}

impl Entry {
    /// Full path: directory prefix, relative prefix, then name.
    pub fn full_path(&self) -> PathBuf {
        self.dir.join(&self.rel).join(&self.name)
    }

    /// Display width of the name, for columnar layout.
    pub fn width(&self) -> usize {
        self.name.chars().count()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Classification of an [`Entry`], derived from its lstat file type.
///
/// Exactly one kind per entry. Symlinks are classified as symlinks, never
/// followed to their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file without any execute bit.
    File,

    /// Regular file with at least one execute bit.
    ExecFile,

    /// Directory.
    Dir,

    /// Symbolic link.
    Symlink,

    /// Block or character device.
    Device,

    /// Unix domain socket.
    Socket,

    /// Named pipe.
    Fifo,
}

impl EntryKind {
    /// The [`ScanFlags`] type-filter bit this kind maps to.
    pub fn flag(self) -> ScanFlags {
        match self {
            EntryKind::File => ScanFlags::NON_EXEC_FILE,
            EntryKind::ExecFile => ScanFlags::EXEC_FILE,
            EntryKind::Dir => ScanFlags::DIR,
            EntryKind::Symlink => ScanFlags::SYMLINK,
            EntryKind::Device => ScanFlags::DEVICE,
            EntryKind::Socket => ScanFlags::SOCKET,
            EntryKind::Fifo => ScanFlags::FIFO,
        }
    }
}

/// Default listing order: directories before everything else, ties broken
/// case-insensitively by name, raw name as the final deterministic
/// tie-break.
pub fn default_order(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let folded = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            if folded == Ordering::Equal {
                a.name.cmp(&b.name)
            } else {
                folded
            }
        }
    }
}
