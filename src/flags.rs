use bitflags::bitflags;

bitflags! {
    /// Entry-type filter bits plus scan behaviour modifiers, combined into
    /// the single bitset every front-end utility passes to [`scan`](crate::scan).
    ///
    /// The low bits select which classified kinds are retained; an entry
    /// survives the type filter only if its [`EntryKind`](crate::EntryKind)
    /// maps to one of the requested bits. The high bits change how the
    /// scanner and matcher behave.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScanFlags: u32 {
        // ── Type filter ───────────────────────────────────────────────────

        /// Regular files without any execute bit.
        const NON_EXEC_FILE = 1 << 0;

        /// Directories.
        const DIR = 1 << 1;

        /// Symbolic links (never followed during classification).
        const SYMLINK = 1 << 2;

        /// Regular files with at least one execute bit.
        const EXEC_FILE = 1 << 3;

        /// Block or character devices.
        const DEVICE = 1 << 4;

        /// Unix domain sockets.
        const SOCKET = 1 << 5;

        /// Named pipes.
        const FIFO = 1 << 6;

        /// Every type-filter bit. The builder starts from this.
        const TYPES = Self::NON_EXEC_FILE.bits()
            | Self::DIR.bits()
            | Self::SYMLINK.bits()
            | Self::EXEC_FILE.bits()
            | Self::DEVICE.bits()
            | Self::SOCKET.bits()
            | Self::FIFO.bits();

        // ── Behaviour modifiers ───────────────────────────────────────────

        /// Dot-entries are visible: `*` may match a leading dot, and hidden
        /// directories are descended into during recursion.
        const SHOW_ALL = 1 << 8;

        /// Case-sensitive matching. Absent this bit, names and patterns are
        /// compared case-folded.
        const USE_CASE = 1 << 9;

        /// Descend into subdirectories depth-first, matching the same leaf
        /// glob at every level.
        const RECURSE = 1 << 10;

        /// Skip version-control directories (`CVS`, `.git`, `.svn`) during
        /// recursive descent.
        const HIDE_VCS = 1 << 11;
    }
}

impl ScanFlags {
    /// The type-filter portion of this bitset.
    pub fn types(self) -> ScanFlags {
        self & ScanFlags::TYPES
    }
}
