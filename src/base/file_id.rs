/// Identifier of a file loaded into an [`AnalysisHost`](crate::analysis::AnalysisHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Workspace revision.
///
/// Bumped on every file change. Memoized references are keyed by the revision
/// they were computed in, so a new revision never observes stale entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The revision following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}
