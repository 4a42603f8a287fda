//! Workspace-wide index of modular definitions by canonical name.
//!
//! The index is the lookup side of alias resolution: a chain like
//! `MyApp.Accounts.User` is resolved by turning it into a dotted name and
//! asking the index which `MODULE_DEFINITION` nodes carry that canonical name.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::naming::canonical_name;
use crate::base::FileId;
use crate::parser::{AstNode, ModuleDefinition, NodePtr, SyntaxNode};

// ============================================================================
// NODE LOCATION
// ============================================================================

/// A node somewhere in the workspace.
///
/// `Send + Sync`, so it can cross thread boundaries where red tree nodes
/// cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeLocation {
    pub file: FileId,
    pub ptr: NodePtr,
}

impl NodeLocation {
    pub fn new(file: FileId, node: &SyntaxNode) -> Self {
        Self {
            file,
            ptr: NodePtr::new(node),
        }
    }
}

// ============================================================================
// MODULE INDEX
// ============================================================================

/// Canonical module name -> definitions carrying that name.
///
/// A name defined more than once (in one file or across files) maps to every
/// definition, ordered by file and then by position, so candidate sets do not
/// depend on the order files were loaded in.
#[derive(Clone, Debug, Default)]
pub struct ModuleIndex {
    /// Index by canonical name (IndexMap preserves insertion order).
    by_name: IndexMap<SmolStr, Vec<NodeLocation>>,
    /// Index by file -> canonical names defined there.
    by_file: FxHashMap<FileId, Vec<SmolStr>>,
}

impl ModuleIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a set of file roots.
    pub fn build<'a>(files: impl IntoIterator<Item = (FileId, &'a SyntaxNode)>) -> Self {
        let mut index = Self::new();
        for (file, root) in files {
            index.add_file(file, root);
        }
        index
    }

    /// Index every modular definition of a file, replacing what the file had before.
    pub fn add_file(&mut self, file: FileId, root: &SyntaxNode) {
        self.remove_file(file);

        let mut names = Vec::new();
        for module in root.descendants().filter_map(ModuleDefinition::cast) {
            // Definitions whose name depends on an unnamed qualifier are unreachable by name
            let Some(name) = canonical_name(&module) else {
                continue;
            };
            let name = SmolStr::new(name);
            let locations = self.by_name.entry(name.clone()).or_default();
            locations.push(NodeLocation::new(file, module.syntax()));
            locations.sort_by_key(|loc| (loc.file, loc.ptr.range().start()));
            names.push(name);
        }

        tracing::debug!(
            "[INDEX] file {:?}: {} modular definitions",
            file,
            names.len()
        );
        self.by_file.insert(file, names);
    }

    /// Remove every definition contributed by a file.
    pub fn remove_file(&mut self, file: FileId) {
        let Some(names) = self.by_file.remove(&file) else {
            return;
        };
        for name in names {
            let now_empty = match self.by_name.get_mut(&name) {
                Some(locations) => {
                    locations.retain(|loc| loc.file != file);
                    locations.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.by_name.shift_remove(&name);
            }
        }
    }

    /// Definitions with exactly this canonical name.
    pub fn lookup(&self, name: &str) -> &[NodeLocation] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All canonical names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(SmolStr::as_str)
    }

    /// Canonical names defined in a file.
    pub fn file_modules(&self, file: FileId) -> &[SmolStr] {
        self.by_file.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct canonical names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
