//! AnalysisHost and Snapshot: owned, mutable workspace state and its
//! immutable, shareable views.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! host.set_file_content("lib/app.ex", "defmodule App do\nend");
//!
//! // Query on this thread
//! let analysis = host.analysis();
//! let resolved = analysis.resolve_alias_at(file_id, offset)?;
//!
//! // Or hand a snapshot to worker threads
//! let snapshot = host.snapshot();
//! let names = snapshot.qualified_names_par();
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use rowan::GreenNode;
use rustc_hash::FxHashMap;
use salsa::Setter;
use smol_str::SmolStr;

use crate::base::{FileId, ResolveConfig, Revision, TextRange};
use crate::hir::{FileText, ModuleIndex, ReferenceCache, RootDatabase, parse_file};
use crate::parser::{SyntaxError, SyntaxKind, SyntaxNode};

use super::analysis::{Analysis, ResolvedAlias};
use super::error::AnalysisError;

/// Lookup steps granted on top of the workspace-derived bound
const RESOLVE_STEP_SLACK: usize = 16;

struct HostFile {
    path: SmolStr,
    text: FileText,
    /// `alias` directives in the current text
    directives: usize,
}

/// Owns all mutable state for alias resolution.
///
/// Apply changes via `set_file_content()` and `remove_file()`, then read a
/// consistent view via `analysis()` or `snapshot()`.
pub struct AnalysisHost {
    db: RootDatabase,
    /// Loaded files, in load order
    files: IndexMap<FileId, HostFile>,
    /// Map from file path to FileId
    file_id_map: FxHashMap<SmolStr, FileId>,
    next_file_id: u32,
    /// Canonical module names of every loaded file
    module_index: ModuleIndex,
    revision: Revision,
    config: ResolveConfig,
    cache: Arc<ReferenceCache>,
    /// Snapshot of the current revision; `None` once a change invalidates it
    snapshot: Option<Arc<Snapshot>>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::with_config(ResolveConfig::default())
    }

    pub fn with_config(config: ResolveConfig) -> Self {
        Self {
            db: RootDatabase::new(),
            files: IndexMap::new(),
            file_id_map: FxHashMap::default(),
            next_file_id: 0,
            module_index: ModuleIndex::new(),
            revision: Revision::default(),
            config,
            cache: Arc::new(ReferenceCache::new()),
            snapshot: None,
        }
    }

    /// Set the content of a file, parsing it and re-indexing its modules.
    ///
    /// Returns parse errors if any; the file is loaded either way.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Vec<SyntaxError> {
        let existing = self
            .file_id_map
            .get(path)
            .and_then(|file| self.files.get(file))
            .map(|host_file| host_file.text);
        let file_text = match existing {
            Some(file_text) => {
                file_text.set_text(&mut self.db).to(content.to_string());
                file_text
            }
            None => {
                let file = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                let file_text = FileText::new(&self.db, file, content.to_string());
                let path = SmolStr::new(path);
                self.file_id_map.insert(path.clone(), file);
                self.files.insert(
                    file,
                    HostFile {
                        path,
                        text: file_text,
                        directives: 0,
                    },
                );
                file_text
            }
        };

        let parse = parse_file(&self.db, file_text);
        let file = file_text.file(&self.db);
        let root = parse.syntax();
        let errors = parse.errors.clone();
        self.module_index.add_file(file, &root);
        if let Some(host_file) = self.files.get_mut(&file) {
            host_file.directives = root
                .descendants()
                .filter(|node| node.kind() == SyntaxKind::ALIAS_DIRECTIVE)
                .count();
        }
        self.bump_revision();

        tracing::debug!(
            "[HOST] set {} ({:?}): {} parse errors",
            path,
            file,
            errors.len()
        );
        errors
    }

    /// Unload a file.
    pub fn remove_file(&mut self, path: &str) -> Result<(), AnalysisError> {
        let file = self
            .file_id_map
            .remove(path)
            .ok_or_else(|| AnalysisError::unknown_path(path))?;
        self.files.shift_remove(&file);
        self.module_index.remove_file(file);
        self.bump_revision();
        tracing::debug!("[HOST] removed {} ({:?})", path, file);
        Ok(())
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.next();
        self.snapshot = None;
    }

    /// Check if a file is loaded.
    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map.contains_key(path)
    }

    /// Get the number of files loaded.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get the FileId for a path, if it is loaded.
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    /// Get the path for a FileId, if it is loaded.
    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|f| f.path.as_str())
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// The reference cache shared by every snapshot of this host.
    pub fn cache(&self) -> &Arc<ReferenceCache> {
        &self.cache
    }

    /// Thread-safe view of the current revision.
    pub fn snapshot(&mut self) -> Arc<Snapshot> {
        Arc::clone(self.current_snapshot())
    }

    /// Query view of the current revision on this thread.
    pub fn analysis(&mut self) -> Analysis<'_> {
        self.current_snapshot().analysis()
    }

    fn current_snapshot(&mut self) -> &Arc<Snapshot> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => Arc::new(self.build_snapshot()),
        };
        self.snapshot.insert(snapshot)
    }

    fn build_snapshot(&self) -> Snapshot {
        let files = self
            .files
            .iter()
            .map(|(&file, host_file)| {
                let green = parse_file(&self.db, host_file.text).green.clone();
                (
                    file,
                    SnapshotFile {
                        path: host_file.path.clone(),
                        green,
                    },
                )
            })
            .collect();

        // References of older revisions can never be asked for again
        self.cache.retain_revision(self.revision);

        let step_limit = self.derived_step_limit();
        tracing::debug!(
            "[HOST] snapshot at {:?}: {} files, {} modules, {} resolve steps",
            self.revision,
            self.files.len(),
            self.module_index.len(),
            step_limit
        );
        Snapshot {
            revision: self.revision,
            config: self.config.clone(),
            step_limit,
            files,
            index: self.module_index.clone(),
            cache: Arc::clone(&self.cache),
        }
    }

    /// Walk bound for this workspace.
    ///
    /// Without cycles a walk alternates between chains and the directives
    /// they name, visiting each directive once, before it ends on a module.
    fn derived_step_limit(&self) -> usize {
        if let Some(steps) = self.config.max_resolve_steps {
            return steps;
        }
        let directives: usize = self.files.values().map(|f| f.directives).sum();
        2 * directives + self.module_index.len() + RESOLVE_STEP_SLACK
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

#[derive(Debug)]
struct SnapshotFile {
    path: SmolStr,
    green: GreenNode,
}

/// Immutable state of one revision.
///
/// `Send + Sync`: holds green trees only. Each thread queries it through its
/// own [`Analysis`].
#[derive(Debug)]
pub struct Snapshot {
    revision: Revision,
    config: ResolveConfig,
    step_limit: usize,
    files: IndexMap<FileId, SnapshotFile>,
    index: ModuleIndex,
    cache: Arc<ReferenceCache>,
}

impl Snapshot {
    /// Build red trees for querying on the current thread.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis::new(self)
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Most lookup steps one walk over this snapshot may take.
    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    pub fn cache(&self) -> &ReferenceCache {
        &self.cache
    }

    /// Files with their green trees, in load order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &GreenNode)> {
        self.files.iter().map(|(&file, f)| (file, &f.green))
    }

    pub fn file_ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.keys().copied()
    }

    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|f| f.path.as_str())
    }

    /// Root node of a file, built fresh.
    pub fn file_root(&self, file: FileId) -> Result<SyntaxNode, AnalysisError> {
        self.files
            .get(&file)
            .map(|f| SyntaxNode::new_root(f.green.clone()))
            .ok_or(AnalysisError::UnknownFile(file))
    }

    /// Fully-qualified names of every outermost chain, per file, computed in parallel.
    pub fn qualified_names_par(&self) -> Vec<(FileId, Vec<(TextRange, Option<String>)>)> {
        let files: Vec<FileId> = self.file_ids().collect();
        files
            .into_par_iter()
            .filter_map(|file| {
                let analysis = self.analysis();
                analysis.qualified_names(file).ok().map(|names| (file, names))
            })
            .collect()
    }

    /// Resolve every outermost chain of every file, in parallel.
    pub fn resolve_all_par(&self) -> Vec<ResolvedAlias> {
        let files: Vec<FileId> = self.file_ids().collect();
        let per_file: Vec<Vec<ResolvedAlias>> = files
            .into_par_iter()
            .map(|file| {
                let analysis = self.analysis();
                analysis.resolve_all(file).unwrap_or_default()
            })
            .collect();
        per_file.into_iter().flatten().collect()
    }
}
