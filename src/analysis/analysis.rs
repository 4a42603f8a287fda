//! Per-thread view of a [`Snapshot`] that the resolver runs against.

use std::path::Path;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{FileId, ResolveConfig, TextRange, TextSize};
use crate::hir::{
    NodeLocation, Reference, ReferenceKey, ResolveHost, compute_reference, fully_qualified_name,
    fully_resolve, is_outermost_qualifiable_alias, maybe_modular_name_to_modular,
};
use crate::parser::{
    AliasDirective, AstNode, ModuleDefinition, NodePtr, QualifiableAlias, SyntaxKind, SyntaxNode,
};

use super::error::AnalysisError;
use super::host::Snapshot;
use super::module_reference::{
    AnalysisReference, DirectiveReference, ModuleReference, module_candidates,
};

/// An outermost alias chain and what it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAlias {
    pub file: FileId,
    /// Range of the whole chain
    pub range: TextRange,
    /// Fully-qualified name, when every qualifier can be named
    pub name: Option<String>,
    /// Node the walk stopped at (the chain itself when nothing resolved)
    pub terminal: NodeLocation,
    /// The modular definition the chain names, if any
    pub module: Option<NodeLocation>,
}

/// Red trees of one snapshot.
///
/// Not `Send`: every thread builds its own from [`Snapshot::analysis`].
pub struct Analysis<'a> {
    snapshot: &'a Snapshot,
    roots: FxHashMap<FileId, SyntaxNode>,
    files_by_root: FxHashMap<SyntaxNode, FileId>,
}

impl<'a> Analysis<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot) -> Self {
        let roots: FxHashMap<_, _> = snapshot
            .files()
            .map(|(file, green)| (file, SyntaxNode::new_root(green.clone())))
            .collect();
        let files_by_root = roots.iter().map(|(file, root)| (root.clone(), *file)).collect();
        Self {
            snapshot,
            roots,
            files_by_root,
        }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    // ==================== Nodes and locations ====================

    /// Root node of a file.
    pub fn file_root(&self, file: FileId) -> Result<&SyntaxNode, AnalysisError> {
        self.roots.get(&file).ok_or(AnalysisError::UnknownFile(file))
    }

    /// File containing `node`, if the node belongs to this analysis.
    pub fn file_of(&self, node: &SyntaxNode) -> Option<FileId> {
        let root = node.ancestors().last()?;
        self.files_by_root.get(&root).copied()
    }

    pub fn node(&self, location: &NodeLocation) -> Option<SyntaxNode> {
        location.ptr.to_node(self.roots.get(&location.file)?)
    }

    pub fn location(&self, node: &SyntaxNode) -> Option<NodeLocation> {
        Some(NodeLocation::new(self.file_of(node)?, node))
    }

    /// Definitions with exactly this canonical name.
    pub fn lookup_module(&self, name: &str) -> Vec<SyntaxNode> {
        self.snapshot
            .index()
            .lookup(name)
            .iter()
            .filter_map(|location| self.node(location))
            .collect()
    }

    // ==================== Resolution ====================

    /// Follow `node`'s references to a terminal node.
    pub fn fully_resolve(&self, node: &SyntaxNode) -> SyntaxNode {
        fully_resolve(self, node, None)
    }

    /// The modular definition `alias` names within `max_scope`.
    pub fn maybe_modular_name_to_modular(
        &self,
        alias: &QualifiableAlias,
        max_scope: &SyntaxNode,
    ) -> Option<ModuleDefinition> {
        maybe_modular_name_to_modular(self, alias, max_scope).and_then(ModuleDefinition::cast)
    }

    pub fn fully_qualified_name(&self, alias: &QualifiableAlias) -> Option<String> {
        fully_qualified_name(alias)
    }

    /// Every chain of a file that owns a reference, in source order.
    pub fn outermost_aliases(&self, file: FileId) -> Result<Vec<QualifiableAlias>, AnalysisError> {
        Ok(self
            .file_root(file)?
            .descendants()
            .filter_map(QualifiableAlias::cast)
            .filter(is_outermost_qualifiable_alias)
            .collect())
    }

    /// Range and fully-qualified name of every outermost chain of a file.
    pub fn qualified_names(
        &self,
        file: FileId,
    ) -> Result<Vec<(TextRange, Option<String>)>, AnalysisError> {
        Ok(self
            .outermost_aliases(file)?
            .iter()
            .map(|alias| (alias.syntax().text_range(), fully_qualified_name(alias)))
            .collect())
    }

    /// Resolve every outermost chain of a file.
    pub fn resolve_all(&self, file: FileId) -> Result<Vec<ResolvedAlias>, AnalysisError> {
        let root = self.file_root(file)?.clone();
        Ok(self
            .outermost_aliases(file)?
            .iter()
            .map(|alias| self.resolve_alias(file, alias, &root))
            .collect())
    }

    /// Resolve the outermost chain covering `offset`.
    ///
    /// `Ok(None)` when no alias chain is at the offset.
    pub fn resolve_alias_at(
        &self,
        file: FileId,
        offset: TextSize,
    ) -> Result<Option<ResolvedAlias>, AnalysisError> {
        let root = self.file_root(file)?.clone();
        if offset > root.text_range().end() {
            return Err(AnalysisError::OffsetOutOfRange { file, offset });
        }
        // Between two tokens, either side may be the alias
        let alias = root.token_at_offset(offset).find_map(|token| {
            token
                .parent_ancestors()
                .filter_map(QualifiableAlias::cast)
                .find(is_outermost_qualifiable_alias)
        });
        Ok(alias.map(|alias| self.resolve_alias(file, &alias, &root)))
    }

    fn resolve_alias(&self, file: FileId, alias: &QualifiableAlias, root: &SyntaxNode) -> ResolvedAlias {
        let reference = self.get_reference(alias, root);
        let terminal = fully_resolve(self, alias.syntax(), reference);
        let module = maybe_modular_name_to_modular(self, alias, root);
        ResolvedAlias {
            file,
            range: alias.syntax().text_range(),
            name: fully_qualified_name(alias),
            terminal: NodeLocation::new(self.file_of(&terminal).unwrap_or(file), &terminal),
            module: module.and_then(|node| self.location(&node)),
        }
    }
}

impl ResolveHost for Analysis<'_> {
    type Reference = AnalysisReference;

    fn config(&self) -> &ResolveConfig {
        self.snapshot.config()
    }

    fn step_limit(&self) -> usize {
        self.snapshot.step_limit()
    }

    fn reference(&self, node: &SyntaxNode) -> Option<AnalysisReference> {
        match node.kind() {
            SyntaxKind::ALIAS | SyntaxKind::QUALIFIED_ALIAS => {
                let alias = QualifiableAlias::cast(node.clone())?;
                let root = node.ancestors().last()?;
                self.get_reference(&alias, &root)
            }
            SyntaxKind::ALIAS_DIRECTIVE => AliasDirective::cast(node.clone())
                .map(|directive| AnalysisReference::Directive(DirectiveReference::new(&directive))),
            _ => None,
        }
    }

    fn module_reference(&self, alias: &QualifiableAlias, max_scope: &SyntaxNode) -> AnalysisReference {
        AnalysisReference::Module(ModuleReference {
            element: alias.syntax().clone(),
            targets: module_candidates(self, alias, max_scope),
        })
    }

    /// Memoized per revision in the snapshot's reference cache.
    fn get_reference(&self, alias: &QualifiableAlias, max_scope: &SyntaxNode) -> Option<AnalysisReference> {
        let Some(file) = self.file_of(alias.syntax()) else {
            return compute_reference(self, alias, max_scope);
        };
        let key = ReferenceKey {
            revision: self.snapshot.revision(),
            file,
            element: NodePtr::new(alias.syntax()),
            scope: NodePtr::new(max_scope),
        };
        let targets = self.snapshot.cache().get_or_compute(key, || {
            compute_reference(self, alias, max_scope).map(|reference| {
                reference
                    .resolve()
                    .candidates()
                    .iter()
                    .filter_map(|node| self.location(node))
                    .collect()
            })
        })?;
        Some(AnalysisReference::Module(ModuleReference {
            element: alias.syntax().clone(),
            targets: targets.iter().filter_map(|location| self.node(location)).collect(),
        }))
    }

    fn file_name(&self, scope: &SyntaxNode) -> Option<SmolStr> {
        let file = self.files_by_root.get(scope)?;
        let path = self.snapshot.file_path(*file)?;
        Path::new(path).file_name()?.to_str().map(SmolStr::new)
    }
}
