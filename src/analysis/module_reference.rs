//! Concrete references resolved against the module index.

use crate::hir::{
    Reference, Resolution, canonical_name, fully_qualified_name, starts_from_current_module,
};
use crate::parser::{AliasDirective, AstNode, DoBlock, QualifiableAlias, SyntaxKind, SyntaxNode};

use super::Analysis;

/// Poly-variant reference of an outermost alias chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub(crate) element: SyntaxNode,
    pub(crate) targets: Vec<SyntaxNode>,
}

impl Reference for ModuleReference {
    fn element(&self) -> &SyntaxNode {
        &self.element
    }

    fn resolve(&self) -> Resolution {
        Resolution::Multi(self.targets.clone())
    }
}

/// Single-valued reference from an `alias` directive to its target chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveReference {
    pub(crate) element: SyntaxNode,
    pub(crate) target: Option<SyntaxNode>,
}

impl Reference for DirectiveReference {
    fn element(&self) -> &SyntaxNode {
        &self.element
    }

    fn resolve(&self) -> Resolution {
        Resolution::Single(self.target.clone())
    }
}

impl DirectiveReference {
    pub fn new(directive: &AliasDirective) -> Self {
        Self {
            element: directive.syntax().clone(),
            target: directive.target().map(|target| target.syntax().clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisReference {
    Module(ModuleReference),
    Directive(DirectiveReference),
}

impl Reference for AnalysisReference {
    fn element(&self) -> &SyntaxNode {
        match self {
            Self::Module(reference) => reference.element(),
            Self::Directive(reference) => reference.element(),
        }
    }

    fn resolve(&self) -> Resolution {
        match self {
            Self::Module(reference) => reference.resolve(),
            Self::Directive(reference) => reference.resolve(),
        }
    }
}

/// Candidates for `alias`, searching no further up than `max_scope`.
///
/// Lookup order:
/// 1. `alias` directives visible at the chain, nearest scope first and
///    latest directive first. A one-segment chain resolves to the directive
///    itself; a longer chain expands the directive's target and looks the
///    result up.
/// 2. `Enclosing.Name` for every enclosing modular definition, innermost first.
/// 3. `Name` as written.
///
/// The first step that applies decides the result, even when it is empty.
/// Steps 2 and 3 stop at the first non-empty lookup.
pub(crate) fn module_candidates(
    analysis: &Analysis<'_>,
    alias: &QualifiableAlias,
    max_scope: &SyntaxNode,
) -> Vec<SyntaxNode> {
    let Some(name) = fully_qualified_name(alias) else {
        tracing::debug!("[RESOLVE] '{}' has no qualified name", alias.name());
        return Vec::new();
    };
    if starts_from_current_module(alias) {
        return analysis.lookup_module(&name);
    }

    let scopes = scopes_up_to(alias.syntax(), max_scope);
    let (first, rest) = match name.split_once('.') {
        Some((first, rest)) => (first, Some(rest)),
        None => (name.as_str(), None),
    };

    if let Some(directive) = visible_directive(alias.syntax(), &scopes, first) {
        tracing::trace!("[RESOLVE] '{}' via alias directive", name);
        return match rest {
            None => vec![directive.syntax().clone()],
            Some(rest) => match directive.target().and_then(|target| fully_qualified_name(&target)) {
                Some(target) => analysis.lookup_module(&format!("{}.{}", target, rest)),
                None => Vec::new(),
            },
        };
    }

    let enclosing = scopes
        .iter()
        .filter_map(|scope| DoBlock::cast(scope.clone()))
        .filter_map(|block| block.owner())
        .filter_map(|module| canonical_name(&module));
    for outer in enclosing {
        let candidates = analysis.lookup_module(&format!("{}.{}", outer, name));
        if !candidates.is_empty() {
            return candidates;
        }
    }

    analysis.lookup_module(&name)
}

/// `node`'s ancestors, innermost first, up to and including `max_scope`.
fn scopes_up_to(node: &SyntaxNode, max_scope: &SyntaxNode) -> Vec<SyntaxNode> {
    let mut scopes = Vec::new();
    for ancestor in node.ancestors() {
        let reached = &ancestor == max_scope;
        scopes.push(ancestor);
        if reached {
            break;
        }
    }
    scopes
}

/// The latest directive declaring `name` that ends before `node` starts.
fn visible_directive(node: &SyntaxNode, scopes: &[SyntaxNode], name: &str) -> Option<AliasDirective> {
    let start = node.text_range().start();
    scopes
        .iter()
        .filter(|scope| matches!(scope.kind(), SyntaxKind::DO_BLOCK | SyntaxKind::SOURCE_FILE))
        .find_map(|scope| {
            scope
                .children()
                .filter_map(AliasDirective::cast)
                .filter(|directive| directive.syntax().text_range().end() <= start)
                .filter(|directive| directive.declared_name().as_deref() == Some(name))
                .last()
        })
}
