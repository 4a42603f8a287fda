//! References owned by qualified alias chains.
//!
//! Only the outermost node of a chain owns a reference; the inner segments of
//! `A.B.C` defer to the chain as a whole.

use crate::parser::{AstNode, QualifiableAlias, SyntaxKind, SyntaxNode};

use super::resolve::ResolveHost;

/// Result of one resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Single-valued reference: at most one target.
    Single(Option<SyntaxNode>),
    /// Poly-variant reference: zero or more candidates, in lookup order.
    Multi(Vec<SyntaxNode>),
}

impl Resolution {
    /// Candidate nodes regardless of arity.
    pub fn candidates(&self) -> &[SyntaxNode] {
        match self {
            Self::Single(Some(node)) => std::slice::from_ref(node),
            Self::Single(None) => &[],
            Self::Multi(nodes) => nodes,
        }
    }
}

/// What a node points to.
pub trait Reference {
    /// The node owning this reference.
    fn element(&self) -> &SyntaxNode;

    /// Perform one lookup step.
    fn resolve(&self) -> Resolution;
}

/// Whether `node` owns the reference of its chain.
///
/// Neither the parent nor the grandparent may be a qualifiable alias: the
/// parent check excludes tail segments and inner chains, the grandparent
/// check excludes the first segment, which sits inside an access wrapper.
pub fn is_outermost(node: &SyntaxNode) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    if QualifiableAlias::can_cast(parent.kind()) {
        return false;
    }
    !parent
        .parent()
        .is_some_and(|grand_parent| QualifiableAlias::can_cast(grand_parent.kind()))
}

pub fn is_outermost_qualifiable_alias(alias: &QualifiableAlias) -> bool {
    is_outermost(alias.syntax())
}

/// Uncached reference of an alias chain bounded by `max_scope`.
pub fn compute_reference<H: ResolveHost + ?Sized>(
    host: &H,
    alias: &QualifiableAlias,
    max_scope: &SyntaxNode,
) -> Option<H::Reference> {
    if !is_outermost_qualifiable_alias(alias) {
        return None;
    }
    // `as:` names are declarations, not uses
    if alias
        .syntax()
        .parent()
        .is_some_and(|parent| parent.kind() == SyntaxKind::AS_CLAUSE)
    {
        return None;
    }
    tracing::trace!("[RESOLVE] reference for '{}'", alias.name());
    Some(host.module_reference(alias, max_scope))
}
