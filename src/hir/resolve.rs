//! Fixpoint resolution of alias chains.
//!
//! # Walk
//!
//! Starting at a chain, references are followed one lookup at a time until a
//! terminal node is reached:
//!
//! ```text
//! Foo.Bar ──(module reference)──► alias Foo.Bar, as: X ──► defmodule Foo.Bar
//!   chain                           directive                 modular (stop)
//! ```
//!
//! - A modular definition always stops the walk.
//! - No candidates, ambiguous non-modular candidates, or a step back to the
//!   same node stop at the node the walk is on.
//! - Revisiting a node, or exceeding [`ResolveHost::step_limit`], also stops
//!   there; well-behaved lookups never trigger either.
//!
//! The walker only reads through [`ResolveHost`]; it knows nothing about
//! databases, caches, or files.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::reference::{Reference, Resolution, compute_reference};
use crate::base::{DEFAULT_MAX_RESOLVE_STEPS, ResolveConfig};
use crate::parser::{AstNode, QualifiableAlias, SyntaxKind, SyntaxNode};

// ============================================================================
// HOST
// ============================================================================

/// Capabilities the resolver consumes from the tree's owner.
pub trait ResolveHost {
    type Reference: Reference;

    fn config(&self) -> &ResolveConfig;

    /// Most lookup steps one walk may take.
    ///
    /// Hosts that know their workspace should size this to it; the config
    /// override always wins.
    fn step_limit(&self) -> usize {
        self.config()
            .max_resolve_steps
            .unwrap_or(DEFAULT_MAX_RESOLVE_STEPS)
    }

    /// The reference a node carries on its own, if any.
    fn reference(&self, node: &SyntaxNode) -> Option<Self::Reference>;

    /// Module lookup bound to an outermost chain and a scope boundary.
    fn module_reference(&self, alias: &QualifiableAlias, max_scope: &SyntaxNode) -> Self::Reference;

    /// Possibly memoized [`compute_reference`].
    fn get_reference(&self, alias: &QualifiableAlias, max_scope: &SyntaxNode) -> Option<Self::Reference> {
        compute_reference(self, alias, max_scope)
    }

    /// Whether a resolved node is a module-like definition.
    fn is_modular(&self, node: &SyntaxNode) -> bool {
        node.kind() == SyntaxKind::MODULE_DEFINITION
    }

    fn is_equivalent(&self, a: &SyntaxNode, b: &SyntaxNode) -> bool {
        a == b
    }

    /// File name of `scope` when it is a file root.
    fn file_name(&self, scope: &SyntaxNode) -> Option<SmolStr>;
}

// ============================================================================
// WALKER
// ============================================================================

/// Outcome of a single lookup step
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Continue(SyntaxNode),
    Stop(SyntaxNode),
}

fn step<H: ResolveHost + ?Sized>(host: &H, current: &SyntaxNode, resolution: Resolution) -> Step {
    match resolution {
        Resolution::Multi(results) => match results.as_slice() {
            [] => {
                tracing::debug!("[RESOLVE] no candidates for {:?}", current.kind());
                Step::Stop(current.clone())
            }
            [next] if host.is_modular(next) => Step::Stop(next.clone()),
            [next] if host.is_equivalent(next, current) => Step::Stop(current.clone()),
            [next] => Step::Continue(next.clone()),
            candidates => match candidates.iter().find(|candidate| host.is_modular(candidate)) {
                Some(modular) => Step::Stop(modular.clone()),
                None => {
                    tracing::debug!(
                        "[RESOLVE] {} ambiguous non-modular candidates, stopping",
                        candidates.len()
                    );
                    Step::Stop(current.clone())
                }
            },
        },
        Resolution::Single(None) => Step::Stop(current.clone()),
        Resolution::Single(Some(next)) if host.is_equivalent(&next, current) => {
            Step::Stop(current.clone())
        }
        Resolution::Single(Some(next)) => Step::Continue(next),
    }
}

/// Follow references from `node` until a terminal node is reached.
///
/// Never fails: in the worst case `node` itself is returned. Pass
/// `starting_reference` to skip the first lookup of `node`'s own reference.
pub fn fully_resolve<H: ResolveHost + ?Sized>(
    host: &H,
    node: &SyntaxNode,
    starting_reference: Option<H::Reference>,
) -> SyntaxNode {
    let max_steps = host.step_limit().max(1);
    let mut current = node.clone();
    let mut reference = starting_reference;
    let mut visited = FxHashSet::default();
    visited.insert(current.clone());

    for _ in 0..max_steps {
        let Some(current_reference) = reference.take().or_else(|| host.reference(&current)) else {
            return current;
        };

        match step(host, &current, current_reference.resolve()) {
            Step::Stop(terminal) => {
                tracing::trace!(
                    "[RESOLVE] stopped at {:?} {:?}",
                    terminal.kind(),
                    terminal.text_range()
                );
                return terminal;
            }
            Step::Continue(next) => {
                tracing::trace!(
                    "[RESOLVE] {:?} {:?} -> {:?} {:?}",
                    current_reference.element().kind(),
                    current_reference.element().text_range(),
                    next.kind(),
                    next.text_range()
                );
                if !visited.insert(next.clone()) {
                    tracing::debug!("[RESOLVE] cycle through {:?}, stopping", next.text_range());
                    return current;
                }
                current = next;
            }
        }
    }

    tracing::warn!(
        "[RESOLVE] gave up after {} steps at {:?} {:?}",
        max_steps,
        current.kind(),
        current.text_range()
    );
    current
}

/// Fully resolve `alias` from `starting_reference`, keeping only a modular result.
pub fn to_modular<H: ResolveHost + ?Sized>(
    host: &H,
    alias: &QualifiableAlias,
    starting_reference: H::Reference,
) -> Option<SyntaxNode> {
    let resolved = fully_resolve(host, alias.syntax(), Some(starting_reference));
    host.is_modular(&resolved).then_some(resolved)
}

/// The modular definition `alias` names when looked up within `max_scope`.
///
/// The root module's name inside its own defining file is never resolved, so
/// the file does not resolve its self-import into itself.
pub fn maybe_modular_name_to_modular<H: ResolveHost + ?Sized>(
    host: &H,
    alias: &QualifiableAlias,
    max_scope: &SyntaxNode,
) -> Option<SyntaxNode> {
    if is_recursive_kernel_import(host, alias, max_scope) {
        tracing::debug!("[RESOLVE] skipping self-reference of '{}'", alias.name());
        return None;
    }
    let reference = host.get_reference(alias, max_scope)?;
    to_modular(host, alias, reference)
}

fn is_recursive_kernel_import<H: ResolveHost + ?Sized>(
    host: &H,
    alias: &QualifiableAlias,
    max_scope: &SyntaxNode,
) -> bool {
    host.file_name(max_scope)
        .is_some_and(|file_name| host.config().is_kernel_self_reference(&file_name, &alias.name()))
}
