//! Fully-qualified names of alias chains and modular definitions.
//!
//! Names are derived from tree structure alone. The only computed qualifier
//! is `__MODULE__`, which stands for the canonical name of the enclosing
//! modular definition.

use crate::parser::{
    AccessExpression, Alias, AstNode, Call, DoBlock, ModularKind, ModuleDefinition,
    QualifiableAlias, QualifiedAlias, Qualifier, SyntaxNode,
};

/// Module every call without a receiver may come from
pub const KERNEL: &str = "Kernel";

/// Zero-arity built-in naming the current module
pub const CURRENT_MODULE: &str = "__MODULE__";

/// Dotted name of an alias chain, e.g. `Foo.Bar.Baz`.
///
/// `None` when any qualifier cannot be named: an arbitrary call, a
/// `__MODULE__` outside of a named modular definition, or an expression that
/// is not an alias.
pub fn fully_qualified_name(alias: &QualifiableAlias) -> Option<String> {
    match alias {
        QualifiableAlias::Alias(alias) => Some(alias.name().to_string()),
        QualifiableAlias::Qualified(qualified) => qualified_alias_name(qualified),
    }
}

fn qualified_alias_name(qualified: &QualifiedAlias) -> Option<String> {
    let qualifier_name = match Qualifier::classify(qualified.qualifier()?) {
        Qualifier::Call(call) if is_current_module(&call) => {
            enclosing_modular_macro_call(call.syntax()).and_then(|module| canonical_name(&module))
        }
        Qualifier::Call(_) => None,
        Qualifier::Alias(alias) => fully_qualified_name(&alias),
        Qualifier::Access(access) => wrapped_alias_name(&access),
        Qualifier::Other(_) => None,
    }?;

    let segment = qualified.segment()?;
    Some(format!("{}.{}", qualifier_name, segment.name()))
}

/// Whether `call` is `__MODULE__` (optionally as `Kernel.__MODULE__`) with no arguments
pub fn is_current_module(call: &Call) -> bool {
    is_calling(call, KERNEL, CURRENT_MODULE, 0)
}

/// Whether `call` invokes `module.function/arity`.
///
/// A call without a receiver counts as calling `Kernel`.
pub fn is_calling(call: &Call, module: &str, function: &str, arity: usize) -> bool {
    if call.function_name().as_deref() != Some(function) || call.arity() != arity {
        return false;
    }
    match call.receiver() {
        None => module == KERNEL,
        Some(receiver) => {
            let receiver_name = match Qualifier::classify(receiver) {
                Qualifier::Alias(QualifiableAlias::Alias(alias)) => Some(alias.name().to_string()),
                Qualifier::Access(access) => wrapped_alias_name(&access),
                _ => None,
            };
            receiver_name.as_deref() == Some(module)
        }
    }
}

/// Nearest modular definition whose `do` block contains `node`
pub fn enclosing_modular_macro_call(node: &SyntaxNode) -> Option<ModuleDefinition> {
    node.ancestors()
        .filter_map(DoBlock::cast)
        .find_map(|block| block.owner())
}

/// Canonical name of a modular definition.
///
/// Nested definitions are prefixed with their enclosing definition's name
/// unless their own name starts from `__MODULE__`. `defimpl P, for: T` is
/// named `P.T` regardless of nesting.
pub fn canonical_name(module: &ModuleDefinition) -> Option<String> {
    let name = module.name()?;
    let local = fully_qualified_name(&name)?;

    match module.modular_kind()? {
        ModularKind::Implementation => {
            let target = fully_qualified_name(&module.implementation_target()?)?;
            Some(format!("{}.{}", local, target))
        }
        ModularKind::Module | ModularKind::Protocol => {
            if starts_from_current_module(&name) {
                return Some(local);
            }
            match enclosing_modular_macro_call(module.syntax()).and_then(|outer| canonical_name(&outer)) {
                Some(outer) => Some(format!("{}.{}", outer, local)),
                None => Some(local),
            }
        }
    }
}

/// Whether the leftmost qualifier of the chain is `__MODULE__`
pub fn starts_from_current_module(alias: &QualifiableAlias) -> bool {
    let mut node = alias.syntax().clone();
    while let Some(qualified) = QualifiedAlias::cast(node.clone()) {
        match qualified.qualifier() {
            Some(qualifier) => node = qualifier,
            None => return false,
        }
    }
    Call::cast(node).is_some_and(|call| is_current_module(&call))
}

/// Name of a bare alias inside grouping wrappers, e.g. `(Foo)`
fn wrapped_alias_name(access: &AccessExpression) -> Option<String> {
    access
        .stripped()
        .and_then(Alias::cast)
        .map(|alias| alias.name().to_string())
}
