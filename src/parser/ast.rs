//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.

use smol_str::SmolStr;

use super::infix;
use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn directives(&self) -> impl Iterator<Item = AliasDirective> + '_ {
        self.0.children().filter_map(AliasDirective::cast)
    }

    pub fn module_definitions(&self) -> impl Iterator<Item = ModuleDefinition> + '_ {
        self.0.children().filter_map(ModuleDefinition::cast)
    }
}

// ============================================================================
// Modular definitions
// ============================================================================

/// Which macro introduced a modular definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModularKind {
    Module,
    Protocol,
    Implementation,
}

ast_node!(ModuleDefinition, MODULE_DEFINITION);

impl ModuleDefinition {
    pub fn modular_kind(&self) -> Option<ModularKind> {
        let keyword = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_modular_keyword())?;
        match keyword.kind() {
            SyntaxKind::DEFMODULE_KW => Some(ModularKind::Module),
            SyntaxKind::DEFPROTOCOL_KW => Some(ModularKind::Protocol),
            SyntaxKind::DEFIMPL_KW => Some(ModularKind::Implementation),
            _ => None,
        }
    }

    /// The alias naming the module (or the protocol, for `defimpl`)
    pub fn name(&self) -> Option<QualifiableAlias> {
        self.0.children().find_map(QualifiableAlias::cast)
    }

    /// The `for:` target of a `defimpl`
    pub fn implementation_target(&self) -> Option<QualifiableAlias> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::FOR_CLAUSE)?
            .children()
            .find_map(QualifiableAlias::cast)
    }

    pub fn body(&self) -> Option<DoBlock> {
        self.0.children().find_map(DoBlock::cast)
    }
}

ast_node!(DoBlock, DO_BLOCK);

impl DoBlock {
    pub fn directives(&self) -> impl Iterator<Item = AliasDirective> + '_ {
        self.0.children().filter_map(AliasDirective::cast)
    }

    /// The modular definition owning this block
    pub fn owner(&self) -> Option<ModuleDefinition> {
        self.0.parent().and_then(ModuleDefinition::cast)
    }
}

// ============================================================================
// Alias directive
// ============================================================================

ast_node!(AliasDirective, ALIAS_DIRECTIVE);

impl AliasDirective {
    /// The aliased chain
    pub fn target(&self) -> Option<QualifiableAlias> {
        self.0.children().find_map(QualifiableAlias::cast)
    }

    /// The `as:` name, if given
    pub fn as_alias(&self) -> Option<Alias> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::AS_CLAUSE)?
            .children()
            .find_map(Alias::cast)
    }

    /// Name this directive makes available: the `as:` name, or else the
    /// last segment of the target.
    pub fn declared_name(&self) -> Option<SmolStr> {
        if let Some(alias) = self.as_alias() {
            return Some(alias.name());
        }
        match self.target()? {
            QualifiableAlias::Alias(alias) => Some(alias.name()),
            QualifiableAlias::Qualified(qualified) => qualified.segment().map(|s| s.name()),
        }
    }
}

// ============================================================================
// Aliases
// ============================================================================

ast_node!(Alias, ALIAS);

impl Alias {
    /// The bare segment text
    pub fn name(&self) -> SmolStr {
        first_token(&self.0, SyntaxKind::UPPER_IDENT)
            .map(|t| SmolStr::new(t.text()))
            .unwrap_or_default()
    }
}

ast_node!(QualifiedAlias, QUALIFIED_ALIAS);

impl QualifiedAlias {
    /// Left operand of the `.`
    pub fn qualifier(&self) -> Option<SyntaxNode> {
        let children = infix::children(&self.0);
        let operator = infix::operator_index(&children)?;
        infix::left_operand(&children, operator)
    }

    /// Right operand of the `.`
    pub fn segment(&self) -> Option<Alias> {
        let children = infix::children(&self.0);
        let operator = infix::operator_index(&children)?;
        infix::right_operand(&children, operator).and_then(Alias::cast)
    }
}

/// A bare alias or a qualified alias chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QualifiableAlias {
    Alias(Alias),
    Qualified(QualifiedAlias),
}

impl AstNode for QualifiableAlias {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::ALIAS | SyntaxKind::QUALIFIED_ALIAS)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ALIAS => Some(Self::Alias(Alias(node))),
            SyntaxKind::QUALIFIED_ALIAS => Some(Self::Qualified(QualifiedAlias(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Alias(n) => n.syntax(),
            Self::Qualified(n) => n.syntax(),
        }
    }
}

impl QualifiableAlias {
    /// Source text of the chain without trivia, e.g. `__MODULE__.Worker`
    pub fn name(&self) -> String {
        self.syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect()
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(AccessExpression, ACCESS_EXPRESSION);

impl AccessExpression {
    /// The wrapped expression, with nested wrappers removed
    pub fn stripped(&self) -> Option<SyntaxNode> {
        let mut inner = self.0.first_child()?;
        while let Some(access) = AccessExpression::cast(inner.clone()) {
            inner = access.0.first_child()?;
        }
        Some(inner)
    }
}

ast_node!(Call, CALL);

impl Call {
    /// Receiver of a remote call (`Kernel` in `Kernel.__MODULE__`)
    pub fn receiver(&self) -> Option<SyntaxNode> {
        let children = infix::children(&self.0);
        let operator = infix::operator_index(&children)?;
        infix::left_operand(&children, operator)
    }

    pub fn function_name(&self) -> Option<SmolStr> {
        first_token(&self.0, SyntaxKind::IDENT).map(|t| SmolStr::new(t.text()))
    }

    pub fn arity(&self) -> usize {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::ARG_LIST)
            .map(|args| args.children().filter(|c| c.kind() != SyntaxKind::ERROR).count())
            .unwrap_or(0)
    }
}

/// Left side of a qualified alias, classified for name building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    Call(Call),
    Alias(QualifiableAlias),
    Access(AccessExpression),
    Other(SyntaxNode),
}

impl Qualifier {
    pub fn classify(node: SyntaxNode) -> Self {
        match node.kind() {
            SyntaxKind::CALL => Self::Call(Call(node)),
            SyntaxKind::ALIAS | SyntaxKind::QUALIFIED_ALIAS => match QualifiableAlias::cast(node.clone()) {
                Some(alias) => Self::Alias(alias),
                None => Self::Other(node),
            },
            SyntaxKind::ACCESS_EXPRESSION => Self::Access(AccessExpression(node)),
            _ => Self::Other(node),
        }
    }
}
