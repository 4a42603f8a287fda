//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (aliases, identifiers, keywords, punctuation).
/// Nodes are composite (module definitions, alias chains, calls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    UPPER_IDENT, // Foo
    IDENT,       // foo, __MODULE__
    KEYWORD_KEY, // as:, for:
    ATOM,        // :ok
    INTEGER,     // 42
    STRING,      // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    DOT,     // .
    COMMA,   // ,
    L_PAREN, // (
    R_PAREN, // )

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    DEFMODULE_KW,
    DEFPROTOCOL_KW,
    DEFIMPL_KW,
    ALIAS_KW,
    DO_KW,
    END_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    MODULE_DEFINITION,
    ALIAS_DIRECTIVE,
    AS_CLAUSE,
    FOR_CLAUSE,
    DO_BLOCK,
    ALIAS,
    QUALIFIED_ALIAS,
    ACCESS_EXPRESSION,
    CALL,
    ARG_LIST,
    LITERAL,

    /// Lexer error token or parser recovery node
    ERROR,

    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::DEFMODULE_KW as u16) && (self as u16) <= (Self::END_KW as u16)
    }

    /// Keywords that open a modular definition
    pub fn is_modular_keyword(self) -> bool {
        matches!(
            self,
            Self::DEFMODULE_KW | Self::DEFPROTOCOL_KW | Self::DEFIMPL_KW
        )
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::ATOM | Self::INTEGER | Self::STRING)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElixirLanguage {}

impl rowan::Language for ElixirLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ElixirLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ElixirLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ElixirLanguage>;
