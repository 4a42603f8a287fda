//! Rowan-based parser for the Elixir alias surface language
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone, Send + Sync)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! Chains are left-associative and keep their `.` as a direct token child,
//! so `A.B.C` is `QUALIFIED_ALIAS(QUALIFIED_ALIAS(ACCESS_EXPRESSION(ALIAS) . ALIAS) . ALIAS)`.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod infix;
mod lexer;
mod node_ptr;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, tokenize};
pub use node_ptr::NodePtr;
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{ElixirLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
