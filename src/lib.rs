//! # exalias-base
//!
//! Qualified alias resolution for Elixir-like sources: parsing, module
//! indexing, and fixpoint resolution of alias chains to their definitions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analysis  → AnalysisHost / Snapshot / Analysis, cached references
//!   ↓
//! hir       → Salsa database, module index, naming, fixpoint walker
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST, typed AST
//!   ↓
//! base      → Primitives (FileId, Revision, TextRange, configuration)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → analysis)
// ============================================================================

/// Foundation types: FileId, Revision, TextRange, ResolveConfig
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// High-level IR: Salsa database, module index, alias resolution
pub mod hir;

/// Analysis: host state, snapshots, resolution queries
pub mod analysis;

// Re-export foundation types
pub use base::{FileId, ResolveConfig, Revision, TextRange, TextSize};

// Re-export the main entry points
pub use analysis::{Analysis, AnalysisError, AnalysisHost, ResolvedAlias, Snapshot};
