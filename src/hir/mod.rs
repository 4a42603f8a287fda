//! High-level IR (HIR): alias resolution over the parsed tree.
//!
//! ## Key Types
//!
//! - [`RootDatabase`]: Salsa database memoizing parses
//! - [`ModuleIndex`]: Workspace-wide canonical name → definitions index
//! - [`ResolveHost`]: Capabilities the resolver reads through
//! - [`Reference`] / [`Resolution`]: One lookup step and its result
//! - [`ReferenceCache`]: Compute-once memo keyed by revision
//!
//! ## Query Layers
//!
//! ```text
//! file_text(file)                 ← INPUT: raw source text
//!     │
//!     ▼
//! parse_file(file)                ← Lossless CST (per-file)
//!     │
//!     ▼
//! module_index                    ← canonical_name of every definition
//!     │
//!     ▼
//! get_reference(alias, scope)     ← outermost chains only, memoized
//!     │
//!     ▼
//! fully_resolve(alias)            ← fixpoint walk to a terminal node
//! ```

mod cache;
mod db;
mod module_index;
mod naming;
mod reference;
mod resolve;

pub use cache::{CachedTargets, ReferenceCache, ReferenceKey};
pub use db::{FileText, RootDatabase, parse_file};
pub use module_index::{ModuleIndex, NodeLocation};
pub use naming::{
    CURRENT_MODULE, KERNEL, canonical_name, enclosing_modular_macro_call, fully_qualified_name,
    is_calling, is_current_module, starts_from_current_module,
};
pub use reference::{
    Reference, Resolution, compute_reference, is_outermost, is_outermost_qualifiable_alias,
};
pub use resolve::{ResolveHost, fully_resolve, maybe_modular_name_to_modular, to_modular};
