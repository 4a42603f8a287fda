//! Foundation types for the exalias toolchain.
//!
//! - [`FileId`] - Workspace file identifiers
//! - [`Revision`] - Workspace revision counter used to key memoized references
//! - [`ResolveConfig`] - Tunables for the resolution walker
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other exalias modules.

mod config;
mod file_id;

pub use config::{DEFAULT_MAX_RESOLVE_STEPS, ResolveConfig};
pub use file_id::{FileId, Revision};

pub use text_size::{TextRange, TextSize};
