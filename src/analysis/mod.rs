//! Analysis layer: workspace state, snapshots, and resolution queries.
//!
//! - [`AnalysisHost`]: owns the salsa database, loaded files and module index
//! - [`Snapshot`]: immutable, thread-safe state of one revision
//! - [`Analysis`]: per-thread view of a snapshot, implementing
//!   [`ResolveHost`](crate::hir::ResolveHost) over the module index

#[allow(clippy::module_inception)]
mod analysis;
mod error;
mod host;
mod module_reference;

pub use analysis::{Analysis, ResolvedAlias};
pub use error::AnalysisError;
pub use host::{AnalysisHost, Snapshot};
pub use module_reference::{AnalysisReference, DirectiveReference, ModuleReference};
