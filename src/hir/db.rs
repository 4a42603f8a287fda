//! Salsa database definition and queries.

use crate::base::FileId;
use crate::parser::{self, Parse};

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a file.
///
/// Set this explicitly when a file is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
///
/// Memoizes parsing per file; queries are invalidated when their
/// `FileText` input changes.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {
        // Default no-op implementation
    }
}

impl RootDatabase {
    /// Create a new, empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file into a green tree plus syntax errors.
///
/// This is a tracked Salsa query - results are memoized and automatically
/// invalidated when the input `FileText` changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> Parse {
    let parse = parser::parse(file_text.text(db));
    tracing::trace!(
        "[PARSE] file {:?}: {} errors",
        file_text.file(db),
        parse.errors.len()
    );
    parse
}
