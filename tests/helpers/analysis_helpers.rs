//! Helpers for setting up analysis hosts and inspecting resolutions.

use exalias::analysis::{Analysis, AnalysisHost, ResolvedAlias};
use exalias::base::{FileId, TextSize};
use exalias::hir::{NodeLocation, canonical_name};
use exalias::parser::{AstNode, ModuleDefinition};

/// Creates an AnalysisHost with a single file.
pub fn analysis_from_source(source: &str, filename: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::new();
    let errors = host.set_file_content(filename, source);
    assert!(
        errors.is_empty(),
        "Parse errors in '{}': {:?}",
        filename,
        errors
    );
    let file_id = host
        .file_id(filename)
        .expect("File should be loaded after set_file_content");
    (host, file_id)
}

/// Creates an AnalysisHost with multiple files, loaded in order.
pub fn analysis_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, content) in files {
        let errors = host.set_file_content(path, content);
        assert!(
            errors.is_empty(),
            "Parse errors in '{}': {:?}",
            path,
            errors
        );
    }
    host
}

/// Offset of the last occurrence of `needle` in `source`.
pub fn last_offset(source: &str, needle: &str) -> TextSize {
    let index = source
        .rfind(needle)
        .unwrap_or_else(|| panic!("'{}' not found in source", needle));
    TextSize::from(index as u32)
}

/// Resolve the chain at the last occurrence of `needle` in `path`.
pub fn resolve_last(host: &mut AnalysisHost, path: &str, source: &str, needle: &str) -> ResolvedAlias {
    let file = host.file_id(path).expect("file should be loaded");
    let analysis = host.analysis();
    analysis
        .resolve_alias_at(file, last_offset(source, needle))
        .expect("file and offset should be valid")
        .unwrap_or_else(|| panic!("no alias chain at '{}'", needle))
}

/// Canonical name of the modular definition at `location`.
pub fn module_name(analysis: &Analysis<'_>, location: &NodeLocation) -> String {
    let node = analysis
        .node(location)
        .expect("location should map to a node");
    let module = ModuleDefinition::cast(node).expect("location should be a module definition");
    canonical_name(&module).expect("module should have a canonical name")
}

/// Canonical name of the module a resolution landed on, if any.
pub fn resolved_module_name(host: &mut AnalysisHost, resolved: &ResolvedAlias) -> Option<String> {
    let analysis = host.analysis();
    resolved
        .module
        .as_ref()
        .map(|location| module_name(&analysis, location))
}
