//! File lifecycle and error reporting of the analysis host.

use exalias::analysis::{AnalysisError, AnalysisHost};
use exalias::base::{FileId, TextSize};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_set_file_content_reports_parse_errors() {
    let mut host = AnalysisHost::new();
    let errors = host.set_file_content("lib/broken.ex", "defmodule Broken do\n");
    assert!(!errors.is_empty());
    // The file is loaded anyway
    assert!(host.has_file("lib/broken.ex"));
    assert_eq!(host.file_count(), 1);
}

#[test]
fn test_file_ids_are_stable_across_edits() {
    let mut host = AnalysisHost::new();
    host.set_file_content("lib/a.ex", "A");
    let file = host.file_id("lib/a.ex").unwrap();
    let revision = host.revision();

    host.set_file_content("lib/a.ex", "B");
    assert_eq!(host.file_id("lib/a.ex"), Some(file));
    assert!(host.revision() > revision);
    assert_eq!(host.file_path(file), Some("lib/a.ex"));
}

#[test]
fn test_edit_changes_resolution() {
    let client = "MyApp.Repo\n";
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/client.ex", client)]);
    assert!(resolve_last(&mut host, "lib/client.ex", client, "MyApp.Repo").module.is_some());

    host.set_file_content("lib/repo.ex", "defmodule MyApp.Store do\nend\n");
    assert!(resolve_last(&mut host, "lib/client.ex", client, "MyApp.Repo").module.is_none());
}

#[test]
fn test_remove_file() {
    let client = "MyApp.Repo\n";
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/client.ex", client)]);

    host.remove_file("lib/repo.ex").unwrap();
    assert!(!host.has_file("lib/repo.ex"));
    assert!(resolve_last(&mut host, "lib/client.ex", client, "MyApp.Repo").module.is_none());

    assert_eq!(
        host.remove_file("lib/repo.ex"),
        Err(AnalysisError::UnknownPath("lib/repo.ex".to_string()))
    );
}

#[test]
fn test_unknown_file_and_offset() {
    let (mut host, file) = analysis_from_source("Foo\n", "lib/foo.ex");
    let analysis = host.analysis();

    let missing = FileId::new(99);
    assert_eq!(
        analysis.resolve_alias_at(missing, TextSize::from(0)),
        Err(AnalysisError::UnknownFile(missing))
    );
    assert_eq!(
        analysis.resolve_alias_at(file, TextSize::from(100)),
        Err(AnalysisError::OffsetOutOfRange {
            file,
            offset: TextSize::from(100)
        })
    );
}

#[test]
fn test_offset_outside_any_chain() {
    let source = "defmodule Foo do\nend\n";
    let (mut host, file) = analysis_from_source(source, "lib/foo.ex");
    let analysis = host.analysis();
    let offset = TextSize::from(source.find("end").unwrap() as u32);
    assert_eq!(analysis.resolve_alias_at(file, offset), Ok(None));
}

#[test]
fn test_offset_at_chain_end_still_resolves() {
    let source = "defmodule Foo do\nend\nFoo\n";
    let (mut host, file) = analysis_from_source(source, "lib/foo.ex");
    let analysis = host.analysis();
    // Between `Foo` and the trailing newline
    let offset = TextSize::from((source.rfind("Foo").unwrap() + 3) as u32);
    let resolved = analysis.resolve_alias_at(file, offset).unwrap().unwrap();
    assert!(resolved.module.is_some());
}
