//! Memoized references are computed once per revision.

use exalias::hir::ResolveHost;
use exalias::parser::AstNode;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_repeated_queries_hit_the_cache() {
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/server.ex", SERVER)]);
    let file = host.file_id("lib/server.ex").unwrap();
    let snapshot = host.snapshot();
    let analysis = snapshot.analysis();

    analysis.resolve_all(file).unwrap();
    let misses = snapshot.cache().misses();
    let hits = snapshot.cache().hits();
    assert!(misses > 0);

    analysis.resolve_all(file).unwrap();
    assert_eq!(snapshot.cache().misses(), misses);
    assert!(snapshot.cache().hits() > hits);
}

#[test]
fn test_cache_is_shared_between_analyses_of_a_snapshot() {
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/server.ex", SERVER)]);
    let file = host.file_id("lib/server.ex").unwrap();
    let snapshot = host.snapshot();

    let first = snapshot.analysis().resolve_all(file).unwrap();
    let misses = snapshot.cache().misses();
    let second = snapshot.analysis().resolve_all(file).unwrap();

    assert_eq!(first, second);
    assert_eq!(snapshot.cache().misses(), misses);
}

#[test]
fn test_new_revision_prunes_stale_entries() {
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/server.ex", SERVER)]);
    let file = host.file_id("lib/server.ex").unwrap();
    host.analysis().resolve_all(file).unwrap();
    assert!(!host.cache().is_empty());

    host.set_file_content("lib/repo.ex", "defmodule MyApp.Repo do\nend\n# touched\n");
    let snapshot = host.snapshot();
    assert!(snapshot.cache().is_empty());
}

#[test]
fn test_non_outermost_alias_has_no_reference() {
    let (mut host, file) = analysis_from_source("A.B.C\n", "lib/abc.ex");
    let analysis = host.analysis();
    let root = analysis.file_root(file).unwrap().clone();
    let inner = root
        .descendants()
        .filter_map(exalias::parser::QualifiableAlias::cast)
        .find(|alias| alias.name() == "A.B")
        .unwrap();
    assert!(analysis.get_reference(&inner, &root).is_none());
}
