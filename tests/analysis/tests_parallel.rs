//! Snapshots answer the same from many threads as from one.

use std::sync::Arc;

use exalias::analysis::{ResolvedAlias, Snapshot};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn workspace_snapshot() -> Arc<Snapshot> {
    let mut host = analysis_from_sources(&[
        ("lib/my_app/repo.ex", REPO),
        ("lib/my_app/accounts/user.ex", ACCOUNTS),
        ("lib/my_app/server.ex", SERVER),
        ("lib/my_app/web.ex", WEB),
        ("lib/size.ex", PROTOCOL),
    ]);
    host.snapshot()
}

#[test]
fn test_parallel_resolution_matches_sequential() {
    let snapshot = workspace_snapshot();

    let sequential: Vec<ResolvedAlias> = {
        let analysis = snapshot.analysis();
        snapshot
            .file_ids()
            .flat_map(|file| analysis.resolve_all(file).unwrap())
            .collect()
    };
    let parallel = snapshot.resolve_all_par();

    assert!(!sequential.is_empty());
    assert_eq!(parallel, sequential);
}

#[test]
fn test_parallel_names_match_sequential() {
    let snapshot = workspace_snapshot();
    let analysis = snapshot.analysis();

    for (file, names) in snapshot.qualified_names_par() {
        assert_eq!(names, analysis.qualified_names(file).unwrap());
    }
}

#[test]
fn test_snapshot_outlives_host_changes() {
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO)]);
    let before = host.snapshot();

    host.set_file_content("lib/repo.ex", "defmodule MyApp.Other do\nend\n");
    let after = host.snapshot();

    assert!(before.index().contains("MyApp.Repo"));
    assert!(!after.index().contains("MyApp.Repo"));
    assert!(after.revision() > before.revision());

    let handle = std::thread::spawn(move || before.resolve_all_par().len());
    assert_eq!(handle.join().unwrap(), 1);
}
