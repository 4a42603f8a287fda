//! Fully-qualified names of chains, as seen through the analysis layer.

use exalias::hir::fully_qualified_name;
use exalias::parser::{AstNode, QualifiableAlias, parse};
use rstest::rstest;

use crate::helpers::analysis_helpers::*;

fn owner_names(source: &str) -> Vec<Option<String>> {
    let parse = parse(source);
    assert!(parse.ok(), "{:?}", parse.errors);
    parse
        .syntax()
        .descendants()
        .filter_map(QualifiableAlias::cast)
        .filter(exalias::hir::is_outermost_qualifiable_alias)
        .map(|alias| fully_qualified_name(&alias))
        .collect()
}

#[rstest]
#[case("Foo.Bar", "Foo.Bar")]
#[case("Foo.Bar.Baz", "Foo.Bar.Baz")]
#[case("Foo . Bar", "Foo.Bar")]
#[case("Foo.\n  Bar", "Foo.Bar")]
fn test_names_ignore_layout(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(owner_names(source), vec![Some(expected.to_string())]);
}

#[test]
fn test_current_module_substitution() {
    let source = "defmodule MyApp.Server do\n  __MODULE__.Worker\nend\n";
    let names = owner_names(source);
    assert_eq!(
        names,
        vec![
            Some("MyApp.Server".to_string()),
            Some("MyApp.Server.Worker".to_string()),
        ]
    );
}

#[test]
fn test_current_module_of_nested_definition() {
    let source = "defmodule MyApp do\n  defmodule Server do\n    __MODULE__.Worker\n  end\nend\n";
    assert_eq!(
        owner_names(source).last().cloned().flatten().as_deref(),
        Some("MyApp.Server.Worker")
    );
}

#[test]
fn test_unnamed_qualifiers() {
    assert_eq!(owner_names("__MODULE__.Worker"), vec![None]);
    assert_eq!(owner_names("config().Worker"), vec![None]);
}

#[test]
fn test_qualified_names_per_file() {
    let source = "defmodule A do\n  B.C\nend\n";
    let (mut host, file) = analysis_from_source(source, "lib/a.ex");
    let analysis = host.analysis();
    let names: Vec<_> = analysis
        .qualified_names(file)
        .unwrap()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    assert_eq!(names, vec![Some("A".to_string()), Some("B.C".to_string())]);
}
