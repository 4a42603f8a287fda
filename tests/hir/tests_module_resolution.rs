//! Resolution of chains to modular definitions across files.

use exalias::TextSize;
use exalias::parser::SyntaxKind;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn workspace() -> exalias::AnalysisHost {
    analysis_from_sources(&[
        ("lib/my_app/repo.ex", REPO),
        ("lib/my_app/accounts/user.ex", ACCOUNTS),
        ("lib/my_app/server.ex", SERVER),
        ("lib/my_app/web.ex", WEB),
    ])
}

// =============================================================================
// GLOBAL LOOKUP
// =============================================================================

#[test]
fn test_resolve_global_module() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/server.ex", SERVER, "MyApp.Repo");

    assert_eq!(resolved.name.as_deref(), Some("MyApp.Repo"));
    assert_eq!(resolved.module, Some(resolved.terminal));
    assert_eq!(resolved.terminal.file, host.file_id("lib/my_app/repo.ex").unwrap());
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Repo")
    );
}

#[test]
fn test_unknown_module_stays_on_chain() {
    let source = "defmodule App do\n  Missing.Thing\nend\n";
    let (mut host, file) = analysis_from_source(source, "lib/app.ex");
    let resolved = resolve_last(&mut host, "lib/app.ex", source, "Missing.Thing");

    assert_eq!(resolved.module, None);
    assert_eq!(resolved.terminal.file, file);
    assert_eq!(resolved.terminal.ptr.kind(), SyntaxKind::QUALIFIED_ALIAS);
    assert_eq!(resolved.terminal.ptr.range(), resolved.range);
}

#[test]
fn test_definition_name_resolves_to_itself() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/repo.ex", REPO, "MyApp.Repo");
    assert_eq!(resolved.terminal.ptr.kind(), SyntaxKind::MODULE_DEFINITION);
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Repo")
    );
}

// =============================================================================
// CURRENT MODULE AND NESTING
// =============================================================================

#[test]
fn test_resolve_current_module_chain() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/server.ex", SERVER, "__MODULE__.Worker");
    assert_eq!(resolved.name.as_deref(), Some("MyApp.Server.Worker"));
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Server.Worker")
    );
}

#[test]
fn test_resolve_through_enclosing_definition() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/server.ex", SERVER, "Worker");
    assert_eq!(resolved.name.as_deref(), Some("Worker"));
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Server.Worker")
    );
}

#[test]
fn test_resolve_implementation() {
    let (mut host, _) = analysis_from_source(PROTOCOL, "lib/size.ex");
    let resolved = resolve_last(&mut host, "lib/size.ex", PROTOCOL, "Size.Map");
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("Size.Map")
    );
}

// =============================================================================
// ALIAS DIRECTIVES
// =============================================================================

#[test]
fn test_resolve_through_alias_directive() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/web.ex", WEB, "User");

    // alias chain -> directive -> directive target -> definition
    assert_eq!(resolved.name.as_deref(), Some("User"));
    assert_eq!(
        resolved.terminal.file,
        host.file_id("lib/my_app/accounts/user.ex").unwrap()
    );
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Accounts.User")
    );
}

#[test]
fn test_resolve_through_as_alias_with_suffix() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/web.ex", WEB, "Account.Profile");
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("MyApp.Accounts.User.Profile")
    );
}

#[test]
fn test_expanded_alias_without_definition_is_unresolved() {
    let mut host = workspace();
    let resolved = resolve_last(&mut host, "lib/my_app/web.ex", WEB, "Account.Missing");
    assert_eq!(resolved.module, None);
    assert_eq!(resolved.terminal.ptr.range(), resolved.range);
}

#[test]
fn test_directive_only_applies_after_it() {
    let source = "defmodule App do\n  Repo\n  alias MyApp.Repo\nend\n";
    let mut host = analysis_from_sources(&[("lib/repo.ex", REPO), ("lib/app.ex", source)]);
    let file = host.file_id("lib/app.ex").unwrap();
    let offset = TextSize::from(source.find("Repo").unwrap() as u32);
    let analysis = host.analysis();
    let resolved = analysis.resolve_alias_at(file, offset).unwrap().unwrap();
    assert_eq!(resolved.name.as_deref(), Some("Repo"));
    assert_eq!(resolved.module, None);
}

#[test]
fn test_alias_of_missing_module_terminates_on_target() {
    let source = "alias Nowhere\nNowhere\n";
    let (mut host, _) = analysis_from_source(source, "lib/app.ex");
    let resolved = resolve_last(&mut host, "lib/app.ex", source, "Nowhere");

    assert_eq!(resolved.module, None);
    // Walk went through the directive onto its target, which resolves no further
    assert_eq!(resolved.terminal.ptr.kind(), SyntaxKind::ALIAS);
    assert_eq!(
        resolved.terminal.ptr.range(),
        exalias::TextRange::at(TextSize::from(6), TextSize::from(7))
    );
}

// =============================================================================
// AMBIGUITY AND THE KERNEL GUARD
// =============================================================================

#[test]
fn test_duplicate_definitions_prefer_first_modular() {
    let client = "Dup\n";
    let mut host = analysis_from_sources(&[
        ("lib/a.ex", "defmodule Dup do\nend\n"),
        ("lib/b.ex", "defmodule Dup do\nend\n"),
        ("lib/client.ex", client),
    ]);
    let resolved = resolve_last(&mut host, "lib/client.ex", client, "Dup");
    assert_eq!(
        resolved.module.map(|location| location.file),
        host.file_id("lib/a.ex")
    );
}

#[test]
fn test_kernel_never_resolves_inside_kernel_file() {
    let source = "defmodule Kernel do\nend\n\nKernel\n";

    let (mut host, _) = analysis_from_source(source, "lib/elixir/kernel.ex");
    let resolved = resolve_last(&mut host, "lib/elixir/kernel.ex", source, "Kernel");
    assert_eq!(resolved.module, None);
    // The walk itself still reaches the definition
    assert_eq!(resolved.terminal.ptr.kind(), SyntaxKind::MODULE_DEFINITION);

    let (mut host, _) = analysis_from_source(source, "lib/elixir/other.ex");
    let resolved = resolve_last(&mut host, "lib/elixir/other.ex", source, "Kernel");
    assert!(resolved.module.is_some());
}

// =============================================================================
// LONG ALIAS CHAINS
// =============================================================================

/// `Target`, then `alias Target, as: A0` and `alias A{i-1}, as: A{i}` up to `A{last}`.
fn renaming_chain(last: usize) -> String {
    let mut source = String::from("defmodule Target do\nend\nalias Target, as: A0\n");
    for i in 1..=last {
        source.push_str(&format!("alias A{}, as: A{}\n", i - 1, i));
    }
    source.push_str(&format!("A{}\n", last));
    source
}

#[test]
fn test_long_directive_chain_reaches_module() {
    let source = renaming_chain(39);
    let (mut host, _) = analysis_from_source(&source, "lib/chain.ex");
    assert!(host.snapshot().step_limit() > 2 * 40);

    let resolved = resolve_last(&mut host, "lib/chain.ex", &source, "A39");
    assert_eq!(resolved.terminal.ptr.kind(), SyntaxKind::MODULE_DEFINITION);
    assert_eq!(
        resolved_module_name(&mut host, &resolved).as_deref(),
        Some("Target")
    );
}

#[test]
fn test_configured_step_bound_overrides_workspace_size() {
    let source = renaming_chain(39);
    let mut host =
        exalias::AnalysisHost::with_config(exalias::ResolveConfig::default().with_max_resolve_steps(8));
    host.set_file_content("lib/chain.ex", &source);
    assert_eq!(host.snapshot().step_limit(), 8);

    let resolved = resolve_last(&mut host, "lib/chain.ex", &source, "A39");
    assert_eq!(resolved.module, None);
}
