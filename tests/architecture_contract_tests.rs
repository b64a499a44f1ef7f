//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, find_lines_containing_except_files,
    find_non_export_lines_in_mod_files};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "axum::",
            "teloxide::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_and_application_do_not_reach_adapters() {
    for dir in ["src/port", "src/application"] {
        let hits = find_lines_containing(
            dir,
            &["crate::adapter", "crate::infrastructure", "diesel::", "axum::", "teloxide::"],
        );
        assert!(hits.is_empty(), "found adapter imports in {dir}: {hits:#?}");
    }
}

#[test]
fn telegram_client_is_confined_to_the_runner() {
    let hits = find_lines_containing_except_files(
        "src",
        &["teloxide::"],
        &["src/adapter/inbound/telegram/runner.rs"],
    );

    assert!(
        hits.is_empty(),
        "teloxide used outside the feature-gated runner: {hits:#?}"
    );
}

#[test]
fn diesel_stays_in_the_sqlite_adapter() {
    let hits = find_lines_containing("src/adapter/inbound", &["diesel::"]);
    assert!(hits.is_empty(), "found diesel in inbound adapters: {hits:#?}");
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn inbound_surfaces_share_only_the_domain() {
    for (dir, forbidden) in [
        ("src/adapter/inbound/http", ["inbound::telegram", "inbound::cli"]),
        ("src/adapter/inbound/telegram", ["inbound::http", "inbound::cli"]),
    ] {
        let hits = find_lines_containing(dir, &forbidden);
        assert!(hits.is_empty(), "found cross-adapter imports in {dir}: {hits:#?}");
    }

    let hits = find_lines_containing_except_files(
        "src/adapter/inbound/cli",
        &["inbound::http", "inbound::telegram"],
        &["src/adapter/inbound/cli/run.rs"],
    );
    assert!(
        hits.is_empty(),
        "only the run command may start other surfaces: {hits:#?}"
    );
}
