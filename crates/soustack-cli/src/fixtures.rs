//! `soustack fixtures` — conformance run over a fixture suite.
//!
//! Fixture files encode their expected outcome in the filename: `.valid.`
//! must pass validation, `.invalid.` must fail, and anything else is a hard
//! failure with a dedicated diagnostic. This is how the validator itself is
//! kept honest against a vendored suite of known-good and known-bad recipes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use soustack_core::load_registry;

use crate::report::{emit_json, FixturesPayload};

/// Glob used to discover fixture recipes beneath the fixtures directory.
pub const FIXTURE_GLOB: &str = "**/*.soustack.json";

/// Arguments for the `soustack fixtures` subcommand.
#[derive(Args, Debug)]
pub struct FixturesArgs {
    /// Path to the component registry JSON. Defaults to registry/registry.json
    /// under the working directory.
    #[arg(long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Directory containing the fixture suite. Defaults to fixtures/ under
    /// the working directory.
    #[arg(long, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,
}

/// Execute the fixtures subcommand.
///
/// Returns the process exit code: 0 when every fixture matched its
/// expectation, 1 when any mismatched or none were discovered.
pub fn run_fixtures(args: &FixturesArgs, cwd: &Path) -> Result<u8> {
    let loaded =
        load_registry(args.registry.as_deref(), cwd).context("failed to load registry")?;
    tracing::info!(
        registry = %loaded.path.display(),
        components = loaded.registry.components.len(),
        "loaded component registry"
    );

    let fixtures_dir = match &args.fixtures {
        Some(p) if p.is_absolute() => p.clone(),
        Some(p) => cwd.join(p),
        None => cwd.join("fixtures"),
    };

    let files = soustack_glob::find_files(FIXTURE_GLOB, &fixtures_dir)
        .context("invalid fixture glob")?;
    tracing::debug!(
        count = files.len(),
        dir = %fixtures_dir.display(),
        "discovered fixture files"
    );

    let report = soustack_core::run_fixtures(&files, &loaded.registry, &fixtures_dir);
    let payload = FixturesPayload::new(report, loaded.path, fixtures_dir);

    emit_json(&payload)?;
    payload.print_human_summary();

    Ok(if payload.success() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RECIPE: &str =
        r#"{"name":"x","version":"1.0.0","components":[{"id":"c1","registry":"known","version":"1.0.0"}]}"#;

    fn write_registry(root: &Path) {
        std::fs::create_dir_all(root.join("registry")).unwrap();
        std::fs::write(
            root.join("registry/registry.json"),
            r#"{"components":{"known":{}}}"#,
        )
        .unwrap();
    }

    fn write_fixture(root: &Path, name: &str, body: &str) {
        // The fixture glob requires at least one directory level below the
        // fixtures root, so suites are organized into subdirectories.
        let dir = root.join("fixtures/spec");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn args() -> FixturesArgs {
        FixturesArgs {
            registry: None,
            fixtures: None,
        }
    }

    #[test]
    fn matching_expectations_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_registry(dir.path());
        write_fixture(dir.path(), "sample.valid.soustack.json", VALID_RECIPE);
        write_fixture(dir.path(), "sample.invalid.soustack.json", r#"{"name":"x"}"#);

        let code = run_fixtures(&args(), dir.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn mismatched_expectation_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        write_registry(dir.path());
        // Expected valid, but the document is missing almost everything.
        write_fixture(dir.path(), "sample.valid.soustack.json", r#"{"name":"x"}"#);

        let code = run_fixtures(&args(), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn fixture_without_marker_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        write_registry(dir.path());
        write_fixture(dir.path(), "sample.soustack.json", VALID_RECIPE);

        let code = run_fixtures(&args(), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_fixtures_directory_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        write_registry(dir.path());

        // No fixtures/ at all: discovery is empty, which is a failed run.
        let code = run_fixtures(&args(), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn explicit_fixtures_directory_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        write_registry(dir.path());
        let suite = dir.path().join("suite/spec");
        std::fs::create_dir_all(&suite).unwrap();
        std::fs::write(suite.join("a.valid.soustack.json"), VALID_RECIPE).unwrap();

        let args = FixturesArgs {
            registry: None,
            fixtures: Some(PathBuf::from("suite")),
        };
        let code = run_fixtures(&args, dir.path()).unwrap();
        assert_eq!(code, 0);
    }
}
