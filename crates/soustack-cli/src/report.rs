//! Report payloads and summary printing.
//!
//! Every command emits two views of the same run: a JSON payload on stdout
//! for tooling (camelCase keys, stable field set) and a short human summary
//! on stderr. Keeping them on separate streams lets callers pipe the JSON
//! while still seeing the outcome.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use soustack_core::{
    BatchReport, BatchResult, BatchSummary, FixtureReport, FixtureResult, FixtureSummary,
};

/// JSON payload for `soustack test`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayload {
    /// Always `"test"`.
    pub command: &'static str,
    /// RFC 3339 timestamp of payload creation.
    pub generated_at: String,
    /// Per-file outcomes.
    pub results: Vec<BatchResult>,
    /// Tallies plus the registry that was used.
    pub summary: TestSummary,
}

/// Summary block of a `test` payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    /// Registry the run validated against.
    pub registry_path: PathBuf,
    /// Pass/fail tallies.
    #[serde(flatten)]
    pub counts: BatchSummary,
}

impl TestPayload {
    /// Assemble the payload from a finished batch run.
    pub fn new(report: BatchReport, registry_path: PathBuf) -> Self {
        TestPayload {
            command: "test",
            generated_at: Utc::now().to_rfc3339(),
            results: report.results,
            summary: TestSummary {
                registry_path,
                counts: report.summary,
            },
        }
    }

    /// Whether the run as a whole succeeded.
    pub fn success(&self) -> bool {
        self.summary.counts.success()
    }

    /// Print the stderr summary, listing each failing file with its errors.
    pub fn print_human_summary(&self) {
        let failures: Vec<FailureDetail<'_>> = self
            .results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| FailureDetail {
                label: r.file.display().to_string(),
                errors: &r.errors,
            })
            .collect();
        let counts = self.summary.counts;
        print_summary(counts.passed, counts.failed, counts.total, &failures);
    }
}

/// JSON payload for `soustack fixtures`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturesPayload {
    /// Always `"fixtures"`.
    pub command: &'static str,
    /// RFC 3339 timestamp of payload creation.
    pub generated_at: String,
    /// Registry the run validated against.
    pub registry_path: PathBuf,
    /// Per-fixture outcomes.
    pub results: Vec<FixtureResult>,
    /// Tallies plus the paths the run resolved.
    pub summary: FixturesSummary,
}

/// Summary block of a `fixtures` payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturesSummary {
    /// Expectation and pass/fail tallies.
    #[serde(flatten)]
    pub counts: FixtureSummary,
    /// Registry the run validated against.
    pub registry_path: PathBuf,
    /// Directory the fixtures were discovered under.
    pub fixtures_path: PathBuf,
}

impl FixturesPayload {
    /// Assemble the payload from a finished fixture run.
    pub fn new(report: FixtureReport, registry_path: PathBuf, fixtures_path: PathBuf) -> Self {
        FixturesPayload {
            command: "fixtures",
            generated_at: Utc::now().to_rfc3339(),
            registry_path: registry_path.clone(),
            results: report.results,
            summary: FixturesSummary {
                counts: report.summary,
                registry_path,
                fixtures_path,
            },
        }
    }

    /// Whether the run as a whole succeeded.
    pub fn success(&self) -> bool {
        self.summary.counts.success()
    }

    /// Print the stderr summary. Failing fixtures are labelled with the
    /// expectation their filename carried, if any.
    pub fn print_human_summary(&self) {
        let labels: Vec<String> = self
            .results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| match r.expectation {
                Some(expected) => format!(
                    "{} (expected {})",
                    r.file.display(),
                    match expected {
                        soustack_core::Expectation::Valid => "valid",
                        soustack_core::Expectation::Invalid => "invalid",
                    }
                ),
                None => format!("{} (no expectation)", r.file.display()),
            })
            .collect();
        let failures: Vec<FailureDetail<'_>> = self
            .results
            .iter()
            .filter(|r| !r.passed)
            .zip(labels)
            .map(|(r, label)| FailureDetail {
                label,
                errors: &r.errors,
            })
            .collect();
        let counts = self.summary.counts;
        print_summary(counts.passed, counts.failed, counts.total, &failures);
    }
}

/// One failing entry of the stderr summary.
struct FailureDetail<'a> {
    label: String,
    errors: &'a [String],
}

fn print_summary(passed: usize, failed: usize, total: usize, failures: &[FailureDetail<'_>]) {
    eprintln!();
    eprintln!("Summary: {passed} passed, {failed} failed, {total} total.");
    if !failures.is_empty() {
        eprintln!("Failures:");
        for failure in failures {
            eprintln!("- {}", failure.label);
            for error in failure.errors {
                eprintln!("  • {error}");
            }
        }
    }
}

/// Write a payload to stdout as pretty-printed JSON.
pub fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soustack_core::Registry;
    use std::path::Path;

    #[test]
    fn test_payload_uses_camel_case_keys() {
        let report = soustack_core::run_batch(&[], &Registry::default(), Path::new("/tmp"));
        let payload = TestPayload::new(report, PathBuf::from("/reg.json"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["command"], "test");
        assert!(json["generatedAt"].is_string());
        assert_eq!(json["summary"]["registryPath"], "/reg.json");
        assert_eq!(json["summary"]["total"], 0);
        assert_eq!(json["summary"]["failed"], 0);
        assert!(!payload.success(), "empty run must not succeed");
    }

    #[test]
    fn fixtures_payload_includes_paths_and_expectations() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("x.invalid.soustack.json");
        std::fs::write(&fixture, r#"{"name":"x"}"#).unwrap();

        let report =
            soustack_core::run_fixtures(&[fixture], &Registry::default(), dir.path());
        let payload = FixturesPayload::new(
            report,
            PathBuf::from("/reg.json"),
            dir.path().to_path_buf(),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["command"], "fixtures");
        assert_eq!(json["registryPath"], "/reg.json");
        assert_eq!(json["summary"]["expectedInvalid"], 1);
        assert_eq!(json["summary"]["fixturesPath"], dir.path().to_str().unwrap());
        assert_eq!(json["results"][0]["expectation"], "invalid");
        assert_eq!(json["results"][0]["passed"], true);
        assert!(payload.success());
    }
}
