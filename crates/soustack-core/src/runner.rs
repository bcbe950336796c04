//! Batch and fixture conformance runners.
//!
//! Orchestrates per-file validation over a discovered file set. Each file is
//! validated independently: a single recipe's read or parse failure degrades
//! that file's result and the run continues. Only the absence of a registry
//! is fatal, and that is decided before these runners are reached.
//!
//! A run that discovers zero files is reported as failed, never as vacuously
//! successful — a misconfigured glob must not pass silently.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::registry::Registry;
use crate::validate::validate_recipe;

/// Diagnostic attached to fixture files whose names carry no expectation
/// marker. Such files always fail, regardless of document validity.
pub const MISSING_EXPECTATION_ERROR: &str =
    "Fixture filenames must contain .valid. or .invalid. to set expectations";

/// The outcome a fixture filename promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// The file contains `.valid.` — validation must succeed.
    Valid,
    /// The file contains `.invalid.` — validation must fail.
    Invalid,
}

impl Expectation {
    /// Derive the expectation from a filename. Case-sensitive substring
    /// match on the basename; `.valid.` wins if both markers appear.
    pub fn from_filename(path: &Path) -> Option<Expectation> {
        let base = path.file_name()?.to_str()?;
        if base.contains(".valid.") {
            Some(Expectation::Valid)
        } else if base.contains(".invalid.") {
            Some(Expectation::Invalid)
        } else {
            None
        }
    }

    /// Whether an actual validation outcome satisfies this expectation.
    pub fn satisfied_by(self, valid: bool) -> bool {
        match self {
            Expectation::Valid => valid,
            Expectation::Invalid => !valid,
        }
    }
}

/// Validation outcome for one recipe file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValidation {
    /// Absolute path of the validated file.
    pub file: PathBuf,
    /// Whether the document passed every rule.
    pub valid: bool,
    /// Every violation, or the single read/parse diagnostic.
    pub errors: Vec<String>,
}

/// Read, parse, and validate one recipe file.
///
/// Read and parse failures never propagate: they become a failing result
/// with a single diagnostic, scoped to this file only.
pub fn validate_recipe_file(path: &Path, registry: &Registry, cwd: &Path) -> FileValidation {
    let file = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let parsed = std::fs::read_to_string(&file)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str::<Value>(&raw).map_err(|e| e.to_string()));
    match parsed {
        Err(cause) => FileValidation {
            file,
            valid: false,
            errors: vec![format!("Failed to read or parse JSON: {cause}")],
        },
        Ok(document) => {
            let outcome = validate_recipe(&document, registry);
            FileValidation {
                file,
                valid: outcome.valid,
                errors: outcome.errors,
            }
        }
    }
}

/// One entry of a batch run. In batch mode a file passes iff it validates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Absolute path of the validated file.
    pub file: PathBuf,
    /// Whether the document passed every rule.
    pub valid: bool,
    /// Whether this file counts toward the passed tally (same as `valid`).
    pub passed: bool,
    /// Violations or the read/parse diagnostic.
    pub errors: Vec<String>,
}

/// Pass/fail tallies for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of files validated.
    pub total: usize,
    /// Files that passed.
    pub passed: usize,
    /// Files that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// A run succeeds only when something was checked and nothing failed.
    pub fn success(&self) -> bool {
        self.failed == 0 && self.total > 0
    }
}

/// Results and tallies for a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Per-file outcomes, in discovery order.
    pub results: Vec<BatchResult>,
    /// Aggregated tallies.
    pub summary: BatchSummary,
}

/// Validate every discovered file and aggregate pass/fail counts.
pub fn run_batch(files: &[PathBuf], registry: &Registry, cwd: &Path) -> BatchReport {
    tracing::debug!(files = files.len(), "starting batch validation");
    let results: Vec<BatchResult> = files
        .iter()
        .map(|file| {
            let validation = validate_recipe_file(file, registry, cwd);
            BatchResult {
                file: validation.file,
                valid: validation.valid,
                passed: validation.valid,
                errors: validation.errors,
            }
        })
        .collect();
    let passed = results.iter().filter(|r| r.passed).count();
    let summary = BatchSummary {
        total: results.len(),
        passed,
        failed: results.len() - passed,
    };
    BatchReport { results, summary }
}

/// One entry of a fixture run: the filename-derived expectation compared
/// against the actual outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResult {
    /// Absolute path of the fixture file.
    pub file: PathBuf,
    /// Expectation derived from the filename, if any.
    pub expectation: Option<Expectation>,
    /// The actual validation outcome.
    pub valid: bool,
    /// Whether the outcome matched the expectation. Always false without
    /// an expectation.
    pub passed: bool,
    /// Validation errors, or the missing-marker diagnostic.
    pub errors: Vec<String>,
}

/// Tallies for a fixture run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    /// Number of fixture files checked.
    pub total: usize,
    /// Fixtures expected to validate.
    pub expected_valid: usize,
    /// Fixtures expected to fail validation.
    pub expected_invalid: usize,
    /// Fixtures whose outcome matched their expectation.
    pub passed: usize,
    /// Fixtures that did not match, or carried no expectation.
    pub failed: usize,
}

impl FixtureSummary {
    /// Same rule as batch runs: zero fixtures is a failed run.
    pub fn success(&self) -> bool {
        self.failed == 0 && self.total > 0
    }
}

/// Results and tallies for a fixture run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureReport {
    /// Per-fixture outcomes, in discovery order.
    pub results: Vec<FixtureResult>,
    /// Aggregated tallies.
    pub summary: FixtureSummary,
}

/// Validate every fixture and compare outcomes against the expectations
/// encoded in the filenames.
pub fn run_fixtures(files: &[PathBuf], registry: &Registry, cwd: &Path) -> FixtureReport {
    tracing::debug!(files = files.len(), "starting fixture validation");
    let results: Vec<FixtureResult> = files
        .iter()
        .map(|file| {
            let expectation = Expectation::from_filename(file);
            let validation = validate_recipe_file(file, registry, cwd);
            let (passed, errors) = match expectation {
                Some(expected) => (expected.satisfied_by(validation.valid), validation.errors),
                None => (false, vec![MISSING_EXPECTATION_ERROR.to_string()]),
            };
            FixtureResult {
                file: validation.file,
                expectation,
                valid: validation.valid,
                passed,
                errors,
            }
        })
        .collect();
    let summary = FixtureSummary {
        total: results.len(),
        expected_valid: results
            .iter()
            .filter(|r| r.expectation == Some(Expectation::Valid))
            .count(),
        expected_invalid: results
            .iter()
            .filter(|r| r.expectation == Some(Expectation::Invalid))
            .count(),
        passed: results.iter().filter(|r| r.passed).count(),
        failed: results.iter().filter(|r| !r.passed).count(),
    };
    FixtureReport { results, summary }
}
