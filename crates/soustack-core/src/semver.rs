//! Strict semver shape checking.
//!
//! Recipes pin versions as `MAJOR.MINOR.PATCH[-pre][+build]`. The check is
//! purely syntactic: no range operators, no leading zeros on the numeric
//! triple, pre-release and build metadata as dot-separated alphanumeric
//! runs.

use once_cell::sync::Lazy;
use regex::Regex;

static SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .expect("semver pattern is a valid regex")
});

/// Whether `value` has the strict `MAJOR.MINOR.PATCH[-pre][+build]` shape.
pub fn is_semver(value: &str) -> bool {
    SEMVER.is_match(value)
}
