//! # soustack-cli — Soustack Conformance Runner
//!
//! Command-line front end over `soustack-core` and `soustack-glob`.
//!
//! ## Subcommands
//!
//! - `test` — Validate recipe files that match a provided glob
//!   (e.g. `"recipes/**/*.soustack.json"`).
//! - `fixtures` — Run a fixture suite. Files containing `.valid.` must
//!   pass validation, `.invalid.` must fail.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic: handlers delegate
//!   to the domain crates and only shape output here.
//! - Each command writes a machine-readable JSON payload to stdout and a
//!   human summary to stderr, and exits non-zero when any file failed or
//!   when nothing was discovered at all.

pub mod fixtures;
pub mod report;
