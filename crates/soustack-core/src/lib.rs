#![deny(missing_docs)]

//! # soustack-core — Recipe Validation Engine
//!
//! Validates structured recipe documents (JSON) against a component registry
//! and a fixed set of structural rules, producing path-qualified,
//! human-readable error messages.
//!
//! ## Design Principles
//!
//! 1. **Validation findings are data, not errors.** A malformed recipe is
//!    the engine's normal output: [`validate_recipe`] aggregates every
//!    violation into a `Vec<String>` and never fails. Only environment
//!    failures — an unreadable or corrupt registry — propagate as
//!    [`RegistryError`].
//!
//! 2. **Dynamic shape-checking over `serde_json::Value`.** Recipes are
//!    inspected through explicit narrowing helpers ([`shape`]) rather than
//!    deserialized into structs, so every applicable rule runs and every
//!    violation is collected even after a local shape failure.
//!
//! 3. **The registry is loaded once and never mutated.** It is plain shared
//!    state for the lifetime of a run; per-file validations borrow it.
//!
//! 4. **No `.unwrap()` outside tests.** Structured errors with `thiserror`.

pub mod error;
pub mod registry;
pub mod runner;
pub mod semver;
pub mod shape;
pub mod validate;

pub use error::RegistryError;
pub use registry::{load_registry, ComponentSpec, LoadedRegistry, Registry, DEFAULT_REGISTRY_PATH};
pub use runner::{
    run_batch, run_fixtures, validate_recipe_file, BatchReport, BatchResult, BatchSummary,
    Expectation, FileValidation, FixtureReport, FixtureResult, FixtureSummary,
    MISSING_EXPECTATION_ERROR,
};
pub use semver::is_semver;
pub use validate::{validate_recipe, Validation};
