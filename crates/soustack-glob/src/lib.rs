#![deny(missing_docs)]

//! # soustack-glob — Glob-Based Recipe Discovery
//!
//! Translates glob-style path patterns into anchored regular expressions and
//! enumerates matching files by recursive directory descent. This is a small,
//! deliberate glob dialect — not a general-purpose globbing library:
//!
//! - `*` matches any run of characters excluding `/`.
//! - `**` matches any run of characters including `/`, possibly empty.
//! - Everything else is literal. `?` and `[` are *not* wildcards during
//!   matching (they are escaped), but they still mark the end of the literal
//!   prefix when the descent root is computed.
//!
//! ## Determinism
//!
//! For a fixed filesystem snapshot, [`find_files`] returns the same set of
//! paths on every call, in directory-entry order. Results are not sorted.
//!
//! ## Descent Conventions
//!
//! Directories holding version-control or dependency/build metadata
//! (`.git`, `node_modules`, `target`) are skipped. This is a convention,
//! not a configuration knob. A missing descent root yields an empty result
//! rather than an error, so a misdirected pattern surfaces as "zero files
//! discovered" in the caller's summary instead of aborting a run.

mod discover;
mod pattern;

pub use discover::find_files;
pub use pattern::{discover_base_dir, glob_to_regex, PatternError};
