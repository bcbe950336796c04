//! Recipe document validation.
//!
//! Applies the structural and cross-referencing rules to a parsed recipe
//! and returns every violation found. The walk is deliberately
//! non-short-circuiting: this is a diagnostic tool whose consumers display
//! the full defect list in one pass, so an element-level failure never
//! suppresses sibling checks. Error messages are positional-path-prefixed
//! plain strings (`components[2].version ...`) — human-facing diagnostics,
//! not a machine-parsed error code surface.

use serde_json::Value;

use crate::registry::Registry;
use crate::semver::is_semver;
use crate::shape::{as_object, field_str, non_empty_str};

/// Outcome of validating one recipe document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// True iff no violations were collected.
    pub valid: bool,
    /// Every violation found, in document order.
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Validation {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a parsed recipe document against a loaded registry.
///
/// Never fails: malformed content is the normal output, reported through
/// [`Validation::errors`]. Validating the same document against the same
/// registry twice yields identical results.
pub fn validate_recipe(recipe: &Value, registry: &Registry) -> Validation {
    // A non-object document has no structure to inspect; nothing else applies.
    let Some(doc) = as_object(recipe) else {
        return Validation::from_errors(vec!["Recipe must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    if field_str(doc, "name").is_none() {
        errors.push("name is required".to_string());
    }

    match field_str(doc, "version") {
        None => errors.push("version is required".to_string()),
        Some(version) if !is_semver(version) => {
            errors.push("version must use semver (e.g. 1.0.0)".to_string());
        }
        Some(_) => {}
    }

    match doc.get("components").and_then(Value::as_array) {
        Some(components) if !components.is_empty() => {
            for (index, component) in components.iter().enumerate() {
                validate_component(component, registry, index, &mut errors);
            }
        }
        _ => errors.push("components must be a non-empty array".to_string()),
    }

    if let Some(workflows) = doc.get("workflows") {
        match workflows.as_array() {
            None => errors.push("workflows must be an array when provided".to_string()),
            Some(list) => {
                for (index, workflow) in list.iter().enumerate() {
                    validate_workflow(workflow, index, &mut errors);
                }
            }
        }
    }

    Validation::from_errors(errors)
}

/// Validate one component reference, collecting into `errors` with a
/// `components[i]` prefix.
fn validate_component(component: &Value, registry: &Registry, index: usize, errors: &mut Vec<String>) {
    let prefix = format!("components[{index}]");

    let Some(entry) = as_object(component) else {
        errors.push(format!("{prefix} must be an object"));
        return;
    };

    if field_str(entry, "id").is_none() {
        errors.push(format!("{prefix}.id is required"));
    }

    let registry_key = field_str(entry, "registry");
    if registry_key.is_none() {
        errors.push(format!("{prefix}.registry is required"));
    }

    let version = field_str(entry, "version");
    match version {
        None => errors.push(format!("{prefix}.version is required")),
        Some(v) if !is_semver(v) => {
            errors.push(format!("{prefix}.version must use semver (e.g. 1.0.0)"));
        }
        Some(_) => {}
    }

    let Some(key) = registry_key else {
        return;
    };
    let Some(spec) = registry.component(key) else {
        errors.push(format!(
            "{prefix}.registry references unknown component '{key}'"
        ));
        return;
    };

    // The membership check runs whenever the entry restricts versions,
    // even when the reference's version field is missing or malformed.
    if !spec.allows_any_version() && version.map_or(true, |v| !spec.versions.iter().any(|a| a == v)) {
        errors.push(format!(
            "{prefix}.version '{}' is not in registry for {key} (allowed: {})",
            version.unwrap_or_default(),
            spec.versions.join(", ")
        ));
    }

    if !spec.required_config.is_empty() {
        let config = entry.get("config").and_then(Value::as_object);
        // A key is present when the config object contains it at all;
        // an explicit null still counts as supplied.
        let missing: Vec<&str> = spec
            .required_config
            .iter()
            .filter(|k| config.map_or(true, |c| !c.contains_key(k.as_str())))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            errors.push(format!(
                "{prefix}.config is missing required key(s) for {key}: {}",
                missing.join(", ")
            ));
        }
    }
}

/// Validate one workflow declaration, collecting into `errors` with a
/// `workflows[i]` prefix. Step semantics are out of scope; only shape is
/// checked.
fn validate_workflow(workflow: &Value, index: usize, errors: &mut Vec<String>) {
    let prefix = format!("workflows[{index}]");

    let Some(entry) = as_object(workflow) else {
        errors.push(format!("{prefix} must be an object"));
        return;
    };

    if field_str(entry, "name").is_none() {
        errors.push(format!("{prefix}.name is required"));
    }

    match entry.get("steps").and_then(Value::as_array) {
        Some(steps) if !steps.is_empty() => {
            for (step_index, step) in steps.iter().enumerate() {
                if non_empty_str(step).is_none() {
                    errors.push(format!(
                        "{prefix}.steps[{step_index}] must be a non-empty string"
                    ));
                }
            }
        }
        _ => errors.push(format!("{prefix}.steps must be a non-empty array")),
    }
}
