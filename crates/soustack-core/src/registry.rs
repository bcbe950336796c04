//! Component registry: the trusted catalog of known component keys, their
//! allowed versions, and required configuration keys.
//!
//! The registry is deserialized once per run and never mutated. Loading is a
//! pure read-and-parse step: unreadable files and malformed JSON propagate
//! as [`RegistryError`] for the caller to present — there is no validation
//! logic and no recovery here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Default registry location, resolved against the working directory when
/// no explicit path is supplied.
pub const DEFAULT_REGISTRY_PATH: &str = "registry/registry.json";

/// The component registry document.
///
/// Unknown top-level keys are ignored so older binaries keep accepting
/// newer registry files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Known components, keyed by registry key. Keys are unique by
    /// construction of the map.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSpec>,
}

/// Constraints a registry entry places on references to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Allowed versions. Empty or absent means any version is accepted.
    #[serde(default)]
    pub versions: Vec<String>,

    /// Configuration keys every reference must supply.
    #[serde(default, rename = "requiredConfig")]
    pub required_config: Vec<String>,
}

impl Registry {
    /// Look up a component spec by registry key.
    pub fn component(&self, key: &str) -> Option<&ComponentSpec> {
        self.components.get(key)
    }
}

impl ComponentSpec {
    /// Whether this entry accepts any version (no restriction declared).
    pub fn allows_any_version(&self) -> bool {
        self.versions.is_empty()
    }
}

/// A registry together with the path it was loaded from, for reporting.
#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    /// The parsed registry.
    pub registry: Registry,
    /// Absolute path the registry was read from.
    pub path: PathBuf,
}

/// Load a registry from `custom`, or from [`DEFAULT_REGISTRY_PATH`] under
/// `cwd` when no path is given.
///
/// # Errors
///
/// Returns [`RegistryError::Read`] when the file is unreadable and
/// [`RegistryError::Parse`] when it is not valid registry JSON. Both are
/// fatal to the run that requested them.
pub fn load_registry(custom: Option<&Path>, cwd: &Path) -> Result<LoadedRegistry, RegistryError> {
    let path = match custom {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.join(DEFAULT_REGISTRY_PATH),
    };
    let contents = std::fs::read_to_string(&path).map_err(|source| RegistryError::Read {
        path: path.clone(),
        source,
    })?;
    let registry: Registry =
        serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(
        path = %path.display(),
        components = registry.components.len(),
        "loaded component registry"
    );
    Ok(LoadedRegistry { registry, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_registry_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reg.json");
        std::fs::write(
            &path,
            r#"{"components":{"db":{"versions":["1.0.0"],"requiredConfig":["url"]}}}"#,
        )
        .unwrap();

        let loaded = load_registry(Some(&path), dir.path()).unwrap();
        assert_eq!(loaded.path, path);
        let spec = loaded.registry.component("db").unwrap();
        assert_eq!(spec.versions, vec!["1.0.0"]);
        assert_eq!(spec.required_config, vec!["url"]);
        assert!(!spec.allows_any_version());
    }

    #[test]
    fn relative_custom_path_resolves_against_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf")).unwrap();
        std::fs::write(dir.path().join("conf/reg.json"), r#"{"components":{}}"#).unwrap();

        let loaded = load_registry(Some(Path::new("conf/reg.json")), dir.path()).unwrap();
        assert_eq!(loaded.path, dir.path().join("conf/reg.json"));
    }

    #[test]
    fn default_path_resolves_against_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("registry")).unwrap();
        std::fs::write(
            dir.path().join("registry/registry.json"),
            r#"{"components":{"cache":{}}}"#,
        )
        .unwrap();

        let loaded = load_registry(None, dir.path()).unwrap();
        assert!(loaded.registry.component("cache").is_some());
        let spec = loaded.registry.component("cache").unwrap();
        assert!(spec.allows_any_version());
        assert!(spec.required_config.is_empty());
    }

    #[test]
    fn unreadable_registry_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_registry(Some(&dir.path().join("missing.json")), dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }), "got: {err}");
    }

    #[test]
    fn malformed_registry_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reg.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load_registry(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reg.json");
        std::fs::write(
            &path,
            r#"{"components":{"db":{"versions":[],"extra":true}},"futureField":1}"#,
        )
        .unwrap();
        let loaded = load_registry(Some(&path), dir.path()).unwrap();
        assert!(loaded.registry.component("db").unwrap().allows_any_version());
    }
}
