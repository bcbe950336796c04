//! Filesystem descent and candidate matching.
//!
//! Discovery walks the descent root computed from the pattern, collects every
//! regular file beneath it, and keeps the paths that match the compiled
//! expression. Relative patterns are tested against the candidate expressed
//! relative to the working directory; absolute patterns against the absolute
//! path. All path arithmetic is lexical — no symlinks are resolved, matching
//! the behavior callers see when they wrote the pattern by hand.

use std::path::{Component, Path, PathBuf};

use crate::pattern::{discover_base_dir, glob_to_regex, normalize_separators, PatternError};

/// Directory names skipped during descent: version-control and
/// dependency/build metadata. By convention, not configurable.
const SKIP_DIRS: [&str; 3] = [".git", "node_modules", "target"];

/// Discover all files under the filesystem that match `pattern`.
///
/// Relative patterns are resolved against `cwd`, which must be an absolute
/// working directory. Matches are returned as lexically-normalized absolute
/// paths in directory-entry order — reproducible for a fixed snapshot, not
/// sorted.
///
/// A descent root that does not exist yields an empty result; selecting
/// nothing is the caller's signal, not an error here.
///
/// # Errors
///
/// Returns [`PatternError`] only when the pattern cannot be compiled.
pub fn find_files(pattern: &str, cwd: &Path) -> Result<Vec<PathBuf>, PatternError> {
    let normalized = normalize_separators(pattern);
    let is_absolute = Path::new(&normalized).is_absolute();
    let base = discover_base_dir(&normalized);
    let base_dir = if is_absolute {
        PathBuf::from(&base)
    } else {
        normalize_lexical(&cwd.join(&base))
    };
    let regex = glob_to_regex(&normalized)?;

    if !base_dir.exists() {
        tracing::debug!(base = %base_dir.display(), "descent root missing; empty result");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    walk(&base_dir, &mut files);
    tracing::debug!(base = %base_dir.display(), candidates = files.len(), "descent complete");

    let mut matched = Vec::new();
    for file in files {
        let resolved = normalize_lexical(&file);
        let comparable = if is_absolute {
            to_slash(&resolved)
        } else {
            to_slash(&relative_lexical(cwd, &resolved))
        };
        if regex.is_match(&comparable) {
            matched.push(resolved);
        }
    }
    Ok(matched)
}

/// Recursively collect regular files under `dir`, skipping metadata
/// directories. Unreadable directories and entries are logged and skipped so
/// a single permission hole does not abort discovery.
fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory during descent");
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to stat directory entry");
                continue;
            }
        };
        if file_type.is_dir() {
            let name = entry.file_name();
            if name.to_str().is_some_and(|n| SKIP_DIRS.contains(&n)) {
                continue;
            }
            walk(&path, files);
        } else if file_type.is_file() {
            files.push(path);
        }
    }
}

/// Resolve `.` and `..` components lexically, without touching the
/// filesystem. `..` at the root of an absolute path is dropped; on a
/// relative path it is preserved.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(std::path::MAIN_SEPARATOR.to_string()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Express `target` relative to `base`, lexically. Both paths are normalized
/// first; the result may begin with `..` segments when `target` lies outside
/// `base`.
fn relative_lexical(base: &Path, target: &Path) -> PathBuf {
    let base = normalize_lexical(base);
    let target = normalize_lexical(target);
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    let mut shared = 0;
    while shared < base_parts.len()
        && shared < target_parts.len()
        && base_parts[shared] == target_parts[shared]
    {
        shared += 1;
    }

    let mut relative = PathBuf::new();
    for _ in shared..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[shared..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Render a path with `/` separators regardless of platform.
fn to_slash(path: &Path) -> String {
    let rendered = path.display().to_string();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
