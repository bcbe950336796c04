//! Glob pattern compilation.
//!
//! A pattern is tokenized into literal runs, single stars, and double stars,
//! then emitted as an anchored regular expression. Literal runs are escaped
//! wholesale, so no placeholder substitution is involved and no user-supplied
//! substring can collide with an intermediate encoding.

use regex::Regex;
use thiserror::Error;

/// Error compiling a glob pattern into a matcher.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The emitted regular expression failed to compile.
    #[error("failed to compile glob pattern {pattern:?}: {source}")]
    Compile {
        /// The original glob pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },
}

/// A single element of a tokenized glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A run of characters matched verbatim.
    Literal(String),
    /// `*` — any run of characters excluding `/`.
    Star,
    /// `**` — any run of characters including `/`, possibly empty.
    DoubleStar,
}

/// Characters that end the literal prefix when computing the descent root.
///
/// `?` and `[` are matched literally by the compiled expression, but the
/// base-directory scan still treats them as wildcard markers; a pattern
/// author who writes them is no longer naming a plain directory prefix.
const WILDCARD_MARKERS: [char; 3] = ['*', '?', '['];

/// Normalize platform path separators to `/`.
pub(crate) fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '*' {
            literal.push(c);
            continue;
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        if chars.peek() == Some(&'*') {
            chars.next();
            tokens.push(Token::DoubleStar);
        } else {
            tokens.push(Token::Star);
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Compile a glob pattern into an anchored [`Regex`] over `/`-separated paths.
///
/// The expression matches full paths, not substrings. Platform separators in
/// the pattern are normalized to `/` before compilation.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, PatternError> {
    let normalized = normalize_separators(pattern);
    let mut source = String::from("^");
    for token in tokenize(&normalized) {
        match token {
            Token::Literal(lit) => source.push_str(&regex::escape(&lit)),
            Token::Star => source.push_str("[^/]*"),
            Token::DoubleStar => source.push_str(".*"),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|source| PatternError::Compile {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compute the descent root for a pattern: the literal portion before the
/// first wildcard marker, trimmed back to the last path separator.
///
/// A pattern with no wildcard descends from its parent directory. An empty
/// pattern, or one whose literal prefix is empty, descends from `.` (the
/// working directory).
pub fn discover_base_dir(pattern: &str) -> String {
    let normalized = normalize_separators(pattern);
    let Some(wildcard_at) = normalized.find(|c| WILDCARD_MARKERS.contains(&c)) else {
        return match std::path::Path::new(&normalized).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                normalize_separators(&parent.to_string_lossy())
            }
            _ => ".".to_string(),
        };
    };
    let prefix = &normalized[..wildcard_at];
    let base = match prefix.rfind('/') {
        Some(sep_at) => &prefix[..sep_at],
        None => "",
    };
    if base.is_empty() {
        ".".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn double_star_matches_across_separators() {
        let re = glob_to_regex("a/**/z.json").unwrap();
        assert!(re.is_match("a/b/c/z.json"));
        assert!(re.is_match("a//z.json"));
    }

    #[test]
    fn single_star_stays_within_one_segment() {
        let re = glob_to_regex("a/*/z.json").unwrap();
        assert!(re.is_match("a/b/z.json"));
        assert!(!re.is_match("a/b/c/z.json"));
    }

    #[test]
    fn star_matches_any_run_in_segment() {
        let re = glob_to_regex("recipes/*.soustack.json").unwrap();
        assert!(re.is_match("recipes/demo.soustack.json"));
        assert!(!re.is_match("recipes/sub/demo.soustack.json"));
        assert!(!re.is_match("other/demo.soustack.json"));
    }

    #[test]
    fn literal_pattern_is_exact_match_only() {
        let re = glob_to_regex("recipes/demo.json").unwrap();
        assert!(re.is_match("recipes/demo.json"));
        // `.` is escaped, not "any character".
        assert!(!re.is_match("recipes/demoxjson"));
        // Anchored at both ends: no substring matches.
        assert!(!re.is_match("deep/recipes/demo.json"));
        assert!(!re.is_match("recipes/demo.json.bak"));
    }

    #[test]
    fn question_mark_and_bracket_are_literal_in_matching() {
        let re = glob_to_regex("a?b[0].json").unwrap();
        assert!(re.is_match("a?b[0].json"));
        assert!(!re.is_match("axb[0].json"));
    }

    #[test]
    fn metacharacters_in_literals_are_escaped() {
        let re = glob_to_regex("a+b(c)|d.json").unwrap();
        assert!(re.is_match("a+b(c)|d.json"));
        assert!(!re.is_match("aab(c)|d.json"));
    }

    #[test]
    fn triple_star_parses_as_double_then_single() {
        // "***" tokenizes to `**` followed by `*`; both are still wildcards.
        let re = glob_to_regex("a/***.json").unwrap();
        assert!(re.is_match("a/b/c.json"));
    }

    #[test]
    fn base_dir_trims_to_last_separator_before_wildcard() {
        assert_eq!(discover_base_dir("recipes/**/*.json"), "recipes");
        assert_eq!(discover_base_dir("recipes/a*/x.json"), "recipes");
        assert_eq!(discover_base_dir("a/b/c/*.json"), "a/b/c");
    }

    #[test]
    fn base_dir_without_wildcard_is_parent() {
        assert_eq!(discover_base_dir("recipes/demo.json"), "recipes");
        assert_eq!(discover_base_dir("demo.json"), ".");
    }

    #[test]
    fn base_dir_of_bare_wildcard_is_working_directory() {
        assert_eq!(discover_base_dir("*.json"), ".");
        assert_eq!(discover_base_dir("**/*.json"), ".");
        assert_eq!(discover_base_dir(""), ".");
        assert_eq!(discover_base_dir("."), ".");
    }

    #[test]
    fn base_dir_honors_question_mark_and_bracket_markers() {
        assert_eq!(discover_base_dir("recipes/a?.json"), "recipes");
        assert_eq!(discover_base_dir("recipes/a[0].json"), "recipes");
    }

    #[test]
    fn absolute_pattern_base_dir_is_absolute() {
        assert_eq!(discover_base_dir("/srv/recipes/**/*.json"), "/srv/recipes");
    }

    proptest! {
        /// A wildcard-free pattern matches exactly its own normalized path.
        #[test]
        fn literal_pattern_matches_itself(path in "[a-z]{1,6}(/[a-z]{1,6}){0,3}") {
            let re = glob_to_regex(&path).unwrap();
            prop_assert!(re.is_match(&path));
            let suffixed = format!("{}x", path);
            let prefixed = format!("x{}", path);
            prop_assert!(!re.is_match(&suffixed));
            prop_assert!(!re.is_match(&prefixed));
        }
    }
}
