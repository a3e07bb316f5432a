//! Pattern compiler.
//!
//! Action names carry no placeholder syntax. A name compiles to its literal
//! slash-separated segments, and a candidate path matches when it starts with
//! exactly those segments. Whatever follows the literal prefix is captured
//! positionally and left to the overload resolver, which infers arity and
//! types from the handler's declared parameters.

use std::fmt;

/// A compiled, prefix-based action pattern.
///
/// # Example
///
/// ```rust
/// use switchyard_framework::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("users/posts");
/// assert_eq!(
///     pattern.match_path(&["users", "posts", "7"]),
///     Some(vec!["7".to_string()])
/// );
/// assert_eq!(pattern.match_path(&["users"]), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPattern {
    literals: Vec<String>,
}

impl CompiledPattern {
    /// Compiles `name` by splitting on `/`; empty segments are dropped, so
    /// `"/users/"` and `"users"` compile to the same pattern.
    pub fn compile(name: &str) -> Self {
        Self {
            literals: name
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns the literal prefix segments.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Returns the first literal segment, used as the registry index key.
    pub fn head(&self) -> Option<&str> {
        self.literals.first().map(String::as_str)
    }

    /// Number of literal segments; longer prefixes are more specific.
    pub fn specificity(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` if the pattern has no literal segment at all.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Tests `path` against the literal prefix (case-sensitive).
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.len() >= self.literals.len()
            && self
                .literals
                .iter()
                .zip(path)
                .all(|(literal, segment)| literal == segment.as_ref())
    }

    /// Matches `path` and returns the trailing segments in order.
    ///
    /// Returns `None` when the path is shorter than the literal prefix or any
    /// prefix segment differs.
    pub fn match_path<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<String>> {
        if !self.matches(path) {
            return None;
        }
        Some(
            path[self.literals.len()..]
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        )
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literals.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_captures_nothing() {
        let pattern = CompiledPattern::compile("say");
        assert_eq!(pattern.match_path(&["say"]), Some(vec![]));
    }

    #[test]
    fn trailing_segments_become_captures() {
        let pattern = CompiledPattern::compile("users");
        assert_eq!(
            pattern.match_path(&["users", "123", "posts"]),
            Some(vec!["123".to_string(), "posts".to_string()])
        );
    }

    #[test]
    fn shorter_path_never_matches() {
        let pattern = CompiledPattern::compile("users/admin");
        assert!(!pattern.matches(&["users"]));
        assert_eq!(pattern.match_path::<&str>(&[]), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let pattern = CompiledPattern::compile("Users");
        assert_eq!(pattern.match_path(&["users"]), None);
    }

    #[test]
    fn redundant_slashes_are_ignored() {
        let a = CompiledPattern::compile("/users//admin/");
        let b = CompiledPattern::compile("users/admin");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "users/admin");
        assert_eq!(a.specificity(), 2);
    }

    #[test]
    fn differing_prefix_segment_is_no_match() {
        let pattern = CompiledPattern::compile("users/admin");
        assert_eq!(pattern.match_path(&["users", "guest", "1"]), None);
    }
}
