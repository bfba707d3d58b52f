//! Path-pattern matching.
//!
//! Evaluates a pattern expression against a resolved active path. Three
//! pattern forms are supported:
//!
//! - `"a.b.c"` — exact match
//! - `"a.b!"` — children-only: anything strictly under `a.b`, not `a.b` itself
//! - `"a.b!x"` — children-except: anything strictly under `a.b` except
//!   `a.b.x` and its descendants

/// Test whether an active path satisfies a pattern.
///
/// Patterns without `!` match by exact string equality. Otherwise the text
/// before the first `!` is the parent and everything after it is an
/// excluded child prefix; later `!` characters are part of the exclude
/// literal, not further separators.
///
/// An empty parent (`"!"`, `"!x"`) keeps literal prefix semantics and is
/// not special-cased.
///
/// # Example
///
/// ```
/// use navmark_state::matches;
///
/// assert!(matches("courses.special", "courses!"));
/// assert!(!matches("courses", "courses!"));
/// assert!(matches("courses.list", "courses!special"));
/// assert!(!matches("courses.list", "courses!list"));
/// ```
#[must_use]
pub fn matches(active_path: &str, pattern: &str) -> bool {
    let Some((parent, exclude)) = pattern.split_once('!') else {
        return active_path == pattern;
    };

    // Strictly under the parent: `parent` followed by a dot and more.
    let Some(rest) = active_path
        .strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return false;
    };

    exclude.is_empty() || !rest.starts_with(exclude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches("home", "home"));
        assert!(matches("products.electronics", "products.electronics"));
        assert!(!matches("home", "about"));
        assert!(!matches("products", "products.electronics"));
        assert!(!matches("products.electronics", "products"));
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        assert!(!matches("Home", "home"));
    }

    #[test]
    fn test_empty_paths() {
        assert!(matches("", ""));
        assert!(!matches("home", ""));
        assert!(!matches("", "home"));
    }

    #[test]
    fn test_children_only() {
        assert!(matches("courses.special", "courses!"));
        assert!(matches("courses.special.intro", "courses!"));
        assert!(!matches("courses", "courses!"));
        assert!(!matches("home", "courses!"));
    }

    #[test]
    fn test_children_only_requires_segment_boundary() {
        // "coursesextra" is not under "courses".
        assert!(!matches("coursesextra", "courses!"));
        assert!(!matches("coursesextra.x", "courses!"));
    }

    #[test]
    fn test_children_except() {
        assert!(matches("courses.special", "courses!list"));
        assert!(!matches("courses.list", "courses!list"));
        assert!(matches("courses.list", "courses!special"));
        assert!(!matches("courses", "courses!list"));
    }

    #[test]
    fn test_children_except_excludes_descendants() {
        assert!(!matches("courses.list.archive", "courses!list"));
        assert!(matches("courses.special.intro", "courses!list"));
    }

    #[test]
    fn test_exclude_is_a_literal_prefix() {
        // The exclusion is a plain string prefix on the remainder.
        assert!(!matches("courses.listing", "courses!list"));
    }

    #[test]
    fn test_only_first_bang_separates() {
        // Exclude literal is "list!x"; "courses.special" is not under it.
        assert!(matches("courses.special", "courses!list!x"));
        assert!(!matches("courses.list!x.y", "courses!list!x"));
    }

    #[test]
    fn test_degenerate_empty_parent() {
        assert!(matches(".anything", "!"));
        assert!(!matches("anything", "!"));
        assert!(matches(".other", "!x"));
        assert!(!matches(".x", "!x"));
    }
}
