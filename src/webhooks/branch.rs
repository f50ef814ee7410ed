//! Branch filter matching.
//!
//! A subscription's filter is a comma-separated list of patterns. A pattern
//! ending in `/*` is a prefix match on `prefix/`; anything else is an exact
//! name match. An empty filter matches every branch.

/// Returns true when `branch` matches the subscription filter expression.
///
/// Patterns are OR-ed: the branch matches when any single pattern matches.
/// `release/*` matches `release/1.0` but not `release` itself.
pub fn branch_matches(branch: &str, filter: Option<&str>) -> bool {
    let Some(filter) = filter else {
        return true;
    };

    let branch = branch.trim();
    let patterns: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if patterns.is_empty() {
        return true;
    }

    patterns.iter().any(|pattern| {
        if let Some(prefix) = pattern.strip_suffix("/*") {
            branch.starts_with(&format!("{}/", prefix))
        } else {
            branch == *pattern
        }
    })
}
