//! Path validation and normalization
//!
//! Navigation accepts loosely formed input (typed URLs, hand-built links,
//! empty strings from the platform). Only two things are ever repaired: an
//! empty path becomes the root, and a missing leading `/` is added. Every
//! other byte is kept, so the stored path and the path the matcher sees are
//! always the same string.

use std::borrow::Cow;

/// Checks whether a path can be stored as-is
///
/// A storable path is non-empty and starts with `/`. Trailing or doubled
/// slashes are allowed; the matcher already ignores empty segments.
///
/// ```
/// use planscope_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/dashboard/meetings/abc-123"));
/// assert!(is_valid_path("/dashboard/"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("dashboard"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Normalizes malformed navigation input
///
/// Returns `Cow::Borrowed` for input that is already valid, so the common
/// case allocates nothing.
///
/// - Empty input → `/`
/// - Missing leading slash → prefixed
/// - Anything else → unchanged
///
/// ```
/// use planscope_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/pricing"), Cow::Borrowed("/pricing")));
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("dashboard"), "/dashboard");
/// assert_eq!(normalize_path("/demo//plans/7/"), "/demo//plans/7/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    match path {
        "" => Cow::Borrowed("/"),
        p if is_valid_path(p) => Cow::Borrowed(p),
        p => Cow::Owned(format!("/{}", p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/my-plan"));
        assert!(is_valid_path("/demo/applications/a-1"));
        assert!(is_valid_path("/watchlist/"));
        assert!(is_valid_path("/demo\\dashboard"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("watchlist"));
        assert!(!is_valid_path("\\watchlist"));
    }

    #[test]
    fn test_normalize_valid_is_borrowed() {
        assert!(matches!(normalize_path("/login"), Cow::Borrowed("/login")));
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
        assert!(matches!(normalize_path("/dashboard/"), Cow::Borrowed("/dashboard/")));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_normalize_missing_leading_slash() {
        assert_eq!(normalize_path("pricing"), "/pricing");
        assert_eq!(normalize_path("demo/dashboard"), "/demo/dashboard");
    }

    #[test]
    fn test_normalize_keeps_other_bytes() {
        assert_eq!(normalize_path("/dashboard///permits//77"), "/dashboard///permits//77");
        assert_eq!(normalize_path("/dashboard/meetings/x\\y"), "/dashboard/meetings/x\\y");
    }
}
