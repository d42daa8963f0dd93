//! Pattern parsing and matching for route templates
//!
//! Pure functional parsing of templates like `/dashboard/meetings/[id]` into
//! typed segments. All functions are **pure**: same input → same output, no
//! side effects, safe to call from anywhere.

use crate::Params;

/// A single segment of a route template
///
/// # Examples
///
/// ```
/// use planscope_router::route::pattern::{classify_segment, SegmentKind};
///
/// assert!(matches!(classify_segment("meetings"), SegmentKind::Static(_)));
/// assert!(matches!(classify_segment("[id]"), SegmentKind::Param(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Placeholder `[name]`: binds whatever occupies this position
    Param(String),
    /// Literal text that must be byte-equal to the path segment
    Static(String),
}

/// Classifies a template segment (pure function)
///
/// A segment is a placeholder when it is wrapped in square brackets. The
/// name is the text between them; `[]` is a placeholder with an empty name.
///
/// ```
/// use planscope_router::route::pattern::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("[id]"), SegmentKind::Param("id".to_string()));
/// assert_eq!(classify_segment("[id"), SegmentKind::Static("[id".to_string()));
/// ```
pub fn classify_segment(segment: &str) -> SegmentKind {
    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(name) => SegmentKind::Param(name.to_string()),
        None => SegmentKind::Static(segment.to_string()),
    }
}

/// Splits a path or template into its non-empty `/`-separated segments
///
/// Leading, trailing and doubled slashes produce no segments.
///
/// ```
/// use planscope_router::route::pattern::split_segments;
///
/// let segments: Vec<&str> = split_segments("//dashboard/permits//77/").collect();
/// assert_eq!(segments, vec!["dashboard", "permits", "77"]);
/// ```
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A compiled route template
///
/// Parsed once at startup; matching never re-parses the template.
///
/// # Examples
///
/// ```
/// use planscope_router::RoutePattern;
///
/// let pattern = RoutePattern::parse("/dashboard/meetings/[id]");
/// let params = pattern.matches("/dashboard/meetings/abc-123").unwrap();
/// assert_eq!(params.get("id"), Some("abc-123"));
///
/// assert!(pattern.matches("/dashboard/permits/abc-123").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<SegmentKind>,
    param_names: Vec<String>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments: Vec<SegmentKind> = split_segments(pattern).map(classify_segment).collect();
        let param_names = segments
            .iter()
            .filter_map(|segment| match segment {
                SegmentKind::Param(name) => Some(name.clone()),
                SegmentKind::Static(_) => None,
            })
            .collect();

        Self {
            source: pattern.to_string(),
            segments,
            param_names,
        }
    }

    /// The template text this pattern was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[SegmentKind] {
        &self.segments
    }

    /// Placeholder names in left-to-right order
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Matches this pattern against a concrete path
    ///
    /// Returns `None` when segment counts differ or any literal segment
    /// differs; the fold stops at the first mismatching literal. Placeholders
    /// bind the path segment verbatim, with no validation.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path_segments: Vec<&str> = split_segments(path).collect();

        if path_segments.len() != self.segments.len() {
            return None;
        }

        self.segments
            .iter()
            .zip(path_segments)
            .try_fold(Params::new(), |mut params, (segment, value)| match segment {
                SegmentKind::Param(name) => {
                    params.insert(name.as_str(), value);
                    Some(params)
                }
                SegmentKind::Static(literal) if literal == value => Some(params),
                SegmentKind::Static(_) => None,
            })
    }

    /// Generates a concrete path by substituting `params` into the template
    ///
    /// Returns `None` if any placeholder has no value. Extra params are
    /// ignored.
    ///
    /// ```
    /// use planscope_router::{Params, RoutePattern};
    ///
    /// let pattern = RoutePattern::parse("/demo/plans/[id]");
    /// let params: Params = [("id", "tbp-9")].into_iter().collect();
    /// assert_eq!(pattern.generate_url(&params).as_deref(), Some("/demo/plans/tbp-9"));
    /// ```
    pub fn generate_url(&self, params: &Params) -> Option<String> {
        let segments: Option<Vec<&str>> = self
            .segments
            .iter()
            .map(|segment| match segment {
                SegmentKind::Param(name) => params.get(name),
                SegmentKind::Static(literal) => Some(literal.as_str()),
            })
            .collect();

        segments.map(|segs| format!("/{}", segs.join("/")))
    }
}

/// Matches a template string against a path in one call
///
/// Convenience wrapper that compiles `pattern` and matches it. Prefer a
/// pre-compiled [`RoutePattern`] when the same template is matched often.
///
/// ```
/// use planscope_router::match_route;
///
/// let params = match_route("/dashboard/permits/[id]", "/dashboard/permits/77").unwrap();
/// assert_eq!(params.get("id"), Some("77"));
///
/// // Literal-only match succeeds with zero params
/// assert!(match_route("/pricing", "/pricing").unwrap().is_empty());
///
/// // Different segment counts never match
/// assert!(match_route("/dashboard/permits/[id]", "/dashboard/permits").is_none());
/// ```
pub fn match_route(pattern: &str, path: &str) -> Option<Params> {
    RoutePattern::parse(pattern).matches(path)
}
