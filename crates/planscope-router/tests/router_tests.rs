//! Integration tests for planscope-router
//!
//! Organized by feature area:
//! - Pattern matching (literal, placeholder, segment counts)
//! - Route table resolution (ordering, no-match fallback)
//! - URL generation for named routes
//! - Path normalization

use planscope_router::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn dashboard_table() -> RouteTable<&'static str> {
    RouteTable::new()
        .named_route("meetings", "/dashboard/meetings/[id]", "meeting")
        .named_route("permits", "/dashboard/permits/[id]", "permit")
        .named_route("applications", "/dashboard/applications/[id]", "application")
        .named_route("plans", "/dashboard/plans/[id]", "plan")
        .named_route("demo-meetings", "/demo/meetings/[id]", "demo-meeting")
        .named_route("demo-permits", "/demo/permits/[id]", "demo-permit")
        .named_route("demo-applications", "/demo/applications/[id]", "demo-application")
        .named_route("demo-plans", "/demo/plans/[id]", "demo-plan")
}

// ============================================================================
// Pattern matching
// ============================================================================

#[rstest]
#[case("/dashboard/meetings/[id]", "/dashboard/meetings/abc-123", &[("id", "abc-123")])]
#[case("/cities/[city]/permits/[id]", "/cities/haifa/permits/9", &[("city", "haifa"), ("id", "9")])]
#[case("/[a]/[b]/[c]", "/x/y/z", &[("a", "x"), ("b", "y"), ("c", "z")])]
#[case("/pricing", "/pricing", &[])]
#[case("/", "/", &[])]
fn test_match_binds_every_placeholder(
    #[case] pattern: &str,
    #[case] path: &str,
    #[case] expected: &[(&str, &str)],
) {
    let params = match_route(pattern, path).expect("pattern should match");
    let bound: Vec<(&str, &str)> = params.iter().collect();
    assert_eq!(bound, expected.to_vec());
    assert_eq!(params.len(), RoutePattern::parse(pattern).param_names().len());
}

#[rstest]
#[case("/dashboard/meetings/[id]", "/dashboard/meetings")]
#[case("/dashboard/meetings/[id]", "/dashboard/meetings/1/items")]
#[case("/[a]", "/")]
#[case("/", "/anything")]
#[case("/pricing", "/pricing/extra")]
fn test_segment_count_mismatch_never_matches(#[case] pattern: &str, #[case] path: &str) {
    assert!(match_route(pattern, path).is_none());
}

#[rstest]
#[case("/dashboard/meetings/[id]", "/dashboard/permits/1")]
#[case("/dashboard/meetings/[id]", "/demo/meetings/1")]
#[case("/pricing", "/Pricing")]
#[case("/my-plan", "/my_plan")]
fn test_literal_mismatch_fails(#[case] pattern: &str, #[case] path: &str) {
    assert!(match_route(pattern, path).is_none());
}

#[test]
fn test_no_match_differs_from_empty_match() {
    assert_eq!(match_route("/login", "/login"), Some(Params::new()));
    assert_eq!(match_route("/login", "/logout"), None);
}

#[test]
fn test_extra_slashes_are_ignored() {
    let params = match_route("/dashboard/permits/[id]/", "//dashboard//permits/77/").unwrap();
    assert_eq!(params.get("id"), Some("77"));
}

#[test]
fn test_matching_is_deterministic() {
    let pattern = RoutePattern::parse("/demo/plans/[id]");
    let first = pattern.matches("/demo/plans/tbp-1");
    let second = pattern.matches("/demo/plans/tbp-1");
    assert_eq!(first, second);
    assert_eq!(first, match_route("/demo/plans/[id]", "/demo/plans/tbp-1"));
}

// ============================================================================
// Route table resolution
// ============================================================================

#[test]
fn test_resolves_second_pattern() {
    let table = RouteTable::new()
        .route("/dashboard/meetings/[id]", "meeting")
        .route("/dashboard/permits/[id]", "permit");

    let m = table.match_path("/dashboard/permits/77").unwrap();
    assert_eq!(m.route.pattern().as_str(), "/dashboard/permits/[id]");
    assert_eq!(*m.handler(), "permit");
    assert_eq!(m.params, [("id", "77")].into_iter().collect::<Params>());
}

#[test]
fn test_resolves_meeting_id() {
    let params = dashboard_table().resolve_params("/dashboard/meetings/xyz");
    assert_eq!(params.get("id"), Some("xyz"));
    assert_eq!(params.len(), 1);
}

#[rstest]
#[case("/pricing")]
#[case("/nonexistent/totally/unknown")]
#[case("/")]
#[case("")]
fn test_unregistered_paths_resolve_to_empty_params(#[case] path: &str) {
    let table = dashboard_table();
    assert!(table.match_path(path).is_none());
    assert!(table.resolve_params(path).is_empty());
}

#[test]
fn test_registration_order_decides_overlap() {
    let table = RouteTable::new()
        .route("/demo/[feed]/[id]", "generic")
        .route("/demo/meetings/[id]", "meeting");

    let m = table.match_path("/demo/meetings/5").unwrap();
    assert_eq!(*m.handler(), "generic");
    assert_eq!(m.params.get("feed"), Some("meetings"));
}

// ============================================================================
// URL generation
// ============================================================================

#[rstest]
#[case("meetings", "m-1", "/dashboard/meetings/m-1")]
#[case("demo-applications", "a-2", "/demo/applications/a-2")]
#[case("plans", "101-0123456", "/dashboard/plans/101-0123456")]
fn test_url_for_named_routes(#[case] name: &str, #[case] id: &str, #[case] expected: &str) {
    let table = dashboard_table();
    let url = table.url_for(name, &[("id", id)]).unwrap();
    assert_eq!(url, expected);

    // The generated path resolves back to the same route
    let m = table.match_path(&url).unwrap();
    assert_eq!(m.route.name(), Some(name));
    assert_eq!(m.params.get("id"), Some(id));
}

// ============================================================================
// Path normalization
// ============================================================================

#[rstest]
#[case("", "/")]
#[case("/", "/")]
#[case("dashboard", "/dashboard")]
#[case("/dashboard/", "/dashboard/")]
#[case("/demo//dashboard", "/demo//dashboard")]
#[case("/dashboard/meetings/x\\y", "/dashboard/meetings/x\\y")]
fn test_normalize(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_path(input), expected);
    assert!(is_valid_path(&normalize_path(input)));
}

#[test]
fn test_normalized_path_matches_like_the_raw_path() {
    let table = dashboard_table();
    let path = "/dashboard/meetings/x\\y";

    let normalized = normalize_path(path);
    let m = table.match_path(&normalized).unwrap();
    assert_eq!(m.params.get("id"), Some("x\\y"));
    assert_eq!(match_route("/dashboard/meetings/[id]", path), Some(m.params));
}
