// File: src/routes.rs
// Purpose: The dashboard's static route table and the pages it dispatches to

use planscope_router::RouteTable;
use serde::Serialize;

use crate::auth::Guard;
use crate::records::RecordKind;

/// Every screen the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum Page {
    Landing,
    Pricing,
    Login,
    Payment,
    Dashboard,
    Watchlist,
    MyPlan,
    DemoDashboard,
    /// Single-record view; `demo` pages read from the fixture store
    Detail { kind: RecordKind, demo: bool },
    /// No registered pattern matched
    NotFound,
}

impl Page {
    /// Access requirement enforced before the page renders
    pub fn guard(&self) -> Guard {
        match self {
            Page::Dashboard | Page::Watchlist => Guard::Paid,
            Page::MyPlan | Page::Payment => Guard::Authenticated,
            _ => Guard::Open,
        }
    }

    /// The page actually rendered; unknown paths fall back to the landing page
    pub fn rendered(&self) -> Page {
        match self {
            Page::NotFound => Page::Landing,
            other => *other,
        }
    }

    /// Pages served from the demo fixtures
    pub fn is_demo(&self) -> bool {
        matches!(self, Page::DemoDashboard | Page::Detail { demo: true, .. })
    }
}

/// Route name of a detail page, e.g. `meetings` or `demo-meetings`
pub fn detail_route_name(kind: RecordKind, demo: bool) -> String {
    if demo {
        format!("demo-{}", kind.feed())
    } else {
        kind.feed().to_string()
    }
}

/// Builds the application's route table
///
/// Static pages first, then demo detail pages, then dashboard detail pages.
/// This one table drives both dispatch and parameter extraction.
pub fn app_routes() -> RouteTable<Page> {
    let table = RouteTable::new()
        .route("/", Page::Landing)
        .route("/home", Page::Landing)
        .route("/pricing", Page::Pricing)
        .route("/login", Page::Login)
        .route("/payment", Page::Payment)
        .route("/dashboard", Page::Dashboard)
        .route("/watchlist", Page::Watchlist)
        .route("/my-plan", Page::MyPlan)
        .route("/demo/dashboard", Page::DemoDashboard);

    [true, false].into_iter().fold(table, |table, demo| {
        let prefix = if demo { "/demo" } else { "/dashboard" };
        RecordKind::ALL.into_iter().fold(table, |table, kind| {
            table.named_route(
                &detail_route_name(kind, demo),
                &format!("{}/{}/[id]", prefix, kind.feed()),
                Page::Detail { kind, demo },
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detail_patterns_registered() {
        let routes = app_routes();
        let patterns: Vec<&str> = routes.patterns().skip(9).collect();
        assert_eq!(
            patterns,
            vec![
                "/demo/meetings/[id]",
                "/demo/permits/[id]",
                "/demo/applications/[id]",
                "/demo/plans/[id]",
                "/dashboard/meetings/[id]",
                "/dashboard/permits/[id]",
                "/dashboard/applications/[id]",
                "/dashboard/plans/[id]",
            ]
        );
    }

    #[test]
    fn test_home_alias_is_landing() {
        let routes = app_routes();
        assert_eq!(*routes.match_path("/home").unwrap().handler(), Page::Landing);
    }

    #[test]
    fn test_not_found_renders_landing() {
        assert_eq!(Page::NotFound.rendered(), Page::Landing);
        assert_eq!(Page::Pricing.rendered(), Page::Pricing);
    }

    #[test]
    fn test_demo_pages() {
        assert!(Page::DemoDashboard.is_demo());
        assert!(Page::Detail { kind: RecordKind::Meeting, demo: true }.is_demo());
        assert!(!Page::Detail { kind: RecordKind::Meeting, demo: false }.is_demo());
        assert!(!Page::Dashboard.is_demo());
    }

    #[test]
    fn test_guards() {
        assert_eq!(Page::Dashboard.guard(), Guard::Paid);
        assert_eq!(Page::Watchlist.guard(), Guard::Paid);
        assert_eq!(Page::MyPlan.guard(), Guard::Authenticated);
        assert_eq!(Page::Payment.guard(), Guard::Authenticated);
        assert_eq!(Page::DemoDashboard.guard(), Guard::Open);
        assert_eq!(
            Page::Detail { kind: RecordKind::Permit, demo: false }.guard(),
            Guard::Open
        );
    }

    #[test]
    fn test_detail_route_names() {
        assert_eq!(detail_route_name(RecordKind::Plan, true), "demo-plans");
        assert_eq!(detail_route_name(RecordKind::Meeting, false), "meetings");
    }
}
