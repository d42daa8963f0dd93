//! Dashboard feeds
//!
//! The paid dashboard and the demo dashboard show the same four recent
//! feeds with a search box over the active tab. They differ only in the
//! provider they read from and in where their detail links point.

use futures::try_join;
use planscope_router::RouteTable;
use serde::Serialize;
use tracing::info;

use crate::records::{ProviderError, Record, RecordKind, RecordProvider};
use crate::routes::{detail_route_name, Page};

/// The four recent feeds, loaded together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    meetings: Vec<Record>,
    permits: Vec<Record>,
    applications: Vec<Record>,
    plans: Vec<Record>,
}

impl Dashboard {
    /// Fetches every feed concurrently; any failing feed fails the load
    pub async fn load(provider: &dyn RecordProvider) -> Result<Self, ProviderError> {
        let (meetings, permits, applications, plans) = try_join!(
            provider.recent(RecordKind::Meeting),
            provider.recent(RecordKind::Permit),
            provider.recent(RecordKind::Application),
            provider.recent(RecordKind::Plan),
        )?;

        let dashboard = Self {
            meetings,
            permits,
            applications,
            plans,
        };
        info!(total = dashboard.total(), "dashboard feeds loaded");
        Ok(dashboard)
    }

    pub fn feed(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Meeting => &self.meetings,
            RecordKind::Permit => &self.permits,
            RecordKind::Application => &self.applications,
            RecordKind::Plan => &self.plans,
        }
    }

    /// Records of one feed matching `query`, in feed order
    pub fn search(&self, kind: RecordKind, query: &str) -> Vec<&Record> {
        self.feed(kind)
            .iter()
            .filter(|record| record.matches_query(query))
            .collect()
    }

    pub fn total(&self) -> usize {
        RecordKind::ALL.iter().map(|kind| self.feed(*kind).len()).sum()
    }

    /// Where a row of the dashboard links to
    pub fn detail_path(routes: &RouteTable<Page>, record: &Record, demo: bool) -> Option<String> {
        routes.url_for(&detail_route_name(record.kind(), demo), &[("id", record.id())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FixtureStore;
    use crate::routes::app_routes;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_fills_every_feed() {
        let store = FixtureStore::demo().unwrap();
        let dashboard = Dashboard::load(&store).await.unwrap();

        for kind in RecordKind::ALL {
            assert!(dashboard.feed(kind).iter().all(|record| record.kind() == kind));
        }
        assert_eq!(dashboard.total(), 5);
    }

    #[tokio::test]
    async fn test_detail_path_follows_dashboard_mode() {
        let store = FixtureStore::demo().unwrap();
        let routes = app_routes();
        let dashboard = Dashboard::load(&store).await.unwrap();
        let plan = &dashboard.feed(RecordKind::Plan)[0];

        assert_eq!(
            Dashboard::detail_path(&routes, plan, true).as_deref(),
            Some("/demo/plans/demo-plan-1")
        );
        assert_eq!(
            Dashboard::detail_path(&routes, plan, false).as_deref(),
            Some("/dashboard/plans/demo-plan-1")
        );
    }
}
