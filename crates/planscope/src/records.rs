//! Record types and the data-provider contract
//!
//! Detail pages only ever ask a provider for one record by id. How the
//! provider sources it is its own business; [`FixtureStore`] serves the demo
//! mode from a static JSON document.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::navigation::NavigationState;
use crate::routes::Page;

/// The four record feeds shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Meeting,
    Permit,
    Application,
    Plan,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Meeting,
        RecordKind::Permit,
        RecordKind::Application,
        RecordKind::Plan,
    ];

    /// Path segment of the feed, e.g. `meetings`
    pub fn feed(&self) -> &'static str {
        match self {
            RecordKind::Meeting => "meetings",
            RecordKind::Permit => "permits",
            RecordKind::Application => "applications",
            RecordKind::Plan => "plans",
        }
    }

    pub fn from_feed(feed: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.feed() == feed)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Meeting => "meeting",
            RecordKind::Permit => "permit",
            RecordKind::Application => "application",
            RecordKind::Plan => "plan",
        };
        f.pad(name)
    }
}

/// Committee meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub city: String,
    pub meeting_date: Option<String>,
    #[serde(default)]
    pub decisions_count: u32,
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Building permit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    pub id: String,
    pub city: String,
    pub permit_date: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub essence: Option<String>,
    #[serde(default)]
    pub gush: Option<String>,
    #[serde(default)]
    pub helka: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request (application) publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub city: String,
    pub request_id: String,
    pub published_at: Option<String>,
    pub applicant_name: String,
    pub description: String,
    #[serde(default)]
    pub gush: Option<String>,
    #[serde(default)]
    pub helka: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plan publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPublication {
    pub id: String,
    pub city: String,
    #[serde(default)]
    pub plan_number: Option<String>,
    pub published_at: Option<String>,
    pub message_type: String,
    #[serde(default)]
    pub plan_goal: Option<String>,
    #[serde(default)]
    pub plan_main_points: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Meeting(Meeting),
    Permit(Permit),
    Application(Application),
    Plan(PlanPublication),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Meeting(m) => &m.id,
            Record::Permit(p) => &p.id,
            Record::Application(a) => &a.id,
            Record::Plan(p) => &p.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Meeting(_) => RecordKind::Meeting,
            Record::Permit(_) => RecordKind::Permit,
            Record::Application(_) => RecordKind::Application,
            Record::Plan(_) => RecordKind::Plan,
        }
    }

    /// One-line heading for lists
    pub fn title(&self) -> String {
        match self {
            Record::Meeting(m) => format!("Meeting {}", m.meeting_id.as_deref().unwrap_or(&m.id)),
            Record::Permit(p) => format!("Permit {}", p.request_id.as_deref().unwrap_or(&p.id)),
            Record::Application(a) => format!("Application {}", a.request_id),
            Record::Plan(p) => p.plan_goal.clone().unwrap_or_else(|| p.message_type.clone()),
        }
    }

    /// Fields the dashboard search box looks at for this feed
    fn search_fields(&self) -> Vec<&str> {
        match self {
            Record::Meeting(m) => vec![m.city.as_str(), m.id.as_str(), m.meeting_id.as_deref().unwrap_or_default()],
            Record::Permit(p) => vec![
                p.city.as_str(),
                p.id.as_str(),
                p.request_id.as_deref().unwrap_or_default(),
                p.essence.as_deref().unwrap_or_default(),
            ],
            Record::Application(a) => vec![a.city.as_str(), a.request_id.as_str(), a.applicant_name.as_str()],
            Record::Plan(p) => vec![
                p.city.as_str(),
                p.plan_number.as_deref().unwrap_or_default(),
                p.plan_goal.as_deref().unwrap_or_default(),
            ],
        }
    }

    /// Case-insensitive substring search; an empty query matches everything
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },
    #[error("record backend failed: {0}")]
    Backend(String),
}

/// Source of dashboard records
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Most recent records of one feed
    async fn recent(&self, kind: RecordKind) -> Result<Vec<Record>, ProviderError>;

    async fn get_by_id(&self, kind: RecordKind, id: &str) -> Result<Record, ProviderError>;
}

/// Contents of a fixture document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub permits: Vec<Permit>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub plans: Vec<PlanPublication>,
}

/// Demo fixture document bundled with the crate
pub const DEMO_FIXTURES: &str = include_str!("../fixtures/demo.json");

/// In-memory provider backed by a fixture document
///
/// An optional latency is awaited before every answer, the way the demo
/// backend simulates network delay.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    fixtures: Fixtures,
    latency: Duration,
}

impl FixtureStore {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures,
            latency: Duration::ZERO,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// The bundled demo fixtures
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FIXTURES).context("Bundled demo fixtures are malformed")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures file: {:?}", path))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse fixtures file: {:?}", path))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn records(&self, kind: RecordKind) -> Vec<Record> {
        match kind {
            RecordKind::Meeting => self.fixtures.meetings.iter().cloned().map(Record::Meeting).collect(),
            RecordKind::Permit => self.fixtures.permits.iter().cloned().map(Record::Permit).collect(),
            RecordKind::Application => self
                .fixtures
                .applications
                .iter()
                .cloned()
                .map(Record::Application)
                .collect(),
            RecordKind::Plan => self.fixtures.plans.iter().cloned().map(Record::Plan).collect(),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl RecordProvider for FixtureStore {
    async fn recent(&self, kind: RecordKind) -> Result<Vec<Record>, ProviderError> {
        self.simulate_latency().await;
        Ok(self.records(kind))
    }

    async fn get_by_id(&self, kind: RecordKind, id: &str) -> Result<Record, ProviderError> {
        self.simulate_latency().await;
        debug!(%kind, %id, "fixture lookup");
        self.records(kind)
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| ProviderError::NotFound {
                kind,
                id: id.to_string(),
            })
    }
}

/// What a detail page shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// The current page is not a detail page
    NotApplicable,
    Loaded(Record),
    /// Inline "failed to load" message
    Failed(String),
}

/// Loads the record a detail page is bound to
///
/// Provider failures are turned into [`DetailView::Failed`]; nothing
/// propagates past this call.
pub async fn load_detail(provider: &dyn RecordProvider, state: &NavigationState) -> DetailView {
    let Page::Detail { kind, .. } = state.page else {
        return DetailView::NotApplicable;
    };
    let Some(id) = state.params.get("id") else {
        return DetailView::Failed(format!("missing {} id", kind));
    };

    match provider.get_by_id(kind, id).await {
        Ok(record) => DetailView::Loaded(record),
        Err(err) => {
            warn!(path = %state.path, error = %err, "failed to load record");
            DetailView::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_feed(kind.feed()), Some(kind));
        }
        assert_eq!(RecordKind::from_feed("decisions"), None);
    }

    #[test]
    fn test_demo_fixtures_parse() {
        let store = FixtureStore::demo().unwrap();
        for kind in RecordKind::ALL {
            assert!(!store.records(kind).is_empty(), "no {} fixtures", kind);
        }
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let json = r#"{"meetings":[{"id":"m","city":"Haifa","meeting_date":null,"decisions_count":2,"chair":"R. Levi"}]}"#;
        let store = FixtureStore::from_json(json).unwrap();
        let records = store.records(RecordKind::Meeting);
        let Record::Meeting(meeting) = &records[0] else {
            panic!("expected a meeting");
        };
        assert_eq!(meeting.extra.get("chair"), Some(&Value::from("R. Levi")));
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let store = FixtureStore::demo().unwrap();
        let record = &store.records(RecordKind::Plan)[0];
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["kind"], "plan");
        assert_eq!(json["id"], record.id());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let store = FixtureStore::demo().unwrap();
        for kind in RecordKind::ALL {
            assert!(store.records(kind).iter().all(|record| record.matches_query("")));
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let store = FixtureStore::default();
        let err = store.get_by_id(RecordKind::Permit, "nope").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { kind: RecordKind::Permit, .. }));
        assert_eq!(err.to_string(), "permit not found: nope");
    }
}
