//! Personal watchlist
//!
//! A flat list of tracked records persisted as a JSON array, the same shape
//! the browser build keeps in local storage. Besides the four record feeds,
//! individual committee decisions can be watched; they have no detail page
//! and no provider lookup, so they are kept in the list but never resolved.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use planscope_router::RouteTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::records::{Record, RecordKind, RecordProvider};
use crate::routes::{detail_route_name, Page};

/// What a watched id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchKind {
    Meeting,
    Permit,
    Application,
    Plan,
    /// A single decision inside a meeting protocol
    Decision,
}

impl WatchKind {
    /// The record feed behind this kind; `None` for decisions
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            WatchKind::Meeting => Some(RecordKind::Meeting),
            WatchKind::Permit => Some(RecordKind::Permit),
            WatchKind::Application => Some(RecordKind::Application),
            WatchKind::Plan => Some(RecordKind::Plan),
            WatchKind::Decision => None,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "decision" | "decisions" => Some(WatchKind::Decision),
            feed => RecordKind::from_feed(feed).map(Self::from),
        }
    }
}

impl From<RecordKind> for WatchKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Meeting => WatchKind::Meeting,
            RecordKind::Permit => WatchKind::Permit,
            RecordKind::Application => WatchKind::Application,
            RecordKind::Plan => WatchKind::Plan,
        }
    }
}

impl fmt::Display for WatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record_kind() {
            Some(kind) => fmt::Display::fmt(&kind, f),
            None => f.pad("decision"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WatchKind,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("failed to access watchlist file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("watchlist file {path:?} is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    items: Vec<WatchedItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a watchlist; a missing or blank file is an empty list
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WatchlistError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(WatchlistError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        serde_json::from_str(&content).map_err(|source| WatchlistError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WatchlistError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| WatchlistError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| WatchlistError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Adds or removes `id`; returns whether it is watched afterwards
    pub fn toggle(&mut self, id: &str, kind: impl Into<WatchKind>) -> bool {
        self.toggle_at(id, kind, Utc::now())
    }

    pub fn toggle_at(&mut self, id: &str, kind: impl Into<WatchKind>, now: DateTime<Utc>) -> bool {
        let kind = kind.into();
        if self.contains(id) {
            self.items.retain(|item| item.id != id);
            debug!(%id, "removed from watchlist");
            false
        } else {
            self.items.push(WatchedItem {
                id: id.to_string(),
                kind,
                added_at: now,
            });
            debug!(%id, %kind, "added to watchlist");
            true
        }
    }

    pub fn items(&self) -> &[WatchedItem] {
        &self.items
    }

    pub fn filter(&self, kind: impl Into<WatchKind>) -> impl Iterator<Item = &WatchedItem> {
        let kind = kind.into();
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dashboard detail path of a watched item; decisions have none
    pub fn detail_path(routes: &RouteTable<Page>, item: &WatchedItem) -> Option<String> {
        let kind = item.kind.record_kind()?;
        routes.url_for(&detail_route_name(kind, false), &[("id", item.id.as_str())])
    }

    /// Fetches every watched record concurrently
    ///
    /// Records the provider cannot return are skipped, not reported.
    /// Decisions are skipped without a lookup.
    pub async fn resolve_items(
        &self,
        provider: &dyn RecordProvider,
    ) -> Vec<(WatchedItem, Record)> {
        let lookups = self.items.iter().filter_map(|item| {
            let kind = item.kind.record_kind()?;
            Some(async move { (item, provider.get_by_id(kind, &item.id).await) })
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(item, result)| match result {
                Ok(record) => Some((item.clone(), record)),
                Err(err) => {
                    warn!(id = %item.id, error = %err, "skipping watched item");
                    None
                }
            })
            .collect()
    }
}
