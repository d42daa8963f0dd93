// crates/planscope/src/lib.rs
//! PlanScope - municipal-planning dashboard shell
//!
//! Wires the pure route resolver from `planscope-router` into a running
//! application:
//! - [`navigation`]: the single navigation state and its change feed
//! - [`history`]: best-effort address-bar and back/forward integration
//! - [`routes`]: the dashboard's pages and route table
//! - [`link`]: click handling that navigates without a page reload
//! - [`auth`]: session snapshot and route guards
//! - [`records`]: record types and the provider contract
//! - [`dashboard`]: the four recent feeds and their search
//! - [`watchlist`]: the user's tracked records
//! - [`config`], [`logging`]: ambient setup for the binary

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod link;
pub mod logging;
pub mod navigation;
pub mod records;
pub mod routes;
pub mod watchlist;

pub use auth::{enforce, AuthState, Guard, GuardDecision, Plan, User};
pub use config::Config;
pub use dashboard::Dashboard;
pub use history::{DisallowedHistory, History, HistoryError, MemoryHistory, NoopHistory};
pub use link::{ClickEvent, Link};
pub use navigation::{NavigationState, Navigator};
pub use records::{load_detail, DetailView, FixtureStore, ProviderError, Record, RecordKind, RecordProvider};
pub use routes::{app_routes, Page};
pub use watchlist::{WatchKind, WatchedItem, Watchlist, WatchlistError};

// Re-export the router so consumers need a single dependency
pub use planscope_router;
