//! Navigation state manager
//!
//! Owns the single current path of a running dashboard and everything
//! derived from it. Consumers receive a cloned [`Navigator`] and either read
//! the state directly or subscribe to changes.
//!
//! Writes happen only through [`Navigator::navigate`] and through the
//! history pop listener installed by [`Navigator::listen`]. Both publish on
//! a `tokio::sync::watch` channel, so the last write always wins.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use planscope_router::{normalize_path, Params, RouteTable};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::history::{History, ListenerId};
use crate::routes::Page;

/// The current path and what it resolves to
///
/// `params` and `page` are always recomputed from `path` against the route
/// table; they are never set on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub path: String,
    pub params: Params,
    pub page: Page,
}

impl NavigationState {
    /// Resolves `path` against `routes`; unmatched paths become `NotFound`
    pub fn resolve(routes: &RouteTable<Page>, path: String) -> Self {
        let (page, params) = match routes.match_path(&path) {
            Some(m) => (*m.handler(), m.params),
            None => (Page::NotFound, Params::empty()),
        };
        Self { path, params, page }
    }
}

struct Shared {
    routes: RouteTable<Page>,
    history: Arc<dyn History>,
    state: watch::Sender<NavigationState>,
    listener: Mutex<Option<ListenerId>>,
}

impl Shared {
    fn publish(&self, path: String) {
        let state = NavigationState::resolve(&self.routes, path);
        debug!(path = %state.path, page = ?state.page, params = state.params.len(), "navigation state published");
        self.state.send_replace(state);
    }

    fn sync_from_history(&self, event_location: &str) {
        let location = self
            .history
            .location()
            .unwrap_or_else(|_| event_location.to_string());
        let path = normalize_path(&location).into_owned();
        info!(%path, "external history change");
        self.publish(path);
    }

    fn remove_listener(&self) {
        if let Some(id) = self.listener.lock().take() {
            self.history.remove_pop_listener(id);
            debug!(?id, "history listener removed");
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.remove_listener();
    }
}

/// Handle to the shared navigation state
///
/// Cheap to clone; every clone reads and writes the same state. The history
/// listener is removed when the last clone is dropped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use planscope::history::DisallowedHistory;
/// use planscope::navigation::Navigator;
/// use planscope::routes::app_routes;
///
/// // History writes fail, navigation still succeeds
/// let navigator = Navigator::new(app_routes(), Arc::new(DisallowedHistory::new()));
/// navigator.navigate("/dashboard/meetings/xyz");
///
/// assert_eq!(navigator.current_path(), "/dashboard/meetings/xyz");
/// assert_eq!(navigator.params().get("id"), Some("xyz"));
/// ```
#[derive(Clone)]
pub struct Navigator {
    shared: Arc<Shared>,
}

impl Navigator {
    /// Starts at the platform's current location, or `/` if it has none
    pub fn new(routes: RouteTable<Page>, history: Arc<dyn History>) -> Self {
        let location = match history.location() {
            Ok(location) => location,
            Err(err) => {
                debug!(error = %err, "no platform location, starting at root");
                String::new()
            }
        };
        Self::with_initial_path(routes, history, &location)
    }

    pub fn with_initial_path(routes: RouteTable<Page>, history: Arc<dyn History>, path: &str) -> Self {
        let initial = NavigationState::resolve(&routes, normalize_path(path).into_owned());
        let (state, _) = watch::channel(initial);

        Self {
            shared: Arc::new(Shared {
                routes,
                history,
                state,
                listener: Mutex::new(None),
            }),
        }
    }

    /// Moves to `target`
    ///
    /// Malformed input is normalized (`""` → `/`, `pricing` → `/pricing`);
    /// any other target is stored exactly as given.
    /// The history write is best-effort: a failure is logged and the
    /// in-memory state is updated regardless.
    pub fn navigate(&self, target: &str) {
        let path = normalize_path(target).into_owned();

        if let Err(err) = self.shared.history.push_state(&path) {
            warn!(%path, error = %err, "unable to update history, falling back to in-memory routing");
        }

        info!(%path, "navigate");
        self.shared.publish(path);
    }

    /// Installs the back/forward listener
    ///
    /// Only the first call installs anything; later calls are no-ops until
    /// [`Navigator::unlisten`] is called.
    pub fn listen(&self) {
        let mut slot = self.shared.listener.lock();
        if slot.is_some() {
            return;
        }

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let listener = Box::new(move |location: &str| {
            if let Some(shared) = weak.upgrade() {
                shared.sync_from_history(location);
            }
        });

        match self.shared.history.add_pop_listener(listener) {
            Ok(id) => {
                debug!(?id, "history listener installed");
                *slot = Some(id);
            }
            Err(err) => warn!(error = %err, "unable to listen for history changes"),
        }
    }

    /// Removes the back/forward listener, if installed
    pub fn unlisten(&self) {
        self.shared.remove_listener();
    }

    pub fn is_listening(&self) -> bool {
        self.shared.listener.lock().is_some()
    }

    /// Receiver notified of every published state
    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> NavigationState {
        self.shared.state.borrow().clone()
    }

    pub fn current_path(&self) -> String {
        self.shared.state.borrow().path.clone()
    }

    pub fn params(&self) -> Params {
        self.shared.state.borrow().params.clone()
    }

    pub fn page(&self) -> Page {
        self.shared.state.borrow().page
    }

    pub fn routes(&self) -> &RouteTable<Page> {
        &self.shared.routes
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &*self.shared.state.borrow())
            .field("routes_count", &self.shared.routes.len())
            .field("listening", &self.is_listening())
            .finish()
    }
}
