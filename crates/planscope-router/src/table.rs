//! Ordered route tables
//!
//! A [`RouteTable`] is built once at startup and never mutated afterwards.
//! It is the single source of truth for both dispatch (which handler owns a
//! path) and parameter extraction (what that handler receives).

use std::collections::HashMap;

use tracing::trace;

use crate::{Params, RoutePattern};

/// A compiled pattern paired with the handler it dispatches to
#[derive(Debug, Clone)]
pub struct Route<T> {
    pattern: RoutePattern,
    name: Option<String>,
    handler: T,
}

impl<T> Route<T> {
    pub fn new(pattern: &str, handler: T) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            name: None,
            handler,
        }
    }

    /// Creates a named route, addressable through [`RouteTable::url_for`]
    pub fn named(name: impl Into<String>, pattern: &str, handler: T) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            name: Some(name.into()),
            handler,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &T {
        &self.handler
    }

    pub fn matches(&self, path: &str) -> Option<Params> {
        self.pattern.matches(path)
    }
}

/// Result of resolving a path against a table
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, T> {
    /// The first route, in registration order, whose pattern matched
    pub route: &'a Route<T>,
    /// Parameters bound by that pattern
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    pub fn handler(&self) -> &'a T {
        self.route.handler()
    }
}

/// Ordered list of routes; first match wins
///
/// # Examples
///
/// ```
/// use planscope_router::RouteTable;
///
/// let table = RouteTable::new()
///     .route("/dashboard/meetings/[id]", "meeting")
///     .route("/dashboard/permits/[id]", "permit");
///
/// let m = table.match_path("/dashboard/permits/77").unwrap();
/// assert_eq!(*m.handler(), "permit");
/// assert_eq!(m.params.get("id"), Some("77"));
///
/// // No match is a normal outcome, reported as empty params
/// assert!(table.resolve_params("/nonexistent/totally/unknown").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<Route<T>>,
    named_routes: HashMap<String, usize>,
}

impl<T> RouteTable<T> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            named_routes: HashMap::new(),
        }
    }

    /// Appends an unnamed route
    pub fn route(self, pattern: &str, handler: T) -> Self {
        self.with_route(Route::new(pattern, handler))
    }

    /// Appends a named route
    ///
    /// Re-using a name points it at the newer route; both stay matchable.
    pub fn named_route(self, name: &str, pattern: &str, handler: T) -> Self {
        self.with_route(Route::named(name, pattern, handler))
    }

    pub fn with_route(mut self, route: Route<T>) -> Self {
        if let Some(name) = route.name() {
            self.named_routes.insert(name.to_string(), self.routes.len());
        }
        self.routes.push(route);
        self
    }

    /// Finds the first route, in registration order, that matches `path`
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        let found = self.routes.iter().find_map(|route| {
            route
                .matches(path)
                .map(|params| RouteMatch { route, params })
        });

        if found.is_none() {
            trace!(%path, "no registered pattern matched");
        }
        found
    }

    /// Parameters of the first matching route, or empty when none matches
    pub fn resolve_params(&self, path: &str) -> Params {
        self.match_path(path)
            .map(|m| m.params)
            .unwrap_or_else(Params::empty)
    }

    /// Generates a path for a named route
    ///
    /// Returns `None` for an unknown name or a missing placeholder value.
    ///
    /// ```
    /// use planscope_router::RouteTable;
    ///
    /// let table = RouteTable::new().named_route("permits", "/dashboard/permits/[id]", ());
    /// assert_eq!(
    ///     table.url_for("permits", &[("id", "77")]).as_deref(),
    ///     Some("/dashboard/permits/77")
    /// );
    /// assert!(table.url_for("permits", &[]).is_none());
    /// ```
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let params: Params = params.iter().copied().collect();
        self.route_by_name(name)
            .and_then(|route| route.pattern().generate_url(&params))
    }

    pub fn route_by_name(&self, name: &str) -> Option<&Route<T>> {
        self.named_routes.get(name).map(|&index| &self.routes[index])
    }

    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Registered template strings in matching order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.pattern().as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
