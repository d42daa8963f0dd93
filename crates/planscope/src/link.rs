//! In-app links
//!
//! A [`Link`] renders as a plain `<a href>` so it still works without
//! scripting, but a primary click is intercepted: the default full-page
//! navigation is suppressed and the [`Navigator`] moves instead.

use maud::{html, Markup};
use planscope_router::normalize_path;

use crate::navigation::Navigator;

/// `scheme:` prefix as in RFC 3986: a letter, then letters, digits, `+`, `-`, `.`
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Pointer click as delivered by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    /// 0 = primary, 1 = middle, 2 = secondary
    pub button: u16,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    default_prevented: bool,
}

impl ClickEvent {
    /// Plain primary-button click
    pub fn primary() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Clicks the user expects to open a new tab or window
    fn is_modified(&self) -> bool {
        self.button != 0 || self.ctrl || self.meta || self.shift || self.alt
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    href: String,
    label: String,
    class: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            class: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Everything except absolute (`https:`, `mailto:`) and
    /// protocol-relative (`//host`) hrefs is handled in-app
    pub fn is_internal(&self) -> bool {
        !self.href.starts_with("//") && !has_scheme(&self.href)
    }

    /// Handles a click; returns true when the navigator took over
    ///
    /// ```
    /// use std::sync::Arc;
    /// use planscope::history::NoopHistory;
    /// use planscope::link::{ClickEvent, Link};
    /// use planscope::navigation::Navigator;
    /// use planscope::routes::app_routes;
    ///
    /// let navigator = Navigator::new(app_routes(), Arc::new(NoopHistory));
    /// let mut event = ClickEvent::primary();
    ///
    /// assert!(Link::new("/pricing", "Pricing").on_click(&navigator, &mut event));
    /// assert!(event.default_prevented());
    /// assert_eq!(navigator.current_path(), "/pricing");
    /// ```
    pub fn on_click(&self, navigator: &Navigator, event: &mut ClickEvent) -> bool {
        if event.is_modified() || !self.is_internal() {
            return false;
        }
        event.prevent_default();
        navigator.navigate(&self.href);
        true
    }

    /// Navbar highlighting: `/` only on the root, anything else by prefix
    pub fn is_active(&self, current_path: &str) -> bool {
        match normalize_path(&self.href).as_ref() {
            "/" => current_path == "/",
            href => current_path.starts_with(href),
        }
    }

    pub fn render(&self, current_path: &str) -> Markup {
        let current = self.is_active(current_path).then_some("page");
        html! {
            a href=(self.href) class=[self.class.as_deref()] aria-current=[current] {
                (self.label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NoopHistory;
    use crate::routes::app_routes;
    use std::sync::Arc;

    fn navigator() -> Navigator {
        Navigator::new(app_routes(), Arc::new(NoopHistory))
    }

    #[test]
    fn test_modified_click_left_to_platform() {
        let navigator = navigator();
        let mut event = ClickEvent {
            ctrl: true,
            ..ClickEvent::primary()
        };

        assert!(!Link::new("/dashboard", "Dashboard").on_click(&navigator, &mut event));
        assert!(!event.default_prevented());
        assert_eq!(navigator.current_path(), "/");
    }

    #[test]
    fn test_external_link_left_to_platform() {
        let navigator = navigator();
        let mut event = ClickEvent::primary();

        assert!(!Link::new("https://example.org", "Docs").on_click(&navigator, &mut event));
        assert!(!Link::new("//cdn.example.org/x", "CDN").on_click(&navigator, &mut event));
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_relative_link_navigates_in_app() {
        let navigator = navigator();
        let mut event = ClickEvent::primary();
        let link = Link::new("pricing", "Pricing");

        assert!(link.is_internal());
        assert!(link.on_click(&navigator, &mut event));
        assert!(event.default_prevented());
        assert_eq!(navigator.current_path(), "/pricing");
        assert!(link.is_active("/pricing"));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.org"));
        assert!(has_scheme("mailto:clerk@example.org"));
        assert!(!has_scheme("pricing"));
        assert!(!has_scheme("/dashboard/meetings/a:b"));
        assert!(!has_scheme("1http:x"));
    }

    #[test]
    fn test_is_active() {
        let home = Link::new("/", "Home");
        let dashboard = Link::new("/dashboard", "Dashboard");

        assert!(home.is_active("/"));
        assert!(!home.is_active("/dashboard"));
        assert!(dashboard.is_active("/dashboard"));
        assert!(dashboard.is_active("/dashboard/meetings/1"));
        assert!(!dashboard.is_active("/watchlist"));
    }

    #[test]
    fn test_render() {
        let link = Link::new("/watchlist", "Watchlist").class("nav");
        assert_eq!(
            link.render("/watchlist").into_string(),
            r#"<a href="/watchlist" class="nav" aria-current="page">Watchlist</a>"#
        );
        assert_eq!(
            Link::new("/", "Home").render("/pricing").into_string(),
            r#"<a href="/">Home</a>"#
        );
    }
}
