use std::collections::BTreeMap;

use crate::config::PageConfig;
use crate::site::router::Route;

/// What a page container declares about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// Display title the particles spell out, if any.
    pub title: Option<String>,
    /// Whether the container has a content element that fades.
    pub has_content: bool,
}

/// Page containers the director switches between.
///
/// Implementations treat unknown routes as missing elements: lookups return `None` and mutations
/// do nothing.
pub trait PageHost {
    /// Declared page data for `route`.
    fn page(&self, route: Route) -> Option<PageInfo>;

    /// Style the page's content element.
    fn set_content(&mut self, route: Route, opacity: f64, offset_y: f64);

    /// Mark the page container active or inactive.
    fn set_active(&mut self, route: Route, active: bool);
}

/// Live state of one in-memory page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    /// Declared data.
    pub info: PageInfo,
    /// Whether the container is the active page.
    pub active: bool,
    /// Content opacity.
    pub content_opacity: f64,
    /// Content vertical offset in pixels.
    pub content_offset_y: f64,
}

/// In-memory [`PageHost`] built from configuration.
#[derive(Clone, Debug, Default)]
pub struct PageSet {
    pages: BTreeMap<&'static str, (Route, PageState)>,
    activations: usize,
}

impl PageSet {
    /// Build inactive pages from configuration.
    pub fn from_config(pages: &[PageConfig]) -> Self {
        let pages = pages
            .iter()
            .map(|p| {
                let title = p.title.clone().filter(|t| !t.trim().is_empty());
                let state = PageState {
                    info: PageInfo {
                        title,
                        has_content: p.has_content,
                    },
                    active: false,
                    content_opacity: 1.0,
                    content_offset_y: 0.0,
                };
                (p.route.name(), (p.route, state))
            })
            .collect();
        Self {
            pages,
            activations: 0,
        }
    }

    /// Live state for `route`.
    pub fn state(&self, route: Route) -> Option<&PageState> {
        self.pages.get(route.name()).map(|(_, s)| s)
    }

    /// Currently active route, if exactly one page is active.
    pub fn active(&self) -> Option<Route> {
        let mut active = self.pages.values().filter(|(_, s)| s.active);
        match (active.next(), active.next()) {
            (Some((route, _)), None) => Some(*route),
            _ => None,
        }
    }

    /// Number of times a page was switched to active.
    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl PageHost for PageSet {
    fn page(&self, route: Route) -> Option<PageInfo> {
        self.state(route).map(|s| s.info.clone())
    }

    fn set_content(&mut self, route: Route, opacity: f64, offset_y: f64) {
        let Some((_, state)) = self.pages.get_mut(route.name()) else {
            return;
        };
        if state.info.has_content {
            state.content_opacity = opacity.clamp(0.0, 1.0);
            state.content_offset_y = offset_y;
        }
    }

    fn set_active(&mut self, route: Route, active: bool) {
        let Some((_, state)) = self.pages.get_mut(route.name()) else {
            tracing::debug!(page = %route.page_id(), "page element missing");
            return;
        };
        if active && !state.active {
            self.activations += 1;
        }
        state.active = active;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/pages.rs"]
mod tests;
