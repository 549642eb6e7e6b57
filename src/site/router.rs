//! Hash-fragment router over a fixed set of pages.

/// Known pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// `/` and every unrecognized path.
    Home,
    /// `/thoughts`
    Thoughts,
    /// `/projects`
    Projects,
    /// `/about`
    About,
}

impl Route {
    /// Every route, home first.
    pub const ALL: [Route; 4] = [Route::Home, Route::Thoughts, Route::Projects, Route::About];

    /// Resolve a path (`/projects`); unknown paths map to [`Route::Home`].
    pub fn from_path(path: &str) -> Self {
        match path {
            "/thoughts" => Self::Thoughts,
            "/projects" => Self::Projects,
            "/about" => Self::About,
            _ => Self::Home,
        }
    }

    /// Route name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Thoughts => "thoughts",
            Self::Projects => "projects",
            Self::About => "about",
        }
    }

    /// Canonical path.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Thoughts => "/thoughts",
            Self::Projects => "/projects",
            Self::About => "/about",
        }
    }

    /// Id of the page container element (`page-<name>`).
    pub fn page_id(self) -> String {
        format!("page-{}", self.name())
    }

    pub(crate) fn default_title(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Thoughts => Some("Thoughts"),
            Self::Projects => Some("Projects"),
            Self::About => Some("About"),
        }
    }
}

/// Notification sent to listeners on every route resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteChange {
    /// Previous route; `None` only on the first resolution.
    pub from: Option<Route>,
    /// Newly current route.
    pub to: Route,
    /// Path extracted from the fragment.
    pub path: String,
}

type Listener = Box<dyn FnMut(&RouteChange)>;

/// Tracks the current route from URL fragments.
#[derive(Default)]
pub struct Router {
    hash: String,
    current: Option<Route>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("hash", &self.hash)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Path carried by a fragment: `"#/about"` is `/about`; empty fragments are `/`.
pub fn path_from_hash(hash: &str) -> &str {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() { "/" } else { path }
}

impl Router {
    /// Router with no current route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked on every resolution.
    pub fn on_route_change(&mut self, listener: impl FnMut(&RouteChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Resolve `hash` (load or hash change), update the current route and notify listeners.
    pub fn handle_location(&mut self, hash: &str) -> RouteChange {
        self.hash = hash.to_owned();
        let path = path_from_hash(hash);
        let to = Route::from_path(path);
        let change = RouteChange {
            from: self.current.replace(to),
            to,
            path: path.to_owned(),
        };
        tracing::debug!(from = ?change.from, to = ?change.to, path = %change.path, "route resolved");
        for listener in &mut self.listeners {
            listener(&change);
        }
        change
    }

    /// Set the fragment to `path` and resolve it.
    ///
    /// Returns `None` without notifying anyone when the fragment is already `#{path}`, since
    /// assigning an identical fragment is not a change.
    pub fn navigate(&mut self, path: &str) -> Option<RouteChange> {
        let hash = format!("#{path}");
        if hash == self.hash {
            tracing::debug!(path, "fragment unchanged");
            return None;
        }
        Some(self.handle_location(&hash))
    }

    /// Current route, if any resolution happened.
    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Last fragment seen.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/router.rs"]
mod tests;
