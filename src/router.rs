//! Resolve URLs against the route table and navigate between routes.
//!
//! The router is owned by the app and handed to it at bootstrap, there is no global router. It is
//! generic over the [`History`] strategy so navigation can be exercised without a browser.
//!
//! [`History`]: ../history/trait.History.html

use log::{debug, warn};
use crate::config::{scheme_len, BasePath};
use crate::error::{Error, Result};
use crate::history::History;
use crate::route::{Route, RouteTable};

/// What the router is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The outlet shows the last resolved view (or nothing, if the last URL matched no route).
    Idle,
    /// The URL changed and is being matched against the route table.
    Resolving,
}

/// Translates between URLs and routes.
#[derive(Debug)]
pub struct Router<H> {
    routes: RouteTable,
    history: H,
    base: BasePath,
    state: State,
    resolved: Option<Route>,
}

impl<H: History> Router<H> {
    /// Create a router over the given routes.
    pub fn new(routes: RouteTable, history: H, base: BasePath) -> Self {
        Router {
            routes: routes,
            history: history,
            base: base,
            state: State::Idle,
            resolved: None,
        }
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The base path all locations are relative to.
    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// The history strategy.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// The current navigation state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The route resolved by the last call to [`navigate`] or [`sync`], if it matched.
    ///
    /// [`navigate`]: #method.navigate
    /// [`sync`]: #method.sync
    pub fn resolved(&self) -> Option<&Route> {
        self.resolved.as_ref()
    }

    /// Match a URL or path against the route table.
    ///
    /// The scheme, host, query string and fragment are ignored and the base path is removed before
    /// an exact lookup. URLs outside of the base path match nothing.
    pub fn resolve(&self, url: &str) -> Option<&Route> {
        let path = self.base.strip(path_of(url))?;
        self.routes.get(path)
    }

    /// Resolve the history's current location.
    pub fn current(&self) -> Result<Option<&Route>> {
        let location = self.history.location()?;
        Ok(self.resolve(&location))
    }

    /// Link target for the given route path, including the base path.
    pub fn href(&self, path: &str) -> String {
        self.base.join(path)
    }

    /// Push a history entry for `target` and resolve it.
    ///
    /// `target` is relative to the base path. Navigating to the current location resolves again
    /// without pushing a duplicate entry.
    pub fn navigate(&mut self, target: &str) -> Result<Option<&Route>> {
        self.state = State::Resolving;

        let url = self.base.join(target);
        let pushed = match self.history.location() {
            Ok(ref location) if *location == url => Ok(()),
            _ => self.history.push(&url),
        };
        if let Err(e) = pushed {
            self.state = State::Idle;
            return Err(e);
        }

        debug!("navigating to {}", url);
        Ok(self.settle(&url))
    }

    /// Navigate to the route with the given name.
    pub fn navigate_named(&mut self, name: &str) -> Result<Option<&Route>> {
        let path = self.routes.by_name(name)
            .ok_or_else(|| Error::UnknownRoute(name.to_owned()))?
            .path;
        self.navigate(path)
    }

    /// Resolve the history's current location after it was changed from outside of the router,
    /// for example by the browser's back button.
    pub fn sync(&mut self) -> Result<Option<&Route>> {
        self.state = State::Resolving;

        let location = match self.history.location() {
            Ok(location) => location,
            Err(e) => {
                self.state = State::Idle;
                return Err(e);
            }
        };

        Ok(self.settle(&location))
    }

    fn settle(&mut self, url: &str) -> Option<&Route> {
        let resolved = self.resolve(url).copied();
        match resolved {
            Some(ref route) => debug!("resolved {} to {}", url, route.name),
            None => warn!("no route matches {}", url),
        }

        self.resolved = resolved;
        self.state = State::Idle;
        self.resolved.as_ref()
    }
}

/// The path portion of a URL.
fn path_of(url: &str) -> &str {
    // drop scheme and authority
    let (url, absolute) = match scheme_len(url) {
        Some(n) => {
            let rest = &url[n..];
            let end = rest.find(|c: char| c == '/' || c == '?' || c == '#').unwrap_or(rest.len());
            (&rest[end..], true)
        }
        None => (url, false),
    };

    // drop query and fragment
    let path = match url.find(|c: char| c == '?' || c == '#') {
        Some(i) => &url[..i],
        None => url,
    };

    if absolute && path.is_empty() { "/" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::view::View;

    fn router(base: &str, initial: &str) -> (Router<MemoryHistory>, MemoryHistory) {
        let history = MemoryHistory::new(initial);
        let router = Router::new(RouteTable::default(), history.clone(), BasePath::new(base));
        (router, history)
    }

    #[test]
    fn path_of_url() {
        assert_eq!(path_of("http://localhost:8080"), "/");
        assert_eq!(path_of("http://localhost:8080/"), "/");
        assert_eq!(path_of("https://example.com/funding-rate-viewer/rates?x=1#top"), "/funding-rate-viewer/rates");
        assert_eq!(path_of("/rates#top"), "/rates");
        assert_eq!(path_of("/rates?sort=desc"), "/rates");
        assert_eq!(path_of("/rates"), "/rates");
        assert_eq!(path_of("http://localhost:8080?x=/rates"), "/");
        assert_eq!(path_of("/rates?next=https://example.com/"), "/rates");
        assert_eq!(path_of("/rates#https://example.com/news"), "/rates");
    }

    #[test]
    fn url_in_query_is_ignored() {
        let (root, _) = router("/", "/");
        assert_eq!(root.resolve("/rates?next=https://example.com/").map(|r| r.name), Some("Rates"));

        let (mut router, history) = router("/funding-rate-viewer/", "/funding-rate-viewer/");

        assert_eq!(router.resolve("/funding-rate-viewer/rates?next=https://example.com/").map(|r| r.name), Some("Rates"));

        let route = router.navigate("/rates?next=https://example.com").unwrap().copied();
        assert_eq!(route.map(|r| r.name), Some("Rates"));
        assert_eq!(history.location().unwrap(), "/funding-rate-viewer/rates?next=https://example.com");
    }

    #[test]
    fn every_route_resolves_to_itself() {
        let (router, _) = router("/", "/");

        for route in router.routes() {
            assert_eq!(router.resolve(route.path), Some(route));
        }
    }

    #[test]
    fn resolve_under_base() {
        let (router, _) = router("/funding-rate-viewer/", "/funding-rate-viewer/");

        assert_eq!(router.resolve("/funding-rate-viewer/").map(|r| r.name), Some("News"));
        assert_eq!(router.resolve("/funding-rate-viewer").map(|r| r.name), Some("News"));
        assert_eq!(router.resolve("/funding-rate-viewer/rates").map(|r| r.name), Some("Rates"));
        assert_eq!(
            router.resolve("https://someone.github.io/funding-rate-viewer/rates?x=1").map(|r| r.name),
            Some("Rates"),
        );

        // outside of the base path
        assert_eq!(router.resolve("/rates"), None);
        assert_eq!(router.resolve("/"), None);
    }

    #[test]
    fn undeclared_paths_resolve_to_nothing() {
        let (router, _) = router("/", "/");

        for path in &["/news", "/rates/", "/rates/btc", "/RATES", "/index.html", ""] {
            assert_eq!(router.resolve(path), None, "{:?} should not resolve", path);
        }
    }

    #[test]
    fn current_location() {
        let (router, _) = router("/funding-rate-viewer/", "/funding-rate-viewer/rates");
        assert_eq!(router.current().unwrap().map(|r| r.view), Some(View::Rates));
    }

    #[test]
    fn navigate_pushes_and_resolves() {
        let (mut router, history) = router("/funding-rate-viewer/", "/funding-rate-viewer/");

        let route = router.navigate("/rates").unwrap().copied();
        assert_eq!(route.map(|r| r.name), Some("Rates"));
        assert_eq!(router.state(), State::Idle);
        assert_eq!(router.resolved().map(|r| r.name), Some("Rates"));
        assert_eq!(history.entries(), vec![
            "/funding-rate-viewer/".to_owned(),
            "/funding-rate-viewer/rates".to_owned(),
        ]);

        let route = router.navigate("/").unwrap().copied();
        assert_eq!(route.map(|r| r.name), Some("News"));
        assert_eq!(history.location().unwrap(), "/funding-rate-viewer/");
    }

    #[test]
    fn navigate_to_current_location_does_not_push() {
        let (mut router, history) = router("/", "/rates");

        router.navigate("/rates").unwrap();
        router.navigate("/rates").unwrap();

        assert_eq!(history.entries(), vec!["/rates".to_owned()]);
        assert_eq!(router.resolved().map(|r| r.name), Some("Rates"));
    }

    #[test]
    fn navigate_to_undeclared_path() {
        let (mut router, history) = router("/", "/");

        assert_eq!(router.navigate("/missing").unwrap(), None);
        assert_eq!(router.resolved(), None);
        assert_eq!(router.state(), State::Idle);
        assert_eq!(history.location().unwrap(), "/missing");
    }

    #[test]
    fn navigate_named() {
        let (mut router, history) = router("/funding-rate-viewer/", "/funding-rate-viewer/");

        assert_eq!(router.navigate_named("Rates").unwrap().map(|r| r.path), Some("/rates"));
        assert_eq!(history.location().unwrap(), "/funding-rate-viewer/rates");

        assert_eq!(router.navigate_named("Missing"), Err(Error::UnknownRoute("Missing".to_owned())));
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn sync_follows_back_button() {
        let (mut router, history) = router("/", "/");

        router.navigate("/rates").unwrap();
        assert!(history.back());

        assert_eq!(router.sync().unwrap().map(|r| r.name), Some("News"));
        assert_eq!(router.resolved().map(|r| r.view), Some(View::News));
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn href_is_prefixed_once() {
        let (router, _) = router("/funding-rate-viewer/", "/funding-rate-viewer/");

        assert_eq!(router.href("/rates"), "/funding-rate-viewer/rates");
        assert_eq!(router.href(&router.href("/rates")), "/funding-rate-viewer/rates");
    }
}
