//! The route table: a fixed mapping from navigable paths to views.

use std::collections::HashSet;
use std::slice;
use crate::error::{Error, Result};
use crate::view::View;

/// A declared mapping from a URL path to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Slash prefixed path, relative to the base path.
    pub path: &'static str,
    /// Unique name of this route.
    pub name: &'static str,
    /// The view rendered when this route is active.
    pub view: View,
}

impl Route {
    /// Declare a route.
    pub const fn new(path: &'static str, name: &'static str, view: View) -> Self {
        Route {
            path: path,
            name: name,
            view: view,
        }
    }
}

/// The routes known to the app.
pub const ROUTES: [Route; 2] = [
    Route::new("/", "News", View::News),
    Route::new("/rates", "Rates", View::Rates),
];

/// An ordered set of routes with unique paths and names. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a route table, checking that every path is slash prefixed and that paths and names
    /// are unique.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self> {
        let routes: Vec<Route> = routes.into_iter().collect();

        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(Error::InvalidPath(route.path.to_owned()));
            }
            if !paths.insert(route.path) {
                return Err(Error::DuplicatePath(route.path.to_owned()));
            }
            if !names.insert(route.name) {
                return Err(Error::DuplicateName(route.name.to_owned()));
            }
        }

        Ok(RouteTable {
            routes: routes,
        })
    }

    /// Find the route with exactly this path.
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// Find the route with this name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Iterate over the routes in declaration order.
    pub fn iter(&self) -> slice::Iter<Route> {
        self.routes.iter()
    }

    /// The number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether there are no routes at all.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable {
            routes: ROUTES.to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
