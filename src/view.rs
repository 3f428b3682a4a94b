//! The views routes point at, and the root shell component that hosts them.
//!
//! The news feed and the funding rate table fill themselves in; the shell only provides the frame
//! each one lives in.

use std::fmt;
use wasm_bindgen::JsCast;
use crate::app::Message;
use crate::config::BasePath;
use crate::dom::{Dom, DomVec, Handler};
use crate::route::{Route, RouteTable};

/// Class set on the navigation link of the currently resolved route.
pub const ACTIVE_LINK_CLASS: &str = "router-link-active";

/// Class of the element the resolved view is rendered into.
pub const OUTLET_CLASS: &str = "router-view";

/// Columns of the funding rate table.
pub const RATE_COLUMNS: [&str; 4] = ["Exchange", "Symbol", "Funding Rate", "Next Funding"];

/// A renderable view. Each route in the route table points at one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Realtime news feed.
    News,
    /// Funding rate table.
    Rates,
}

impl View {
    /// Human readable title of this view.
    pub fn title(&self) -> &'static str {
        match self {
            View::News => "Realtime News",
            View::Rates => "Funding Rates",
        }
    }

    /// Render the frame for this view.
    pub fn render(&self) -> Dom<Message> {
        match self {
            View::News => Dom::elem("section")
                .attr("class", "realtime-news")
                .push(Dom::elem("h2").push(self.title()))
                .push(Dom::elem("ul").attr("class", "news-list")),
            View::Rates => Dom::elem("section")
                .attr("class", "funding-rates")
                .push(Dom::elem("h2").push(self.title()))
                .push(Dom::elem("table")
                    .attr("class", "funding-rate-table")
                    .push(Dom::elem("thead")
                        .push(Dom::elem("tr")
                            .extend(RATE_COLUMNS.iter().map(|column| {
                                Dom::elem("th").push(*column)
                            }))
                        )
                    )
                    .push(Dom::elem("tbody"))
                ),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The root component: a header with one navigation link per route, followed by the outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    title: String,
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new("Funding Rate Viewer")
    }
}

impl Shell {
    /// A shell with the given page title.
    pub fn new(title: impl Into<String>) -> Self {
        Shell {
            title: title.into(),
        }
    }

    /// The page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the shell with `current` in the outlet. An unresolved route leaves the outlet empty.
    pub fn render(&self, routes: &RouteTable, base: &BasePath, current: Option<&Route>) -> DomVec<Message> {
        let nav = Dom::elem("nav")
            .extend(routes.iter().map(|route| {
                let active = current.map_or(false, |current| current.path == route.path);
                link(route, base, active)
            }));

        let header = Dom::elem("header")
            .push(Dom::elem("h1").push(self.title.clone()))
            .push(nav);

        let outlet = Dom::elem("main").attr("class", OUTLET_CLASS);
        let outlet = match current {
            Some(route) => outlet.push(route.view.render()),
            None => outlet,
        };

        vec![header, outlet].into()
    }
}

fn link(route: &Route, base: &BasePath, active: bool) -> Dom<Message> {
    let a = Dom::elem("a")
        .attr("href", base.join(route.path))
        .push(route.view.title())
        .on("click", Handler::MsgEvent(Message::Navigate(route.path.to_owned()), |msg, e| {
            // let modified clicks open a new tab as usual
            if let Some(mouse) = e.dyn_ref::<web_sys::MouseEvent>() {
                if mouse.ctrl_key() || mouse.meta_key() || mouse.shift_key() {
                    return None;
                }
            }
            e.prevent_default();
            Some(msg)
        }));

    if active {
        a.attr("class", ACTIVE_LINK_CLASS)
    }
    else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdom::{DomItem, DomIter};

    fn attrs<'a>(items: &[DomItem<'a, Message>], name: &str) -> Vec<&'a str> {
        items.iter()
            .filter_map(|item| match item {
                DomItem::Attr { name: n, value } if *n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn texts<'a>(items: &[DomItem<'a, Message>]) -> Vec<&'a str> {
        items.iter()
            .filter_map(|item| match item {
                DomItem::Text(text) => Some(*text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn links_are_base_prefixed() {
        let routes = RouteTable::default();
        let base = BasePath::new("/funding-rate-viewer/");
        let dom = Shell::default().render(&routes, &base, routes.get("/"));
        let items: Vec<_> = dom.dom_iter().collect();

        assert_eq!(attrs(&items, "href"), vec!["/funding-rate-viewer/", "/funding-rate-viewer/rates"]);
    }

    #[test]
    fn marks_active_link() {
        let routes = RouteTable::default();
        let base = BasePath::new("/");
        let dom = Shell::default().render(&routes, &base, routes.get("/rates"));
        let items: Vec<_> = dom.dom_iter().collect();

        assert_eq!(attrs(&items, "class"), vec![ACTIVE_LINK_CLASS, OUTLET_CLASS, "funding-rates", "funding-rate-table"]);
    }

    #[test]
    fn outlet_holds_current_view() {
        let routes = RouteTable::default();
        let base = BasePath::new("/");
        let dom = Shell::default().render(&routes, &base, routes.get("/"));
        let items: Vec<_> = dom.dom_iter().collect();

        assert_eq!(texts(&items), vec!["Funding Rate Viewer", "Realtime News", "Funding Rates", "Realtime News"]);
        assert!(attrs(&items, "class").contains(&"realtime-news"));
    }

    #[test]
    fn unresolved_route_leaves_outlet_empty() {
        let routes = RouteTable::default();
        let base = BasePath::new("/");
        let dom = Shell::default().render(&routes, &base, None);
        let items: Vec<_> = dom.dom_iter().collect();

        // no active link, and the outlet is immediately closed
        assert_eq!(attrs(&items, "class"), vec![OUTLET_CLASS]);
        assert_eq!(
            &items[items.len() - 3..],
            &[
                DomItem::Element("main"),
                DomItem::Attr { name: "class", value: OUTLET_CLASS },
                DomItem::Up,
            ],
        );
    }

    #[test]
    fn rate_table_header() {
        let dom = View::Rates.render();
        let items: Vec<_> = dom.dom_iter().collect();

        assert_eq!(texts(&items), vec!["Funding Rates", "Exchange", "Symbol", "Funding Rate", "Next Funding"]);
    }
}
