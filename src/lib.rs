#![deny(missing_docs)]

//! Client shell for the funding rate viewer.
//!
//! The shell mounts on the `#app` element, renders a navigation header, and shows one of two views
//! in its outlet depending on the URL:
//!
//! | path     | name    | view                |
//! |----------|---------|---------------------|
//! | `/`      | `News`  | [`View::News`]      |
//! | `/rates` | `Rates` | [`View::Rates`]     |
//!
//! Paths are relative to the public base path the bundle is served from, see [`config`].
//!
//! [`View::News`]: view/enum.View.html#variant.News
//! [`View::Rates`]: view/enum.View.html#variant.Rates
//! [`config`]: config/index.html

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod history;
pub mod patch;
pub mod route;
pub mod router;
pub mod vdom;
pub mod view;

use crate::app::{AppBuilder, AppHandle};
use crate::config::Config;
use crate::history::BrowserHistory;
use crate::route::RouteTable;
use crate::router::Router;
use crate::view::Shell;

/// Build the app with the standard routes and browser history, and mount it as configured.
pub fn run(config: &Config) -> error::Result<AppHandle> {
    let router = Router::new(RouteTable::default(), BrowserHistory::new(), config.base_path.clone());

    AppBuilder::new(Shell::default())
        .router(router)
        .mount(&config.mount_selector)
}
