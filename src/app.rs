//! Application bootstrap.
//!
//! An app is built from the root [`Shell`] component, given a [`Router`], and mounted onto a host
//! element:
//!
//! ```no_run
//! use funding_rate_viewer::app::AppBuilder;
//! use funding_rate_viewer::config::BasePath;
//! use funding_rate_viewer::history::BrowserHistory;
//! use funding_rate_viewer::route::RouteTable;
//! use funding_rate_viewer::router::Router;
//! use funding_rate_viewer::view::Shell;
//!
//! # fn main() -> funding_rate_viewer::error::Result<()> {
//! let router = Router::new(RouteTable::default(), BrowserHistory::new(), BasePath::default());
//! let app = AppBuilder::new(Shell::default())
//!     .router(router)
//!     .mount("#app")?;
//!
//! app.navigate("/rates");
//! # Ok(())
//! # }
//! ```
//!
//! A builder without a router has no `mount` method, the initial route can't be resolved without
//! one. Mounting consumes the builder.
//!
//! [`Shell`]: ../view/struct.Shell.html
//! [`Router`]: ../router/struct.Router.html

pub mod detach;
pub mod dispatch;

pub use crate::app::detach::Detach;
pub use crate::app::dispatch::{Dispatch, Dispatcher};

use std::rc::Rc;
use std::cell::RefCell;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::error::{self, Error, Result};
use crate::history::History;
use crate::patch::{PatchSet, Storage};
use crate::route::Route;
use crate::router::Router;
use crate::vdom::DomIter;
use crate::view::Shell;

/// Attribute set on the host element while an app is mounted on it.
pub const MOUNTED_ATTRIBUTE: &str = "data-app-mounted";

/// Messages processed by the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Navigate to a path relative to the base path.
    Navigate(String),
    /// The browser changed the URL (back/forward).
    UrlChanged,
}

/// A pending render.
pub type ScheduledRender = (i32, Closure<dyn FnMut(f64)>);

/// All of the functions one might perform on a mounted app.
pub trait Application {
    /// Update the app with a message. Returns true if the app needs to be rendered again.
    fn update(&mut self, msg: Message) -> bool;
    /// Replace the rendered tree with a fresh render of the current route.
    fn render(&mut self, app: &Dispatcher) -> Result<()>;
    /// Get a reference to any pending rendering.
    fn get_scheduled_render(&mut self) -> &mut Option<ScheduledRender>;
    /// Store a reference to any pending rendering.
    fn set_scheduled_render(&mut self, handle: ScheduledRender);
    /// Store a listener that will be canceled when the app is detached.
    fn push_listener(&mut self, listener: (String, Closure<dyn FnMut(web_sys::Event)>));
    /// The currently resolved route.
    fn resolved(&self) -> Option<Route>;
    /// Resolve the initial route and render the app into its host element.
    fn attach(&mut self, app: &Dispatcher) -> Result<()>;
    /// Detach the app from the dom. A detached app ignores further messages and never renders
    /// again.
    fn detach(&mut self);
}

/// Builder without a router. Register one with [`router`] to be able to mount.
///
/// [`router`]: struct.AppBuilder.html#method.router
#[derive(Debug, Default)]
pub struct NoRouter;

/// Struct used to configure and attach an app to the DOM.
#[derive(Debug)]
pub struct AppBuilder<R> {
    shell: Shell,
    router: R,
}

impl Default for AppBuilder<NoRouter> {
    fn default() -> Self {
        AppBuilder::new(Shell::default())
    }
}

impl AppBuilder<NoRouter> {
    /// Start building an app around the given root component.
    pub fn new(shell: Shell) -> Self {
        AppBuilder {
            shell: shell,
            router: NoRouter,
        }
    }

    /// Register the router. It resolves the initial URL when the app is mounted and handles
    /// navigation afterwards.
    pub fn router<H: History>(self, router: Router<H>) -> AppBuilder<Router<H>> {
        let AppBuilder {
            shell,
            ..
        } = self;

        AppBuilder {
            shell: shell,
            router: router,
        }
    }
}

impl<H: History + 'static> AppBuilder<Router<H>> {
    /// Attach the app to the element matching `selector`.
    pub fn mount(self, selector: &str) -> Result<AppHandle> {
        let document = web_sys::window().ok_or(Error::NoWindow)?
            .document().ok_or(Error::NoDocument)?;

        let parent = document.query_selector(selector)
            .map_err(|_| Error::InvalidSelector(selector.to_owned()))?
            .ok_or_else(|| Error::MountTargetNotFound(selector.to_owned()))?;

        self.attach(parent)
    }

    /// Attach the app to the given element.
    ///
    /// The initial URL is resolved and rendered before this returns.
    pub fn attach(self, parent: web_sys::Element) -> Result<AppHandle> {
        if parent.has_attribute(MOUNTED_ATTRIBUTE) {
            return Err(Error::AlreadyMounted(describe(&parent)));
        }

        let AppBuilder {
            shell,
            router,
        } = self;

        let app = App {
            parent: parent.clone(),
            shell: shell,
            router: router,
            storage: Storage::default(),
            listeners: vec![],
            animation_frame_handle: None,
            detached: false,
        };

        // the browser only ever calls back into the app from a single thread, so a RefCell is
        // enough to let event handlers mutate it
        let app_rc = Rc::new(RefCell::new(Box::new(app) as Box<dyn Application>));
        let dispatcher = Dispatcher::new(Rc::clone(&app_rc));

        let attached = app_rc.borrow_mut().attach(&dispatcher);
        if let Err(e) = attached {
            app_rc.borrow_mut().detach();
            return Err(e);
        }

        // follow back and forward navigation
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let popstate = {
            let dispatcher = dispatcher.clone();
            Closure::wrap(
                Box::new(move |_: web_sys::Event| {
                    dispatcher.dispatch(Message::UrlChanged);
                }) as Box<dyn FnMut(web_sys::Event)>
            )
        };

        if let Err(e) = window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref()) {
            app_rc.borrow_mut().detach();
            return Err(error::js("failed to add event listener")(e));
        }

        app_rc.borrow_mut().push_listener(("popstate".to_owned(), popstate));

        info!("app mounted on {}", describe(&parent));

        // The listeners hold dispatchers, which keeps the app alive until it is detached.
        Ok(AppHandle {
            dispatcher: dispatcher,
        })
    }
}

/// A handle to a mounted app.
#[derive(Clone)]
pub struct AppHandle {
    dispatcher: Dispatcher,
}

impl AppHandle {
    /// The dispatcher used to send messages to the app.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Navigate to a path relative to the base path.
    ///
    /// The route is resolved immediately, the outlet is rendered on the next animation frame.
    pub fn navigate(&self, path: impl Into<String>) {
        self.dispatcher.dispatch(Message::Navigate(path.into()));
    }

    /// The currently resolved route, if any. `None` while the app is busy.
    pub fn resolved(&self) -> Option<Route> {
        self.dispatcher.app()
            .try_borrow()
            .ok()
            .and_then(|app| app.resolved())
    }
}

impl Dispatch<Message> for AppHandle {
    fn dispatch(&self, msg: Message) {
        self.dispatcher.dispatch(msg);
    }
}

impl Detach for AppHandle {
    /// Detach the app from the dom.
    ///
    /// Any elements that were created will be destroyed and event handlers will be removed.
    fn detach(&self) {
        match self.dispatcher.app().try_borrow_mut() {
            Ok(mut app) => app.detach(),
            Err(_) => error!("app is busy, can't detach"),
        }
    }
}

/// A mounted app: the shell, the router, and what was rendered into the host element.
struct App<H> {
    parent: web_sys::Element,
    shell: Shell,
    router: Router<H>,
    storage: Storage,
    listeners: Vec<(String, Closure<dyn FnMut(web_sys::Event)>)>,
    animation_frame_handle: Option<ScheduledRender>,
    detached: bool,
}

impl<H: History> Application for App<H> {
    fn update(&mut self, msg: Message) -> bool {
        if self.detached {
            debug!("app is detached, ignoring {:?}", msg);
            return false;
        }

        let before = self.router.resolved().copied();

        let result = match msg {
            Message::Navigate(path) => self.router.navigate(&path).map(|route| route.copied()),
            Message::UrlChanged => self.router.sync().map(|route| route.copied()),
        };

        match result {
            Ok(after) => after != before,
            Err(e) => {
                error!("navigation failed: {}", e);
                false
            }
        }
    }

    fn render(&mut self, app: &Dispatcher) -> Result<()> {
        self.animation_frame_handle = None;
        if self.detached {
            return Ok(());
        }

        // remove the old tree before building the new one
        self.storage.remove();

        let dom = self.shell.render(self.router.routes(), self.router.base(), self.router.resolved());
        self.storage = PatchSet::create(dom.dom_iter()).apply(&self.parent, app)?;

        Ok(())
    }

    fn get_scheduled_render(&mut self) -> &mut Option<ScheduledRender> {
        &mut self.animation_frame_handle
    }

    fn set_scheduled_render(&mut self, handle: ScheduledRender) {
        self.animation_frame_handle = Some(handle);
    }

    fn push_listener(&mut self, listener: (String, Closure<dyn FnMut(web_sys::Event)>)) {
        self.listeners.push(listener);
    }

    fn resolved(&self) -> Option<Route> {
        self.router.resolved().copied()
    }

    fn attach(&mut self, app: &Dispatcher) -> Result<()> {
        self.router.sync()?;
        self.render(app)?;
        self.parent.set_attribute(MOUNTED_ATTRIBUTE, "")
            .map_err(error::js("failed to mark host element"))
    }

    fn detach(&mut self) {
        self.detached = true;

        if let Some(window) = web_sys::window() {
            for (event, listener) in self.listeners.drain(..) {
                if let Err(e) = window.remove_event_listener_with_callback(&event, listener.as_ref().unchecked_ref()) {
                    error!("failed to remove {} listener: {:?}", event, e);
                }
            }

            if let Some((handle, _)) = self.animation_frame_handle.take() {
                if let Err(e) = window.cancel_animation_frame(handle) {
                    error!("failed to cancel animation frame: {:?}", e);
                }
            }
        }

        self.storage.remove();

        if let Err(e) = self.parent.remove_attribute(MOUNTED_ATTRIBUTE) {
            error!("failed to unmark host element: {:?}", e);
        }
    }
}

/// A short description of an element for log and error messages, e.g. `div#app`.
fn describe(element: &web_sys::Element) -> String {
    let id = element.id();
    let tag = element.tag_name().to_lowercase();
    if id.is_empty() {
        tag
    }
    else {
        format!("{}#{}", tag, id)
    }
}
