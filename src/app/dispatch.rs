//! Dispatch messages via a shared app handle.

use std::rc::Rc;
use std::cell::RefCell;
use std::collections::VecDeque;
use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::app::{Application, Message};

/// Something messages can be sent to.
pub trait Dispatch<Message> {
    /// Send a message.
    fn dispatch(&self, msg: Message);
}

/// A shared app handle.
///
/// Since events need to be dispatched from event handlers in the browser, they need a way to relay
/// messages back to the app. Clones share the app and the queue of pending messages.
pub struct Dispatcher {
    app: Rc<RefCell<Box<dyn Application>>>,
    pending: Rc<RefCell<VecDeque<Message>>>,
}

impl Clone for Dispatcher {
    fn clone(&self) -> Self {
        Dispatcher {
            app: Rc::clone(&self.app),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl Dispatcher {
    /// Create a dispatcher for the given app.
    pub fn new(app: Rc<RefCell<Box<dyn Application>>>) -> Self {
        Dispatcher {
            app: app,
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub(crate) fn app(&self) -> &Rc<RefCell<Box<dyn Application>>> {
        &self.app
    }

    /// Render on the next animation frame, unless a render is already pending.
    fn schedule_render(&self, app: &mut dyn Application) {
        if app.get_scheduled_render().is_some() {
            return;
        }

        let window = match web_sys::window() {
            Some(window) => window,
            None => {
                error!("couldn't get window handle, not rendering");
                return;
            }
        };

        let dispatcher = self.clone();
        let closure = Closure::wrap(
            Box::new(move |_: f64| {
                let mut app = dispatcher.app.borrow_mut();
                if let Err(e) = Application::render(&mut **app, &dispatcher) {
                    error!("error rendering app: {}", e);
                }
            }) as Box<dyn FnMut(f64)>
        );

        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.set_scheduled_render((handle, closure)),
            Err(e) => error!("error with request_animation_frame: {:?}", e),
        }
    }
}

impl Dispatch<Message> for Dispatcher {
    /// Dispatch a message to the associated app.
    ///
    /// Messages dispatched while the app is busy are queued and processed in order by the call
    /// that is already running.
    fn dispatch(&self, msg: Message) {
        // queue the message
        self.pending.borrow_mut().push_back(msg);

        // try to borrow the app
        let mut app = match self.app.try_borrow_mut() {
            Ok(app) => app,
            // already borrowed, the current borrower will process the queue
            Err(_) => return,
        };

        // now process queued messages
        loop {
            let msg = match self.pending.borrow_mut().pop_front() {
                Some(msg) => msg,
                None => break,
            };

            if Application::update(&mut **app, msg) {
                self.schedule_render(&mut **app);
            }
        }
    }
}
