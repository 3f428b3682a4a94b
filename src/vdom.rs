//! Flattened virtual dom representation.
//!
//! A virtual dom tree is walked depth first and emitted as a stream of [`DomItem`]s. The
//! [`patch`] module turns that stream into real DOM nodes.
//!
//! [`DomItem`]: enum.DomItem.html
//! [`patch`]: ../patch/index.html

use crate::dom::Handler;

/// This represents an event handler. The handler can either always map to a specific message, or a
/// function can be provided that will transform the given [`web_sys::Event`] into a message. This
/// function must be a plain fn pointer and cannot capture any state from the environment.
///
/// [`web_sys::Event`]: https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.Event.html
#[derive(Debug, PartialEq)]
pub enum EventHandler<'a, Message> {
    /// A message that will be generated when this event associated with this handler fires.
    Msg(&'a Message),

    /// A callback that will convert a [`web_sys::Event`] into a message.
    ///
    /// [`web_sys::Event`]: https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.Event.html
    Fn(fn(web_sys::Event) -> Option<Message>),

    /// A callback that will convert a [`web_sys::Event`] into a message.
    ///
    /// This variation accepts a message to pass data into the callback.
    FnMsg(&'a Message, fn(Message, web_sys::Event) -> Option<Message>),
}

impl<'a, Message> Clone for EventHandler<'a, Message> {
    fn clone(&self) -> Self {
        match *self {
            EventHandler::Msg(msg) => EventHandler::Msg(msg),
            EventHandler::Fn(f) => EventHandler::Fn(f),
            EventHandler::FnMsg(msg, f) => EventHandler::FnMsg(msg, f),
        }
    }
}

impl<'a, Message> From<&'a Handler<Message>> for EventHandler<'a, Message> {
    fn from(handler: &'a Handler<Message>) -> Self {
        match handler {
            Handler::Msg(msg) => EventHandler::Msg(msg),
            Handler::Event(f) => EventHandler::Fn(*f),
            Handler::MsgEvent(msg, f) => EventHandler::FnMsg(msg, *f),
        }
    }
}

/// Items representing all of the data in the DOM tree.
///
/// The items emitted should always be in the same order, given the same input. Each entry
/// represents some aspect of a DOM node, in the order seen when walking the tree depth first
/// through all nodes and their attributes and events.
#[derive(Debug, PartialEq)]
pub enum DomItem<'a, Message> {
    /// An element in the tree.
    Element(&'a str),
    /// A text node in the tree.
    Text(&'a str),
    /// An attribute of the last node we saw.
    Attr {
        /// The attribute name.
        name: &'a str,
        /// The attribute value.
        value: &'a str,
    },
    /// An event handler from the last node we saw.
    Event {
        /// The trigger for this event.
        trigger: &'a str,
        /// The handler for this event.
        handler: EventHandler<'a, Message>,
    },
    /// We are finished processing children nodes, the next node is a sibling.
    Up,
}

/// This trait provides a way to iterate over a virtual dom representation.
pub trait DomIter<Message> {
    /// Return an iterator over the virtual dom.
    fn dom_iter<'a>(&'a self) -> Box<dyn Iterator<Item = DomItem<'a, Message>> + 'a>;
}
