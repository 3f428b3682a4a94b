//! A simple builder for virtual dom trees.
//!
//! ```
//! use funding_rate_viewer::dom::Dom;
//!
//! let dom: Dom<()> = Dom::elem("ul")
//!     .attr("class", "news-list")
//!     .push(Dom::elem("li").push("first"))
//!     .push(Dom::elem("li").push("second"));
//! ```

use std::iter;
use crate::vdom::{DomItem, DomIter};

/// How an event is turned into a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler<Message> {
    /// Always produce this message.
    Msg(Message),
    /// Convert the event into a message.
    Event(fn(web_sys::Event) -> Option<Message>),
    /// Convert the event into a message, with the given message as input.
    MsgEvent(Message, fn(Message, web_sys::Event) -> Option<Message>),
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Elem { name: &'static str },
    Text { text: String },
}

/// A node in a virtual dom tree, along with its attributes, event handlers and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Dom<Message> {
    element: Node,
    attributes: Vec<(&'static str, String)>,
    events: Vec<(&'static str, Handler<Message>)>,
    children: Vec<Dom<Message>>,
}

impl<Message> Dom<Message> {
    /// Create a new element.
    pub fn elem(name: &'static str) -> Self {
        Dom {
            element: Node::Elem { name: name },
            attributes: vec![],
            events: vec![],
            children: vec![],
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Dom {
            element: Node::Text { text: text.into() },
            attributes: vec![],
            events: vec![],
            children: vec![],
        }
    }

    /// Add an attribute to this element.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Dispatch the given message when `trigger` fires.
    pub fn event(self, trigger: &'static str, msg: Message) -> Self {
        self.on(trigger, Handler::Msg(msg))
    }

    /// Handle `trigger` with the given handler.
    pub fn on(mut self, trigger: &'static str, handler: Handler<Message>) -> Self {
        self.events.push((trigger, handler));
        self
    }

    /// Append a child.
    pub fn push(mut self, child: impl Into<Dom<Message>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn extend(mut self, children: impl IntoIterator<Item = Dom<Message>>) -> Self {
        self.children.extend(children);
        self
    }
}

impl<Message> From<&str> for Dom<Message> {
    fn from(text: &str) -> Self {
        Dom::text(text)
    }
}

impl<Message> From<String> for Dom<Message> {
    fn from(text: String) -> Self {
        Dom::text(text)
    }
}

impl<Message> DomIter<Message> for Dom<Message> {
    fn dom_iter<'a>(&'a self) -> Box<dyn Iterator<Item = DomItem<'a, Message>> + 'a> {
        let node = iter::once(match self.element {
            Node::Elem { name } => DomItem::Element(name),
            Node::Text { ref text } => DomItem::Text(text),
        });

        let attributes = self.attributes.iter()
            .map(|(name, value)| DomItem::Attr { name: *name, value: value.as_str() });

        let events = self.events.iter()
            .map(|(trigger, handler)| DomItem::Event { trigger: *trigger, handler: handler.into() });

        let children = self.children.iter()
            .flat_map(|c| c.dom_iter());

        Box::new(node
            .chain(attributes)
            .chain(events)
            .chain(children)
            .chain(iter::once(DomItem::Up))
        )
    }
}

/// A list of sibling [`Dom`] trees without a common parent.
///
/// [`Dom`]: struct.Dom.html
#[derive(Debug, Clone, PartialEq)]
pub struct DomVec<Message>(Vec<Dom<Message>>);

impl<Message> DomVec<Message> {
    /// The top level nodes.
    pub fn nodes(&self) -> &[Dom<Message>] {
        &self.0
    }
}

impl<Message> From<Vec<Dom<Message>>> for DomVec<Message> {
    fn from(v: Vec<Dom<Message>>) -> Self {
        DomVec(v)
    }
}

impl<Message> DomIter<Message> for DomVec<Message> {
    fn dom_iter<'a>(&'a self) -> Box<dyn Iterator<Item = DomItem<'a, Message>> + 'a> {
        Box::new(self.0.iter().flat_map(|i| i.dom_iter()))
    }
}
