//! Dom patching functionality.
//!
//! A [`PatchSet`] describes the operations needed to build a virtual dom tree in the browser.
//! [`PatchSet::apply`] performs them under a parent element, wiring event handlers to a
//! [`Dispatch`]er, and returns the [`Storage`] needed to tear the tree down again.
//!
//! The shell never diffs: every render removes the previous tree and builds the new one.
//!
//! [`PatchSet`]: struct.PatchSet.html
//! [`PatchSet::apply`]: struct.PatchSet.html#method.apply
//! [`Dispatch`]: ../app/dispatch/trait.Dispatch.html
//! [`Storage`]: struct.Storage.html

use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::app::Dispatch;
use crate::error::{self, Error, Result};
use crate::vdom::{DomItem, EventHandler};

/// A single operation on the dom.
#[derive(Debug, PartialEq)]
pub enum Patch<'a, Message> {
    /// Create an element of the given type as a child of the current node.
    CreateElement {
        /// The name/type of element that will be created.
        element: &'a str,
    },
    /// Create a text node as a child of the current node.
    CreateText {
        /// The text value of the node to create.
        text: &'a str,
    },
    /// Set an attribute on the current element.
    SetAttribute {
        /// The name of the attribute to set.
        name: &'a str,
        /// The value of the attribute.
        value: &'a str,
    },
    /// Add an event listener to the current element.
    AddListener {
        /// The event to listen for.
        trigger: &'a str,
        /// The handler producing messages for this event.
        handler: EventHandler<'a, Message>,
    },
    /// Finished with the current node, return to its parent.
    Up,
}

/// An ordered list of patches.
#[derive(PartialEq)]
pub struct PatchSet<'a, Message> {
    patches: Vec<Patch<'a, Message>>,
}

impl<'a, Message: fmt::Debug> fmt::Debug for PatchSet<'a, Message> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.patches.iter()).finish()
    }
}

impl<'a, Message> PatchSet<'a, Message> {
    /// The patches needed to build the given tree from nothing.
    pub fn create(items: impl Iterator<Item = DomItem<'a, Message>>) -> Self {
        let patches = items
            .map(|item| match item {
                DomItem::Element(element) => Patch::CreateElement { element: element },
                DomItem::Text(text) => Patch::CreateText { text: text },
                DomItem::Attr { name, value } => Patch::SetAttribute { name: name, value: value },
                DomItem::Event { trigger, handler } => Patch::AddListener { trigger: trigger, handler: handler },
                DomItem::Up => Patch::Up,
            })
            .collect();

        PatchSet {
            patches: patches,
        }
    }

    /// Number of patches in this set.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Whether this patch set does nothing.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Build the tree as the last children of `parent`. Events are dispatched via the given
    /// [`Dispatch`]er.
    ///
    /// [`Dispatch`]: ../app/dispatch/trait.Dispatch.html
    pub fn apply<D>(self, parent: &web_sys::Element, app: &D) -> Result<Storage>
    where
        Message: Clone + 'static,
        D: Dispatch<Message> + Clone + 'static,
    {
        let document = web_sys::window().ok_or(Error::NoWindow)?
            .document().ok_or(Error::NoDocument)?;

        let mut storage = Storage::default();
        match build(self.patches, &document, parent, app, &mut storage) {
            Ok(()) => Ok(storage),
            Err(e) => {
                // take out whatever was built before the failure
                storage.remove();
                Err(e)
            }
        }
    }
}

/// Run the patches, recording top level nodes and listeners in `storage` as they are created.
fn build<Message, D>(
    patches: Vec<Patch<Message>>,
    document: &web_sys::Document,
    parent: &web_sys::Element,
    app: &D,
    storage: &mut Storage,
) -> Result<()>
where
    Message: Clone + 'static,
    D: Dispatch<Message> + Clone + 'static,
{
    let mut stack: Vec<web_sys::Node> = vec![];

    for p in patches.into_iter() {
        match p {
            Patch::CreateElement { element } => {
                let node: web_sys::Node = document.create_element(element)
                    .map_err(error::js("failed to create element"))?
                    .into();
                append(&stack, parent, storage, &node)?;
                stack.push(node);
            }
            Patch::CreateText { text } => {
                let node: web_sys::Node = document.create_text_node(text).into();
                append(&stack, parent, storage, &node)?;
                stack.push(node);
            }
            Patch::SetAttribute { name, value } => {
                stack.last()
                    .and_then(|node| node.dyn_ref::<web_sys::Element>())
                    .ok_or_else(|| Error::Js {
                        context: "failed to set attribute",
                        message: format!("no element to set {:?} on", name),
                    })?
                    .set_attribute(name, value)
                    .map_err(error::js("failed to set attribute"))?;
            }
            Patch::AddListener { trigger, handler } => {
                let node = stack.last()
                    .ok_or_else(|| Error::Js {
                        context: "failed to add event listener",
                        message: format!("no node to listen for {:?} on", trigger),
                    })?;
                let closure = listener(handler, app.clone());
                node.add_event_listener_with_callback(trigger, closure.as_ref().unchecked_ref())
                    .map_err(error::js("failed to add event listener"))?;
                storage.closures.push(closure);
            }
            Patch::Up => {
                stack.pop();
            }
        }
    }

    Ok(())
}

/// Attach a new node to the node on top of the stack, or to `parent` if the stack is empty.
fn append(
    stack: &[web_sys::Node],
    parent: &web_sys::Element,
    storage: &mut Storage,
    node: &web_sys::Node,
) -> Result<()> {
    match stack.last() {
        Some(last) => {
            last.append_child(node).map_err(error::js("failed to insert child node"))?;
        }
        None => {
            parent.append_child(node).map_err(error::js("failed to insert child node"))?;
            storage.nodes.push(node.clone());
        }
    }
    Ok(())
}

/// Wrap an event handler in a JS closure that dispatches the resulting message.
fn listener<Message, D>(handler: EventHandler<Message>, app: D) -> Closure<dyn FnMut(web_sys::Event)>
where
    Message: Clone + 'static,
    D: Dispatch<Message> + 'static,
{
    match handler {
        EventHandler::Msg(msg) => {
            let msg = msg.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                app.dispatch(msg.clone())
            }) as Box<dyn FnMut(web_sys::Event)>)
        }
        EventHandler::Fn(f) => {
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(msg) = f(event) {
                    app.dispatch(msg);
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        }
        EventHandler::FnMsg(msg, f) => {
            let msg = msg.clone();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(msg) = f(msg.clone(), event) {
                    app.dispatch(msg);
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        }
    }
}

/// The top level nodes and the event closures created by applying a [`PatchSet`].
///
/// Dropping the storage drops the closures, but leaves the nodes in the dom; use [`remove`] to
/// take the tree out of the dom.
///
/// [`PatchSet`]: struct.PatchSet.html
/// [`remove`]: #method.remove
#[derive(Default)]
pub struct Storage {
    nodes: Vec<web_sys::Node>,
    closures: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Storage {
    /// The top level nodes that were created.
    pub fn nodes(&self) -> &[web_sys::Node] {
        &self.nodes
    }

    /// Remove the created nodes from the dom and release their event closures.
    pub fn remove(&mut self) {
        for node in self.nodes.drain(..) {
            if let Some(parent) = node.parent_node() {
                // the node was already detached if this fails
                let _ = parent.remove_child(&node);
            }
        }
        self.closures.clear();
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Storage {{ nodes: {}, closures: {} }}", self.nodes.len(), self.closures.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use crate::vdom::DomIter;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Go,
    }

    #[test]
    fn create_from_dom() {
        let dom: Dom<Msg> = Dom::elem("a")
            .attr("href", "/rates")
            .event("click", Msg::Go)
            .push("Rates");

        let patch_set = PatchSet::create(dom.dom_iter());

        assert_eq!(patch_set, PatchSet {
            patches: vec![
                Patch::CreateElement { element: "a" },
                Patch::SetAttribute { name: "href", value: "/rates" },
                Patch::AddListener { trigger: "click", handler: EventHandler::Msg(&Msg::Go) },
                Patch::CreateText { text: "Rates" },
                Patch::Up,
                Patch::Up,
            ],
        });
    }

    #[test]
    fn empty_patch_set() {
        let patch_set: PatchSet<Msg> = PatchSet::create(std::iter::empty());
        assert!(patch_set.is_empty());
        assert_eq!(patch_set.len(), 0);
    }
}
