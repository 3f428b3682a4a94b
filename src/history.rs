//! History strategies used by the router to read the current location and record navigation.

use std::rc::Rc;
use std::cell::RefCell;
use wasm_bindgen::JsValue;
use crate::error::{self, Error, Result};

/// Where the router reads the current location from and pushes new entries to.
pub trait History {
    /// The current absolute path, including the base path.
    fn location(&self) -> Result<String>;

    /// Push a new history entry for the given absolute path.
    fn push(&self, url: &str) -> Result<()>;
}

/// History backed by the browser's History API.
///
/// Back and forward navigation is reported by the browser as a `popstate` event, which the app
/// listens for.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

impl BrowserHistory {
    /// Use the browser's history.
    pub fn new() -> Self {
        BrowserHistory
    }
}

impl History for BrowserHistory {
    fn location(&self) -> Result<String> {
        web_sys::window()
            .ok_or(Error::NoWindow)?
            .location()
            .pathname()
            .map_err(error::js("couldn't get location"))
    }

    fn push(&self, url: &str) -> Result<()> {
        web_sys::window()
            .ok_or(Error::NoWindow)?
            .history()
            .map_err(error::js("couldn't get history handle"))?
            .push_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(error::js("error updating history"))
    }
}

#[derive(Debug)]
struct Entries {
    stack: Vec<String>,
    index: usize,
}

/// In-memory history, for hosts without a browser history and for tests.
///
/// Clones share the same entries, so a clone kept outside of the router observes every push.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Entries>>,
}

impl MemoryHistory {
    /// Start with a single entry.
    pub fn new(initial: impl Into<String>) -> Self {
        MemoryHistory {
            entries: Rc::new(RefCell::new(Entries {
                stack: vec![initial.into()],
                index: 0,
            })),
        }
    }

    /// Step back one entry. Returns false if already at the first entry.
    pub fn back(&self) -> bool {
        let mut entries = self.entries.borrow_mut();
        if entries.index == 0 {
            return false;
        }
        entries.index -= 1;
        true
    }

    /// Step forward one entry. Returns false if already at the last entry.
    pub fn forward(&self) -> bool {
        let mut entries = self.entries.borrow_mut();
        if entries.index + 1 >= entries.stack.len() {
            return false;
        }
        entries.index += 1;
        true
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().stack.clone()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Result<String> {
        let entries = self.entries.borrow();
        Ok(entries.stack[entries.index].clone())
    }

    fn push(&self, url: &str) -> Result<()> {
        let mut entries = self.entries.borrow_mut();

        // pushing discards any forward entries, same as the browser
        let index = entries.index + 1;
        entries.stack.truncate(index);
        entries.stack.push(url.to_owned());
        entries.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_back() {
        let history = MemoryHistory::new("/");

        history.push("/rates").unwrap();
        assert_eq!(history.location(), Ok("/rates".to_owned()));

        assert!(history.back());
        assert_eq!(history.location(), Ok("/".to_owned()));
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.location(), Ok("/rates".to_owned()));
        assert!(!history.forward());
    }

    #[test]
    fn push_discards_forward_entries() {
        let history = MemoryHistory::new("/");
        history.push("/a").unwrap();
        history.push("/b").unwrap();
        history.back();
        history.back();
        history.push("/c").unwrap();

        assert_eq!(history.entries(), vec!["/".to_owned(), "/c".to_owned()]);
        assert!(!history.forward());
    }

    #[test]
    fn clones_share_entries() {
        let history = MemoryHistory::new("/");
        let observer = history.clone();

        history.push("/rates").unwrap();
        assert_eq!(observer.location(), Ok("/rates".to_owned()));
    }
}
