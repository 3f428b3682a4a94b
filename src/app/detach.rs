//! Detach an app from the DOM.

/// Detach an app from the DOM.
pub trait Detach {
    /// Remove everything the app rendered and stop listening for navigation.
    fn detach(&self);
}
