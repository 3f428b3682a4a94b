//! Errors raised while building the route table, navigating, or mounting the app.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the client shell.
///
/// Resolving a path that is not in the route table is not an error, it simply produces no
/// route.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Route paths must start with a `/`.
    #[error("route path {0:?} must start with '/'")]
    InvalidPath(String),

    /// Two routes were declared with the same path.
    #[error("duplicate route path {0:?}")]
    DuplicatePath(String),

    /// Two routes were declared with the same name.
    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    /// Navigation by name to a route that was never declared.
    #[error("no route named {0:?}")]
    UnknownRoute(String),

    /// There is no `window` (not running in a browser).
    #[error("couldn't get window handle")]
    NoWindow,

    /// The window has no document.
    #[error("couldn't get document handle")]
    NoDocument,

    /// The host selector was rejected by `querySelector`.
    #[error("invalid mount selector {0:?}")]
    InvalidSelector(String),

    /// No element matched the host selector.
    #[error("no element matches mount selector {0:?}")]
    MountTargetNotFound(String),

    /// The host element already has an app mounted on it.
    #[error("an app is already mounted on {0:?}")]
    AlreadyMounted(String),

    /// A DOM or history call threw.
    #[error("{context}: {message}")]
    Js {
        /// What we were doing when the exception was raised.
        context: &'static str,
        /// The debug rendering of the thrown value.
        message: String,
    },
}

/// Build a `map_err` adapter that wraps a thrown `JsValue` with some context.
pub(crate) fn js(context: &'static str) -> impl FnOnce(JsValue) -> Error {
    move |value| Error::Js {
        context: context,
        message: format!("{:?}", value),
    }
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::MountTargetNotFound("#app".to_owned()).to_string(),
            "no element matches mount selector \"#app\"",
        );
        assert_eq!(
            Error::DuplicatePath("/rates".to_owned()).to_string(),
            "duplicate route path \"/rates\"",
        );
        assert_eq!(
            Error::Js { context: "pushing history", message: "oops".to_owned() }.to_string(),
            "pushing history: oops",
        );
    }
}
