//! Deployment configuration.
//!
//! The bundle is served from a public base path (`/funding-rate-viewer/` by default) rather than
//! the root of the host. Every URL the app emits, route links included, goes through
//! [`BasePath::join`] so it carries that prefix exactly once, and every URL the app reads goes
//! through [`BasePath::strip`] before it is matched against the route table.
//!
//! The values are fixed at compile time. Set `FUNDING_RATE_VIEWER_BASE` to change the base path
//! (keep it in sync with `public_url` in `Trunk.toml`) and `FUNDING_RATE_VIEWER_LOG` to change the
//! log level.
//!
//! [`BasePath::join`]: struct.BasePath.html#method.join
//! [`BasePath::strip`]: struct.BasePath.html#method.strip

use std::fmt;
use std::str::FromStr;

/// Base path used when `FUNDING_RATE_VIEWER_BASE` is not set.
pub const DEFAULT_BASE_PATH: &str = "/funding-rate-viewer/";

/// The selector of the element the app is mounted on.
pub const MOUNT_SELECTOR: &str = "#app";

/// A normalized URL path prefix. Always starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Normalize the given prefix.
    ///
    /// Missing leading and trailing slashes are added and an empty prefix becomes `/`.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            BasePath("/".to_owned())
        }
        else {
            BasePath(format!("/{}/", trimmed))
        }
    }

    /// The normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root base path `/`.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Prefix a URL with the base path.
    ///
    /// URLs that already carry the prefix and URLs pointing at another origin are returned
    /// unchanged, so joining is idempotent.
    pub fn join(&self, url: &str) -> String {
        if is_external(url) || (!self.is_root() && self.strip(url).is_some()) {
            return url.to_owned();
        }

        format!("{}{}", self.0, url.trim_start_matches('/'))
    }

    /// Remove the base path from an absolute path.
    ///
    /// The returned path always starts with `/`. The base without its trailing slash maps to `/`.
    /// Paths outside of the base path yield `None`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return if path.starts_with('/') { Some(path) } else { None };
        }

        // "/funding-rate-viewer/rates" -> "/rates"
        let without_slash = &self.0[..self.0.len() - 1];
        if path == without_slash {
            Some("/")
        }
        else if path.starts_with(&self.0[..]) {
            Some(&path[without_slash.len()..])
        }
        else {
            None
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        BasePath::new(option_env!("FUNDING_RATE_VIEWER_BASE").unwrap_or(DEFAULT_BASE_PATH))
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("//") || scheme_len(url).is_some()
}

/// Length of the `scheme://` prefix of an absolute URL.
///
/// A `://` that follows a `/`, `?` or `#` belongs to the path, query or fragment and is not a
/// scheme.
pub(crate) fn scheme_len(url: &str) -> Option<usize> {
    let i = url.find("://")?;
    let scheme = &url[..i];
    let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');

    if valid { Some(i + 3) } else { None }
}

/// Runtime configuration of the client shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Public base path the app is served from.
    pub base_path: BasePath,
    /// Selector of the host element.
    pub mount_selector: String,
    /// Level passed to the console logger.
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_path: BasePath::default(),
            mount_selector: MOUNT_SELECTOR.to_owned(),
            log_level: parse_level(option_env!("FUNDING_RATE_VIEWER_LOG")),
        }
    }
}

fn parse_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|level| log::Level::from_str(level).ok())
        .unwrap_or(log::Level::Info)
}
