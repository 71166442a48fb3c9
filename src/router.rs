//! The per-method routing table and registration façade.
//!
//! [`Router`] owns one independent route tree per HTTP method, created
//! lazily on first registration, and dispatches lookups to the tree of
//! the request's method. It also hosts the two fallback helpers an HTTP
//! layer needs on a miss: [`Router::fix_path`] (clean + case-insensitive
//! recovery, yielding a redirect target) and [`Router::allowed`] (the
//! `Allow` list for `OPTIONS` and 405 responses). Issuing redirects and
//! writing responses stays with the caller.
//!
//! Complete all registrations before sharing a router; lookups on a
//! finished router are read-only and freely concurrent.

use std::collections::HashMap;

use http::Method;
use tracing::debug;

use crate::error::RouteError;
use crate::path::clean;
use crate::tree::{Node, RouteMatch};

/// A router mapping `(method, path)` pairs to handlers of type `T`.
///
/// The payload is opaque to the router: register closures, function
/// pointers, service indices — anything the surrounding server wants to
/// dispatch on.
///
/// ```
/// use http::Method;
/// use switchyard::Router;
///
/// let mut router = Router::new();
/// router.get("/", "index")?;
/// router.get("/hello/:name", "hello")?;
///
/// let m = router.lookup(&Method::GET, "/hello/gopher");
/// assert_eq!(m.value, Some(&"hello"));
/// assert_eq!(m.params.get("name"), Some("gopher"));
/// # Ok::<(), switchyard::RouteError>(())
/// ```
#[derive(Debug)]
pub struct Router<T> {
    trees: HashMap<Method, Node<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// An empty router with no registered routes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// Register `value` for `pattern` under an arbitrary method.
    ///
    /// The verb shortcuts cover the common methods; this entry point
    /// exists for bulk loading and non-standard methods.
    pub fn handle(&mut self, method: Method, pattern: &str, value: T) -> Result<(), RouteError> {
        let root = self.trees.entry(method.clone()).or_default();
        root.insert(pattern, value)?;
        debug!(method = %method, pattern, "route registered");
        Ok(())
    }

    /// Shortcut for [`handle`](Self::handle) with `GET`.
    pub fn get(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::GET, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `HEAD`.
    pub fn head(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::HEAD, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `OPTIONS`.
    pub fn options(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::OPTIONS, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `POST`.
    pub fn post(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::POST, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `PUT`.
    pub fn put(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::PUT, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `PATCH`.
    pub fn patch(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::PATCH, pattern, value)
    }

    /// Shortcut for [`handle`](Self::handle) with `DELETE`.
    pub fn delete(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        self.handle(Method::DELETE, pattern, value)
    }

    /// Match a `(method, path)` pair.
    ///
    /// An unregistered method yields an empty result: no handler, no
    /// parameters, no trailing-slash hint.
    pub fn lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> RouteMatch<'r, 'p, T> {
        match self.trees.get(method) {
            Some(root) => root.lookup(path),
            None => RouteMatch::default(),
        }
    }

    /// Compute the redirect target for a path that missed: normalize it
    /// with [`clean`], then recover casing against the method's tree,
    /// tolerating one trailing-slash difference when
    /// `fix_trailing_slash` is set.
    ///
    /// A path that is (or cleans to) the root is never "fixed" — a miss
    /// on `/` has nowhere sensible to redirect.
    #[must_use]
    pub fn fix_path(
        &self,
        method: &Method,
        path: &str,
        fix_trailing_slash: bool,
    ) -> Option<String> {
        let root = self.trees.get(method)?;
        let cleaned = clean(path);
        if cleaned == "/" {
            return None;
        }
        root.recover_path(&cleaned, fix_trailing_slash)
    }

    /// The comma-separated `Allow` list for `path`, excluding
    /// `req_method` itself. `"*"` reports the server-wide method set.
    /// Empty when no other method matches; otherwise `OPTIONS` is
    /// always included last.
    #[must_use]
    pub fn allowed(&self, path: &str, req_method: &Method) -> String {
        let options = Method::OPTIONS;
        let mut allow: Vec<&str> = Vec::new();

        if path == "*" {
            for method in self.trees.keys() {
                if *method != options {
                    allow.push(method.as_str());
                }
            }
        } else {
            for (method, root) in &self.trees {
                // the requested method was already tried
                if method == req_method || *method == options {
                    continue;
                }
                if root.lookup(path).value.is_some() {
                    allow.push(method.as_str());
                }
            }
        }

        if allow.is_empty() {
            return String::new();
        }
        // deterministic output regardless of map iteration order
        allow.sort_unstable();
        allow.push(options.as_str());
        allow.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_method_misses_without_hint() {
        let mut router = Router::new();
        router.get("/path", 1).unwrap();

        let m = router.lookup(&Method::POST, "/path");
        assert!(m.value.is_none());
        assert!(m.params.is_empty());
        assert!(!m.trailing_slash_hint);
    }

    #[test]
    fn methods_register_into_independent_trees() {
        let mut router = Router::new();
        router.get("/thing/:id", "get").unwrap();
        router.post("/thing/:id", "post").unwrap();
        // the same position may carry a different wildcard name in
        // another method's tree
        router.put("/thing/:name", "put").unwrap();

        assert_eq!(router.lookup(&Method::GET, "/thing/7").value, Some(&"get"));
        assert_eq!(
            router.lookup(&Method::POST, "/thing/7").value,
            Some(&"post")
        );
        let m = router.lookup(&Method::PUT, "/thing/7");
        assert_eq!(m.value, Some(&"put"));
        assert_eq!(m.params.get("name"), Some("7"));
    }

    #[test]
    fn fix_path_never_rewrites_the_root() {
        let mut router = Router::new();
        router.get("/hi", ()).unwrap();
        assert_eq!(router.fix_path(&Method::GET, "/", true), None);

        // inputs that normalize to the root produce no target either
        assert_eq!(router.fix_path(&Method::GET, "/..//", true), None);
        assert_eq!(router.fix_path(&Method::GET, "//", true), None);
    }
}
