//! Switchyard is a radix-tree HTTP request router.
//!
//! It maps an incoming `(method, path)` pair to exactly one registered
//! handler plus the path parameters it captured — a request matches one
//! route or none, never a "best" of several. Patterns mix static
//! segments, single-segment named parameters, and terminal catch-alls:
//!
//! ```
//! use http::Method;
//! use switchyard::Router;
//!
//! let mut router = Router::new();
//! router.get("/", "index")?;
//! router.get("/blog/:category/:post", "blog")?;
//! router.get("/files/*filepath", "files")?;
//!
//! let m = router.lookup(&Method::GET, "/blog/go/request-routers");
//! assert_eq!(m.value, Some(&"blog"));
//! assert_eq!(m.params.get("category"), Some("go"));
//! assert_eq!(m.params.get("post"), Some("request-routers"));
//!
//! // Catch-alls swallow the rest of the path, leading slash included.
//! let m = router.lookup(&Method::GET, "/files/static/app.js");
//! assert_eq!(m.params.get("filepath"), Some("/static/app.js"));
//! # Ok::<(), switchyard::RouteError>(())
//! ```
//!
//! When a path misses, the router reports how the caller could redirect
//! instead: a trailing-slash hint on the match result, and
//! [`Router::fix_path`] for `..`/`//` cleanup plus case-insensitive
//! recovery. The router itself never issues redirects or touches a
//! connection.
//!
//! # Architecture
//!
//! - [`error`] -- [`RouteError`], the registration error taxonomy, via
//!   `thiserror`. Lookups are total and never fail.
//! - [`params`] -- [`Params`], the ordered parameter list; borrows from
//!   the router and the matched path.
//! - [`path`] -- [`clean`], the path normalizer used by the fallback
//!   flow (never applied to registration patterns).
//! - [`tree`] -- the compressed prefix trie per method: insertion with
//!   edge splitting and priority ordering, matching with parameter
//!   extraction, case-insensitive path recovery.
//! - [`router`] -- [`Router`], one tree per `http::Method`, verb
//!   shortcuts, and the `Allow`-list helper for `OPTIONS`/405 replies.
//!
//! # Pattern syntax
//!
//! | Syntax | Matches |
//! |--------|---------|
//! | `/static` | exactly those bytes |
//! | `/:name` | one path segment, up to the next `/` |
//! | `/*name` | everything to the end of the path; must be last |
//!
//! Registering overlapping static and wildcard segments at the same
//! position is a conflict, reported at registration time.
//!
//! # Feature flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize` for [`Params`] and [`Param`] |
//!
//! # Concurrency
//!
//! Registration needs `&mut` access. Once registration is done, every
//! lookup is a pure read: share the router behind an `Arc` and match
//! from as many threads as you like without locking.

#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod params;
pub mod path;
pub mod router;
pub mod tree;

pub use error::RouteError;
pub use params::{Param, Params};
pub use path::clean;
pub use router::Router;
pub use tree::{Node, RouteMatch};
