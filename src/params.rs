//! Extracted route parameters.
//!
//! A successful match against a pattern with `:name` or `*name`
//! segments yields a [`Params`] list. Entries appear in the order the
//! wildcard segments occur in the pattern, so index access is stable.
//! Keys borrow from the route table, values borrow from the matched
//! path — a purely static match allocates nothing at all.

use std::ops::Index;

/// A single URL parameter: a key and the path slice it captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Param<'k, 'v> {
    pub key: &'k str,
    pub value: &'v str,
}

/// The ordered parameter list returned by a route match.
///
/// ```
/// # use switchyard::Router;
/// let mut router = Router::new();
/// router.get("/hello/:name", ())?;
///
/// let m = router.lookup(&http::Method::GET, "/hello/gopher");
/// assert_eq!(m.params.get("name"), Some("gopher"));
/// assert_eq!(m.params[0].key, "name");
/// # Ok::<(), switchyard::RouteError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Params<'k, 'v>(Vec<Param<'k, 'v>>);

impl<'k, 'v> Params<'k, 'v> {
    pub(crate) fn push(&mut self, key: &'k str, value: &'v str) {
        self.0.push(Param { key, value });
    }

    /// Returns the value of the first parameter whose key matches `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'v str> {
        self.0
            .iter()
            .find(|param| param.key == name)
            .map(|param| param.value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param<'k, 'v>> {
        self.0.iter()
    }
}

impl<'k, 'v> Index<usize> for Params<'k, 'v> {
    type Output = Param<'k, 'v>;

    fn index(&self, i: usize) -> &Param<'k, 'v> {
        &self.0[i]
    }
}

impl<'a, 'k, 'v> IntoIterator for &'a Params<'k, 'v> {
    type Item = &'a Param<'k, 'v>;
    type IntoIter = std::slice::Iter<'a, Param<'k, 'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
