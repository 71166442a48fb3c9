//! URL path normalization for the redirect-fallback flow.
//!
//! [`clean`] removes superfluous path elements: `.` segments are
//! dropped, `..` segments pop the preceding element, and repeated
//! slashes collapse to one. A trailing slash is preserved. This runs
//! only when an exact match already failed, before the case-insensitive
//! recovery walk — registration patterns are taken verbatim and never
//! cleaned.

use std::borrow::Cow;

/// Normalize a request path.
///
/// The result always starts with `/` and never contains `.`, `..`, or
/// empty elements; the empty path becomes `/`. Cleaning is idempotent,
/// and an already-clean path is returned borrowed without allocating.
#[must_use]
pub fn clean(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if is_clean(path) {
        return Cow::Borrowed(path);
    }

    // The trailing slash survives unless the final element was `..`,
    // which strips it together with the segment it pops. A lone
    // trailing `.` counts as a trailing slash.
    let trailing =
        (path.len() > 1 && path.ends_with('/')) || path.ends_with("/.") || path == ".";

    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // popping past the root is a no-op
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    if stack.is_empty() {
        return Cow::Borrowed("/");
    }

    let mut out = String::with_capacity(path.len() + 1);
    for segment in &stack {
        out.push('/');
        out.push_str(segment);
    }
    if trailing {
        out.push('/');
    }
    Cow::Owned(out)
}

/// A path is clean when it starts with `/` and contains no `//`, `/./`,
/// or `/../` (including at the very end).
fn is_clean(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    let bytes = path.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'/' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'/') => return false,
            Some(b'.') => match bytes.get(i + 2) {
                None | Some(b'/') => return false,
                Some(b'.') => match bytes.get(i + 3) {
                    None | Some(b'/') => return false,
                    Some(_) => {}
                },
                Some(_) => {}
            },
            _ => {}
        }
    }
    true
}
