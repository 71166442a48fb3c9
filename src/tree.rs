//! The compressed prefix trie backing one HTTP method's routes.
//!
//! # Responsibilities
//! - Insert patterns with prefix splitting and conflict detection
//! - Match request paths, extracting parameters without allocating
//!   beyond the parameter list itself
//! - Report trailing-slash redirect hints on a near miss
//! - Recover the canonical casing of a mistyped path
//!
//! # Design decisions
//! - Each node stores the byte prefix shared by its subtree; sibling
//!   dispatch goes through `indices`, the first byte of every static
//!   child, before wildcard handling.
//! - Siblings are kept ordered by descending subtree priority (the
//!   number of handlers below them) so the hottest branch is scanned
//!   first. The order is a performance hint only.
//! - A node has at most one wildcard child, and never both a wildcard
//!   and a static child competing for the same position — that is a
//!   registration-time conflict, not a ranking decision.
//! - Lookups are total: a miss is a result, never an error or a panic.
//!
//! Once registration is complete the tree is never mutated, so any
//! number of [`Node::lookup`] and [`Node::recover_path`] calls may run
//! concurrently. Registration itself requires exclusive access.

use crate::error::RouteError;
use crate::params::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    /// Matches its segment bytes literally.
    Static,
    /// Matches one path segment, up to the next `/` or the path end.
    Param,
    /// Matches the whole remainder of the path; always terminal.
    CatchAll,
}

/// One vertex of the route trie.
///
/// The root node represents the method's whole pattern space; interior
/// nodes own their children exclusively, so the tree is a plain owned
/// structure with no sharing.
#[derive(Debug)]
pub struct Node<T> {
    /// The byte prefix this node contributes. For a parameter node this
    /// is `:name`, for the terminal catch-all node `/*name`.
    path: String,
    /// First byte of each static child's `path`, parallel to `children`.
    indices: Vec<u8>,
    children: Vec<Node<T>>,
    kind: NodeKind,
    /// Whether the single child is a wildcard node.
    wild_child: bool,
    /// Handlers reachable in this subtree; orders siblings.
    priority: u32,
    value: Option<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            path: String::new(),
            indices: Vec::new(),
            children: Vec::new(),
            kind: NodeKind::Static,
            wild_child: false,
            priority: 0,
            value: None,
        }
    }
}

/// The outcome of matching a request path against one method's tree.
#[derive(Debug)]
pub struct RouteMatch<'n, 'p, T> {
    /// The registered handler, when the path matched a route exactly.
    pub value: Option<&'n T>,
    /// Extracted parameters, in pattern order.
    pub params: Params<'n, 'p>,
    /// Set when no route matched but adding or removing a single
    /// trailing slash would produce a match; the caller may redirect.
    pub trailing_slash_hint: bool,
}

impl<T> Default for RouteMatch<'_, '_, T> {
    fn default() -> Self {
        Self {
            value: None,
            params: Params::default(),
            trailing_slash_hint: false,
        }
    }
}

struct Wildcard {
    start: usize,
    end: usize,
    catch_all: bool,
}

/// Locate the first wildcard token in `path` and validate it. Returns
/// `None` when the remaining pattern is purely static.
fn find_wildcard(path: &str, pattern: &str) -> Result<Option<Wildcard>, RouteError> {
    let bytes = path.as_bytes();
    let Some(start) = bytes.iter().position(|&b| b == b':' || b == b'*') else {
        return Ok(None);
    };
    let catch_all = bytes[start] == b'*';

    // the name runs to the next '/' or the end of the pattern
    let mut end = start + 1;
    while end < bytes.len() && bytes[end] != b'/' {
        if bytes[end] == b':' || bytes[end] == b'*' {
            return Err(RouteError::invalid(
                pattern,
                "only one wildcard per path segment is allowed",
            ));
        }
        end += 1;
    }

    if end - start < 2 {
        return Err(RouteError::invalid(
            pattern,
            "wildcard segments must have a non-empty name",
        ));
    }

    Ok(Some(Wildcard {
        start,
        end,
        catch_all,
    }))
}

fn longest_common_prefix(a: &str, b: &str) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .take_while(|(x, y)| x == y)
        .count()
}

impl<T> Node<T> {
    /// An empty tree; the first insertion establishes the root segment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `pattern`.
    ///
    /// Patterns must begin with `/` and may contain `:name` segments
    /// (one path segment each) and a single terminal `*name` catch-all.
    /// On error nothing is attached, though priority counters on nodes
    /// the descent validly passed may already be bumped; they only bias
    /// sibling scan order. Equal priorities keep their relative order.
    pub fn insert(&mut self, pattern: &str, value: T) -> Result<(), RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::invalid(pattern, "must begin with '/'"));
        }
        self.priority += 1;

        // empty tree
        if self.path.is_empty() && self.children.is_empty() {
            return self.insert_child(pattern, pattern, value);
        }
        self.add_route(pattern, pattern, value)
    }

    /// Descend to the insertion point for `path`, splitting edges where
    /// the new pattern diverges mid-segment. `self.priority` has
    /// already been incremented by the caller.
    fn add_route(&mut self, path: &str, pattern: &str, value: T) -> Result<(), RouteError> {
        let common = longest_common_prefix(path, &self.path);

        // Split this edge: the existing suffix and all children move
        // into a fresh intermediate child.
        if common < self.path.len() {
            let child = Node {
                path: self.path[common..].to_owned(),
                indices: std::mem::take(&mut self.indices),
                children: std::mem::take(&mut self.children),
                kind: NodeKind::Static,
                wild_child: self.wild_child,
                priority: self.priority - 1,
                value: self.value.take(),
            };
            self.indices = vec![child.path.as_bytes()[0]];
            self.children = vec![child];
            self.path.truncate(common);
            self.wild_child = false;
        }

        // The pattern ends exactly here.
        if common == path.len() {
            if self.value.is_some() {
                return Err(RouteError::duplicate(pattern));
            }
            self.value = Some(value);
            return Ok(());
        }

        let path = &path[common..];

        if self.wild_child {
            // The single wildcard child must match the next segment of
            // the new pattern exactly, or the two routes are ambiguous.
            let child = &mut self.children[0];
            child.priority += 1;

            let seg_len = child.path.len();
            let compatible = path.len() >= seg_len
                && child.path.as_bytes() == &path.as_bytes()[..seg_len]
                && (seg_len == path.len() || path.as_bytes()[seg_len] == b'/');
            if compatible {
                // a catch-all consumes the rest of the path; nothing
                // can be registered below it
                if child.kind == NodeKind::CatchAll && path.len() > seg_len {
                    return Err(RouteError::invalid(
                        pattern,
                        "catch-all segments are only allowed at the end of the pattern",
                    ));
                }
                return child.add_route(path, pattern, value);
            }

            let segment = path.split('/').next().unwrap_or(path);
            let existing = child.path.clone();
            return Err(RouteError::conflict(pattern, segment, &existing));
        }

        let c = path.as_bytes()[0];

        // slash after a parameter node: continue in its only child
        if self.kind == NodeKind::Param && c == b'/' && self.children.len() == 1 {
            let child = &mut self.children[0];
            child.priority += 1;
            return child.add_route(path, pattern, value);
        }

        // an existing static child shares the first byte
        if let Some(i) = self.indices.iter().position(|&b| b == c) {
            let i = self.increment_child_prio(i);
            return self.children[i].add_route(path, pattern, value);
        }

        if c != b':' && c != b'*' {
            // Build the new branch fully before linking it, so a
            // malformed tail cannot leave a half-attached node.
            let mut child = Node::default();
            child.insert_child(path, pattern, value)?;
            self.indices.push(c);
            self.children.push(child);
            self.increment_child_prio(self.indices.len() - 1);
            return Ok(());
        }

        self.insert_child(path, pattern, value)
    }

    /// Write the remaining pattern suffix below `self`, creating the
    /// wildcard node chain. `self` is either a fresh node or the node
    /// the wildcard suffix starts at.
    fn insert_child(&mut self, path: &str, pattern: &str, value: T) -> Result<(), RouteError> {
        let Some(wildcard) = find_wildcard(path, pattern)? else {
            // purely static suffix
            self.path = path.to_owned();
            self.value = Some(value);
            return Ok(());
        };

        if !self.children.is_empty() {
            // statics below this point would become unreachable
            return Err(RouteError::conflict(
                pattern,
                &path[wildcard.start..wildcard.end],
                &self.children[0].path,
            ));
        }

        if wildcard.catch_all {
            if wildcard.end < path.len() {
                return Err(RouteError::invalid(
                    pattern,
                    "catch-all segments are only allowed at the end of the pattern",
                ));
            }
            if self.path.ends_with('/') {
                return Err(RouteError::conflict(
                    pattern,
                    &path[wildcard.start..],
                    &self.path,
                ));
            }
            if wildcard.start == 0 || path.as_bytes()[wildcard.start - 1] != b'/' {
                return Err(RouteError::invalid(pattern, "no '/' before catch-all"));
            }

            // Two nodes: a flag node dispatched via '/', then the
            // terminal node holding the name and the handler.
            let slash = wildcard.start - 1;
            let terminal = Node {
                path: path[slash..].to_owned(),
                kind: NodeKind::CatchAll,
                priority: 1,
                value: Some(value),
                ..Node::default()
            };
            let holder = Node {
                kind: NodeKind::CatchAll,
                wild_child: true,
                priority: 1,
                children: vec![terminal],
                ..Node::default()
            };
            self.path = path[..slash].to_owned();
            self.indices = vec![b'/'];
            self.children.push(holder);
            return Ok(());
        }

        // named parameter
        let mut child = Node {
            kind: NodeKind::Param,
            priority: 1,
            ..Node::default()
        };

        if wildcard.end < path.len() {
            // the pattern continues after the parameter segment
            child.path = path[wildcard.start..wildcard.end].to_owned();
            let mut rest = Node {
                priority: 1,
                ..Node::default()
            };
            rest.insert_child(&path[wildcard.end..], pattern, value)?;
            child.children.push(rest);
        } else {
            child.path = path[wildcard.start..].to_owned();
            child.value = Some(value);
        }

        if wildcard.start > 0 {
            self.path = path[..wildcard.start].to_owned();
        }
        self.wild_child = true;
        self.children.push(child);
        Ok(())
    }

    /// Bump the priority of the child at `pos` and bubble it towards
    /// the front past lower-priority siblings. Returns its new index.
    /// A single bounded pass suffices: only this child changed.
    fn increment_child_prio(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let priority = self.children[pos].priority;

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }
        new_pos
    }

    /// The wildcard name, without its `:` or `/*` marker.
    fn param_name(&self) -> &str {
        match self.kind {
            NodeKind::Param => &self.path[1..],
            NodeKind::CatchAll => &self.path[2..],
            NodeKind::Static => "",
        }
    }

    /// Match `path` against the tree.
    ///
    /// Returns the handler and extracted parameters on a hit. On a
    /// miss, [`RouteMatch::trailing_slash_hint`] reports whether the
    /// path with one trailing slash added or removed would have hit.
    /// Static matches perform no allocation at all.
    pub fn lookup<'n, 'p>(&'n self, path: &'p str) -> RouteMatch<'n, 'p, T> {
        let mut node = self;
        let mut path = path;
        let mut params = Params::default();
        let mut at_root = true;

        loop {
            let prefix = node.path.as_str();

            if path.len() > prefix.len() {
                if &path.as_bytes()[..prefix.len()] != prefix.as_bytes() {
                    break;
                }
                path = &path[prefix.len()..];

                if !node.wild_child {
                    let c = path.as_bytes()[0];
                    if let Some(i) = node.indices.iter().position(|&b| b == c) {
                        node = &node.children[i];
                        at_root = false;
                        continue;
                    }

                    // Dead end. Removing the trailing slash may match.
                    let tsr = path == "/" && node.value.is_some();
                    return RouteMatch {
                        params,
                        trailing_slash_hint: tsr,
                        ..RouteMatch::default()
                    };
                }

                let child = &node.children[0];
                at_root = false;
                match child.kind {
                    NodeKind::Param => {
                        // consume up to the next '/' or the path end
                        let end = path
                            .as_bytes()
                            .iter()
                            .position(|&b| b == b'/')
                            .unwrap_or(path.len());
                        params.push(child.param_name(), &path[..end]);

                        if end < path.len() {
                            if !child.children.is_empty() {
                                path = &path[end..];
                                node = &child.children[0];
                                continue;
                            }

                            // nothing below; only a lone trailing slash
                            // is recoverable
                            let tsr = path.len() == end + 1;
                            return RouteMatch {
                                params,
                                trailing_slash_hint: tsr,
                                ..RouteMatch::default()
                            };
                        }

                        if let Some(value) = child.value.as_ref() {
                            return RouteMatch {
                                value: Some(value),
                                params,
                                trailing_slash_hint: false,
                            };
                        }
                        if child.children.len() == 1 {
                            let next = &child.children[0];
                            let tsr = next.path == "/" && next.value.is_some();
                            return RouteMatch {
                                params,
                                trailing_slash_hint: tsr,
                                ..RouteMatch::default()
                            };
                        }
                        return RouteMatch {
                            params,
                            ..RouteMatch::default()
                        };
                    }
                    NodeKind::CatchAll => {
                        // the remainder, including its leading slash
                        params.push(child.param_name(), path);
                        return RouteMatch {
                            value: child.value.as_ref(),
                            params,
                            trailing_slash_hint: false,
                        };
                    }
                    NodeKind::Static => {
                        // a static node is never the wildcard child
                        return RouteMatch {
                            params,
                            ..RouteMatch::default()
                        };
                    }
                }
            }

            if path == prefix {
                if let Some(value) = node.value.as_ref() {
                    return RouteMatch {
                        value: Some(value),
                        params,
                        trailing_slash_hint: false,
                    };
                }

                // "/" against a wildcard-bearing interior node: the
                // route without the slash exists one level up
                if path == "/" && node.wild_child && !at_root {
                    return RouteMatch {
                        params,
                        trailing_slash_hint: true,
                        ..RouteMatch::default()
                    };
                }

                // Adding a trailing slash may match.
                if let Some(i) = node.indices.iter().position(|&b| b == b'/') {
                    let child = &node.children[i];
                    let tsr = (child.path.len() == 1 && child.value.is_some())
                        || (child.kind == NodeKind::CatchAll
                            && child.children[0].value.is_some());
                    return RouteMatch {
                        params,
                        trailing_slash_hint: tsr,
                        ..RouteMatch::default()
                    };
                }

                return RouteMatch {
                    params,
                    ..RouteMatch::default()
                };
            }

            break;
        }

        // No prefix matched; an extra trailing slash may still help.
        let prefix = node.path.as_str();
        let tsr = path == "/"
            || (prefix.len() == path.len() + 1
                && prefix.as_bytes()[path.len()] == b'/'
                && path.as_bytes() == &prefix.as_bytes()[..path.len()]
                && node.value.is_some());
        RouteMatch {
            trailing_slash_hint: tsr,
            ..RouteMatch::default()
        }
    }

    /// Reconstruct the canonically cased path for `path`, comparing
    /// static segments case-insensitively (ASCII). Parameter values are
    /// kept verbatim. With `fix_trailing_slash`, one added or removed
    /// trailing slash is also tolerated. Returns `None` when no route
    /// corresponds to the path.
    #[must_use]
    pub fn recover_path(&self, path: &str, fix_trailing_slash: bool) -> Option<String> {
        let seg_len = self.path.len();

        // Byte-wise ASCII folding: non-ASCII bytes must match exactly,
        // which also keeps every slice below on a char boundary.
        if path.len() < seg_len
            || !path.as_bytes()[..seg_len].eq_ignore_ascii_case(self.path.as_bytes())
        {
            // This segment does not fold-match; the only remaining
            // fixes are trailing-slash variants.
            if fix_trailing_slash {
                if path == "/" {
                    // drop the slash: the accumulated prefix is complete
                    return Some(String::new());
                }
                if seg_len == path.len() + 1
                    && self.path.as_bytes()[path.len()] == b'/'
                    && path
                        .as_bytes()
                        .eq_ignore_ascii_case(&self.path.as_bytes()[..path.len()])
                    && self.value.is_some()
                {
                    return Some(self.path.clone());
                }
            }
            return None;
        }

        let rest = &path[seg_len..];

        if rest.is_empty() {
            if self.value.is_some() {
                return Some(self.path.clone());
            }
            // try the path plus a trailing slash
            if fix_trailing_slash {
                if let Some(i) = self.indices.iter().position(|&b| b == b'/') {
                    let child = &self.children[i];
                    if (child.path.len() == 1 && child.value.is_some())
                        || (child.kind == NodeKind::CatchAll
                            && child.children[0].value.is_some())
                    {
                        let mut out = self.path.clone();
                        out.push('/');
                        return Some(out);
                    }
                }
            }
            return None;
        }

        if !self.wild_child {
            let c = rest.as_bytes()[0].to_ascii_lowercase();
            // Both cases of an index byte can exist as distinct
            // siblings, so this must backtrack rather than commit to
            // the first candidate.
            for (i, &index) in self.indices.iter().enumerate() {
                if index.to_ascii_lowercase() == c {
                    if let Some(tail) = self.children[i].recover_path(rest, fix_trailing_slash) {
                        let mut out =
                            String::with_capacity(self.path.len() + tail.len());
                        out.push_str(&self.path);
                        out.push_str(&tail);
                        return Some(out);
                    }
                }
            }

            // removing the trailing slash may fix it
            if fix_trailing_slash && rest == "/" && self.value.is_some() {
                return Some(self.path.clone());
            }
            return None;
        }

        let child = &self.children[0];
        match child.kind {
            NodeKind::Param => {
                let end = rest
                    .as_bytes()
                    .iter()
                    .position(|&b| b == b'/')
                    .unwrap_or(rest.len());
                let value = &rest[..end];

                if end < rest.len() {
                    if child.children.is_empty() {
                        // dead end, unless only a slash remains
                        if fix_trailing_slash && rest.len() == end + 1 {
                            return Some(join(&self.path, value, ""));
                        }
                        return None;
                    }
                    let tail =
                        child.children[0].recover_path(&rest[end..], fix_trailing_slash)?;
                    return Some(join(&self.path, value, &tail));
                }

                if child.value.is_some() {
                    return Some(join(&self.path, value, ""));
                }
                if fix_trailing_slash && child.children.len() == 1 {
                    let next = &child.children[0];
                    if next.path == "/" && next.value.is_some() {
                        return Some(join(&self.path, value, "/"));
                    }
                }
                None
            }
            NodeKind::CatchAll => Some(join(&self.path, rest, "")),
            NodeKind::Static => None,
        }
    }
}

fn join(prefix: &str, value: &str, tail: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + value.len() + tail.len());
    out.push_str(prefix);
    out.push_str(value);
    out.push_str(tail);
    out
}
