//! Segment trie, one per HTTP method.
//!
//! Each node owns one path segment. A node whose `pattern` is set terminates
//! a registered route; every other node only lies on the way to one.
//!
//! Child selection is first-match in insertion order, both when inserting
//! and when searching. A literal sibling registered *after* a `:name` or
//! `*name` sibling is therefore folded into the dynamic branch:
//!
//! ```text
//! GET /a/:id   then   GET /a/b
//!
//!   (root) ── a ── :id   pattern = "/a/:id"
//!                        "/a/b" lands here too and is shadowed
//! ```
//!
//! Register literal routes before dynamic siblings when both must be
//! reachable.

use crate::pattern::{is_catch_all, is_wild};

#[derive(Debug, Default)]
pub(crate) struct Node {
    part: String,
    pattern: Option<String>,
    children: Vec<Node>,
    is_wild: bool,
}

impl Node {
    fn new(part: &str) -> Self {
        Self {
            part: part.to_owned(),
            pattern: None,
            children: Vec::new(),
            is_wild: is_wild(part),
        }
    }

    /// The registered pattern, if this node terminates a route.
    pub(crate) fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn matches(&self, part: &str) -> bool {
        self.part == part || self.is_wild
    }

    /// Extends the tree so that `parts` exists below `self`.
    ///
    /// Returns the pattern owned by the terminal node. It differs from
    /// `pattern` when an earlier registration already claimed that node:
    /// the first pattern is kept.
    pub(crate) fn insert(&mut self, pattern: &str, parts: &[&str], depth: usize) -> &str {
        if depth == parts.len() {
            return self.pattern.get_or_insert_with(|| pattern.to_owned()).as_str();
        }

        let part = parts[depth];
        let idx = match self.children.iter().position(|c| c.matches(part)) {
            Some(idx) => idx,
            None => {
                self.children.push(Node::new(part));
                self.children.len() - 1
            }
        };
        self.children[idx].insert(pattern, parts, depth + 1)
    }

    /// Depth-first search; the first terminal reached wins.
    ///
    /// A `*name` node consumes whatever is left of `parts`.
    pub(crate) fn search(&self, parts: &[&str], depth: usize) -> Option<&Node> {
        if depth == parts.len() || is_catch_all(&self.part) {
            return self.pattern.as_ref().map(|_| self);
        }

        let part = parts[depth];
        self.children
            .iter()
            .filter(|c| c.matches(part))
            .find_map(|c| c.search(parts, depth + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;

    fn tree(patterns: &[&str]) -> Node {
        let mut root = Node::default();
        for p in patterns {
            root.insert(p, &compile(p), 0);
        }
        root
    }

    fn find<'a>(root: &'a Node, path: &str) -> Option<&'a str> {
        root.search(&compile(path), 0).and_then(Node::pattern)
    }

    #[test]
    fn literal_and_named_routes() {
        let root = tree(&["/", "/hello", "/hello/:name", "/p/:lang/doc"]);

        assert_eq!(find(&root, "/"), Some("/"));
        assert_eq!(find(&root, "/hello"), Some("/hello"));
        assert_eq!(find(&root, "/hello/geek"), Some("/hello/:name"));
        assert_eq!(find(&root, "/p/go/doc"), Some("/p/:lang/doc"));
        assert_eq!(find(&root, "/p/go"), None);
        assert_eq!(find(&root, "/p/go/doc/extra"), None);
    }

    #[test]
    fn wildcard_needs_at_least_one_segment() {
        let root = tree(&["/assets/*filepath"]);

        assert_eq!(find(&root, "/assets/a.css"), Some("/assets/*filepath"));
        assert_eq!(find(&root, "/assets/css/a/b.css"), Some("/assets/*filepath"));
        assert_eq!(find(&root, "/assets"), None);
    }

    #[test]
    fn intermediate_nodes_are_not_routes() {
        let root = tree(&["/a/b/c"]);

        assert_eq!(find(&root, "/a"), None);
        assert_eq!(find(&root, "/a/b"), None);
        assert_eq!(find(&root, "/a/b/c"), Some("/a/b/c"));
    }

    #[test]
    fn first_pattern_keeps_the_terminal() {
        let mut root = tree(&["/a/:id"]);

        assert_eq!(root.insert("/a/b", &compile("/a/b"), 0), "/a/:id");
        assert_eq!(root.insert("/a/:key", &compile("/a/:key"), 0), "/a/:id");
        assert_eq!(root.insert("/a/:id", &compile("/a/:id"), 0), "/a/:id");
        assert_eq!(find(&root, "/a/b"), Some("/a/:id"));
    }

    #[test]
    fn literal_before_dynamic_sibling_is_preferred() {
        let root = tree(&["/a/b", "/a/:id"]);

        assert_eq!(find(&root, "/a/b"), Some("/a/b"));
        assert_eq!(find(&root, "/a/c"), Some("/a/:id"));
    }

    #[test]
    fn search_backtracks_into_later_siblings() {
        let root = tree(&["/a/b/c", "/a/:id/d"]);

        assert_eq!(find(&root, "/a/b/d"), Some("/a/:id/d"));
        assert_eq!(find(&root, "/a/b/c"), Some("/a/b/c"));
    }

    #[test]
    fn literal_after_dynamic_extends_the_dynamic_branch() {
        let root = tree(&["/a/:id/x", "/a/b/y"]);

        // "/a/b/y" was grafted under ":id", so any id reaches it.
        assert_eq!(find(&root, "/a/b/y"), Some("/a/b/y"));
        assert_eq!(find(&root, "/a/zzz/y"), Some("/a/b/y"));
        assert_eq!(find(&root, "/a/zzz/x"), Some("/a/:id/x"));
    }
}
