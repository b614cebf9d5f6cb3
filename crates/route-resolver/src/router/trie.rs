//! Segment trie used to enumerate matching routes
//!
//! Every node owns its literal children, at most one dynamic child shared by
//! all `:name` tokens at that depth, and the values registered exactly at
//! that node. Enumeration is a depth-first walk that tries the literal child
//! before the dynamic one, so candidates come out most-specific first.

use std::borrow::Cow;
use std::collections::HashMap;

/// One token of a registered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Matches the same text (compared case-insensitively when enabled)
    Literal(String),
    /// Matches any single segment and captures it under the given name
    Dynamic(String),
}

impl Segment {
    /// Parse one non-empty token; a leading `:` marks a dynamic segment.
    pub(crate) fn parse(token: &str) -> Self {
        match token.strip_prefix(':') {
            Some(name) => Self::Dynamic(name.to_string()),
            None => Self::Literal(token.to_string()),
        }
    }

    /// Parse a whole `/`-delimited pattern.
    pub(crate) fn parse_path(path: &str) -> Vec<Self> {
        tokenize(path).map(Self::parse).collect()
    }

    /// The parameter name, for dynamic segments.
    pub(crate) fn param_name(&self) -> Option<&str> {
        match self {
            Self::Dynamic(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{}", text),
            Self::Dynamic(name) => write!(f, ":{}", name),
        }
    }
}

/// Split a path on `/`, dropping empty tokens.
pub(crate) fn tokenize(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|token| !token.is_empty())
}

/// A value reached by enumeration, with the text captured at each dynamic
/// position along the way, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate<'a, T> {
    pub(crate) value: &'a T,
    pub(crate) captures: Vec<String>,
}

#[derive(Debug)]
struct Node<T> {
    literal: HashMap<String, Node<T>>,
    dynamic: Option<Box<Node<T>>>,
    terminals: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literal: HashMap::new(),
            dynamic: None,
            terminals: Vec::new(),
        }
    }
}

/// Trie keyed by path segment.
#[derive(Debug)]
pub(crate) struct Trie<T> {
    root: Node<T>,
    case_insensitive: bool,
}

impl<T> Trie<T> {
    pub(crate) fn new(case_insensitive: bool) -> Self {
        Self {
            root: Node::default(),
            case_insensitive,
        }
    }

    fn literal_key<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.case_insensitive {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Register `value` at the node reached by `segments`.
    ///
    /// Values landing on the same node keep their insertion order.
    pub(crate) fn insert(&mut self, segments: &[Segment], value: T) {
        let keys: Vec<Option<String>> = segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Some(self.literal_key(text).into_owned()),
                Segment::Dynamic(_) => None,
            })
            .collect();

        let mut node = &mut self.root;
        for key in keys {
            node = match key {
                Some(key) => node.literal.entry(key).or_default(),
                None => node.dynamic.get_or_insert_with(Box::default).as_mut(),
            };
        }
        node.terminals.push(value);
    }

    /// Enumerate every value whose registered path matches `tokens`.
    ///
    /// Order: at each depth the literal branch is exhausted before the
    /// dynamic branch; values on one node come out in insertion order.
    /// Captures keep the caller's casing.
    pub(crate) fn enumerate<'a>(&'a self, tokens: &[&str]) -> Vec<Candidate<'a, T>> {
        let mut found = Vec::new();
        let mut stack: Vec<(&'a Node<T>, usize, Vec<String>)> = vec![(&self.root, 0, Vec::new())];

        while let Some((node, depth, captures)) = stack.pop() {
            let Some(token) = tokens.get(depth) else {
                found.extend(node.terminals.iter().map(|value| Candidate {
                    value,
                    captures: captures.clone(),
                }));
                continue;
            };

            // Pushed first so it is popped after the literal subtree.
            if let Some(dynamic) = node.dynamic.as_deref() {
                let mut captured = captures.clone();
                captured.push((*token).to_string());
                stack.push((dynamic, depth + 1, captured));
            }
            if let Some(literal) = node.literal.get(&*self.literal_key(token)) {
                stack.push((literal, depth + 1, captures));
            }
        }

        found
    }
}
