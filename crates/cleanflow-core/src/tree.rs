//! # Pack Tree Walking
//!
//! A depth-first visitor over a pack's JSON tree. Each node is presented as a
//! [`PackNode`], a tagged view with one arm per shape the checks care about,
//! so visitors are total over every value they can meet.
//!
//! The visitor decides per node whether to descend. Sequence elements are
//! addressed by their index, so `sections.daily.items.2` names the third item.

use std::fmt;

use serde_json::{Map, Value};

/// Dotted path from the root of a pack to one of its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The path of the pack root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A new path one level below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(segment);
        next
    }

    fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Tagged view of a JSON node.
#[derive(Debug, Clone, Copy)]
pub enum PackNode<'a> {
    Text(&'a str),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
    /// Numbers, booleans and null.
    Scalar(&'a Value),
}

impl<'a> PackNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Mapping(map),
            other => Self::Scalar(other),
        }
    }
}

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    Into,
    Skip,
}

/// Walk `root` depth-first in document order, calling `visit` on every node
/// including the root itself.
pub fn walk<'a, F>(root: &'a Value, mut visit: F)
where
    F: FnMut(&KeyPath, PackNode<'a>) -> Descend,
{
    let mut path = KeyPath::root();
    walk_node(root, &mut path, &mut visit);
}

fn walk_node<'a, F>(value: &'a Value, path: &mut KeyPath, visit: &mut F)
where
    F: FnMut(&KeyPath, PackNode<'a>) -> Descend,
{
    if visit(&*path, PackNode::classify(value)) == Descend::Skip {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key.as_str());
                walk_node(child, path, visit);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                walk_node(child, path, visit);
                path.pop();
            }
        }
        _ => {}
    }
}
