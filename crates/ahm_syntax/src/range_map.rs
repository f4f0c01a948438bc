//! Side table from nodes to the source spans they were parsed from.
//!
//! Nodes are plain values, so the table is keyed by a [`NodePath`]: the index of the top-level
//! node followed by the child index at every level below it.

use std::collections::BTreeMap;
use std::fmt;

use crate::position::Span;

/// Location of a node inside a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the `index`-th top-level node.
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth; top-level nodes are at depth 0.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Spans of parsed nodes, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeMap {
    ranges: BTreeMap<NodePath, Span>,
}

impl RangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &NodePath) -> Option<Span> {
        self.ranges.get(path).copied()
    }

    pub fn has_range_for(&self, path: &NodePath) -> bool {
        self.ranges.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodePath, Span)> {
        self.ranges.iter().map(|(path, span)| (path, *span))
    }

    pub(crate) fn set(&mut self, path: NodePath, span: Span) {
        self.ranges.insert(path, span);
    }
}
