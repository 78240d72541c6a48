//! Flattening a tree into a linear marker sequence and rebuilding a
//! tree from one.

use std::fmt;
use std::str::FromStr;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::Node;

/// Transient marker on a flattened entry: whether the entry opens a
/// scope, closes one, or is a complete self-closing unit. Rebuilt
/// nodes never carry a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
    StartEnd,
}

impl Boundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Start => "start",
            Boundary::End => "end",
            Boundary::StartEnd => "startend",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown boundary marker: {0}
#[derive(Debug, Clone, Error, Display)]
pub struct UnknownBoundaryError(pub String);

impl FromStr for Boundary {
    type Err = UnknownBoundaryError;

    fn from_str(marker: &str) -> Result<Self, Self::Err> {
        match marker {
            "start" => Ok(Boundary::Start),
            "end" => Ok(Boundary::End),
            "startend" => Ok(Boundary::StartEnd),
            other => Err(UnknownBoundaryError(other.to_string())),
        }
    }
}

impl Node {
    /// Flatten this node and all of its descendants into a linear
    /// sequence, depth first. A node with children becomes a
    /// `start`-marked copy, the flattened children in order, and an
    /// `end`-marked copy. A childless node collapses both boundaries
    /// into a single `startend` entry; childless `"text"` nodes carry
    /// no scope of their own and are emitted unmarked.
    ///
    /// Every entry is detached from the source tree, so the sequence
    /// is safe to mutate or send onward, and flattening twice yields
    /// two equal, independent sequences.
    pub fn to_array(&self) -> Vec<Node> {
        if self.children().is_empty() {
            let entry = if self.node_type() == "text" {
                self.detached()
            } else {
                self.detached().with_boundary(Boundary::StartEnd)
            };
            return vec![entry];
        }

        let mut entries = vec![self.detached().with_boundary(Boundary::Start)];
        for child in self.children() {
            entries.extend(child.to_array());
        }
        entries.push(self.detached().with_boundary(Boundary::End));
        entries
    }

    /// Rebuild a tree from a flattened sequence.
    ///
    /// Returns `None` for an empty sequence; a single-entry sequence
    /// comes back as that entry alone, marker cleared. Input does not
    /// have to be well formed: an `end` with no open scope is dropped,
    /// scopes still open when input runs out close implicitly, and a
    /// sequence that does not open with a `start` entry is replayed
    /// under a synthetic node of type `"root"`. The result is always a
    /// single-rooted tree with every boundary marker cleared.
    pub fn from_array(entries: &[Node]) -> Option<Node> {
        let (first, rest) = entries.split_first()?;

        if rest.is_empty() {
            return Some(first.detached());
        }

        let (root, rest) = if first.boundary() == Some(Boundary::Start) {
            (first.detached(), rest)
        } else {
            tracing::trace!("sequence does not open a scope; wrapping under synthetic root");
            (Node::with_type("root"), entries)
        };

        let mut open = vec![root];
        for entry in rest {
            match entry.boundary() {
                Some(Boundary::Start) => open.push(entry.detached()),
                Some(Boundary::End) => close_scope(&mut open),
                _ => append(&mut open, entry.detached()),
            }
        }

        // scopes left open by unbalanced input close implicitly
        while open.len() > 1 {
            close_scope(&mut open);
        }
        open.pop()
    }
}

fn append(open: &mut [Node], node: Node) {
    if let Some(current) = open.last_mut() {
        current.add(node);
    }
}

fn close_scope(open: &mut Vec<Node>) {
    if open.len() < 2 {
        tracing::trace!("ignoring end marker with no open scope");
        return;
    }
    if let Some(finished) = open.pop() {
        append(open, finished);
    }
}
