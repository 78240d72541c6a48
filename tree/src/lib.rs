//! A boundary-marked document tree.
//!
//! [`Node`] is the intermediate representation passed between document
//! processing stages: a tree is flattened into a linear sequence of
//! boundary-marked entries for streaming, and rebuilt from such a
//! sequence on the other side.

mod attributes;
mod flat;
mod node;
mod value;

pub use attributes::Attributes;
pub use flat::{Boundary, UnknownBoundaryError};
pub use node::{Node, NodeFromValueError, SequenceFromValueError};
pub use value::Value;
