//! An ordered map based on an unbalanced binary search tree with parent-linked nodes.
//!
//! Nodes live in a slot arena owned by the tree. Each node owns its children through their
//! handles and refers back to its parent with a plain, non-owning handle.

#![deny(missing_docs)]

mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::Tree;
