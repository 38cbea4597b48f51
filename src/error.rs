//! Errors returned by fallible tree operations.

use thiserror::Error;

/// Errors that can occur when looking up or removing a key.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The tree does not contain the requested key.
    ///
    /// Returned by [`Tree::get`](../struct.Tree.html#method.get),
    /// [`Tree::get_mut`](../struct.Tree.html#method.get_mut) and
    /// [`Tree::delete`](../struct.Tree.html#method.delete), including on an empty tree.
    #[error("key not found")]
    KeyNotFound,
}

/// A `Result` whose error type is [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;
