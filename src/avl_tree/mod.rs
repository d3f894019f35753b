//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter, AvlMapIterMut};
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};

use std::error;
use std::fmt;
use std::result;

/// Errors that can occur when operating on an AVL tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An insertion used a key that is already present. The tree is left unchanged.
    DuplicateKey,
    /// The minimum or maximum key was requested from a tree with no nodes.
    EmptyTree,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already exists in the tree"),
            Error::EmptyTree => write!(f, "tree does not contain any nodes"),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
