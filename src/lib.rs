//! `balanced-collections` provides an ordered map and an ordered set backed by a self-balancing
//! AVL tree. The tree maintains the invariant that the heights of the two child subtrees of any
//! node differ by at most one, so lookups, insertions, and removals are logarithmic in the number
//! of entries.
//!
//! In addition to the usual ordered-map operations, the map and set support reverse in-order
//! traversal, pruned range queries, deep structural cloning, and structural subtree containment
//! tests.

#[macro_use]
extern crate serde_derive;

mod entry;
pub mod avl_tree;
