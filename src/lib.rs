//! This crate exposes an ordered key-value container built on a plain (unbalanced) Binary Search
//! Tree, along with its traversals and a level-by-level debug drawing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` where `height` is the number of `Node`s on the longest
//! path from the root `Node` to a leaf `Node`. Nothing here rebalances the tree, so inserting keys
//! in sorted order produces a chain whose height is the number of keys. BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree root, then the right
//! subtree.
//!
//! ## Logging
//!
//! Mutations emit [`tracing`] events (`debug` for nodes being attached or removed, `trace` for
//! overwritten values). The crate never installs a subscriber itself.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod pretty;
pub mod tree;

pub use pretty::Pretty;
pub use tree::{Item, Tree};
