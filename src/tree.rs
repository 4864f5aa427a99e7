//! An ordered map backed by an unbalanced Binary Search Tree. Each node exclusively owns its two
//! children through `Box`es so a subtree is released exactly once, when its owner goes away.
//!
//! Insertion and lookup come in two flavours: a recursive descent ([`Tree::insert`],
//! [`Tree::get`]) and an iterative one ([`Tree::iter_insert`], [`Tree::iter_get`]). They are
//! observably identical; the iterative ones don't grow the call stack with the height of the tree.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.get(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.iter_insert(1, 3);
//! assert_eq!(tree.iter_get(&1), Some(&3));
//!
//! // Removing a node returns its value.
//! assert_eq!(tree.remove(&1), Some(3));
//! assert_eq!(tree.get(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::mem;

use tracing::{debug, trace};

/// A key and the value stored with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Item<K, V> {
    /// The key the tree is ordered by.
    pub key: K,
    /// The payload associated with `key`.
    pub value: V,
}

impl<K, V> From<(K, V)> for Item<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) item: Item<K, V>,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(item: Item<K, V>) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }

    /// Inserts `item` into the subtree at `link` and hands back the subtree's root so the caller
    /// can relink it. Also returns the value that was overwritten, if the key was already present.
    fn insert(link: Link<K, V>, item: Item<K, V>) -> (Box<Self>, Option<V>)
    where
        K: Ord,
    {
        let Some(mut node) = link else {
            return (Self::new_boxed(item), None);
        };

        let replaced = match item.key.cmp(&node.item.key) {
            Ordering::Less => {
                let (left, replaced) = Self::insert(node.left.take(), item);
                node.left = Some(left);
                replaced
            }
            Ordering::Equal => Some(mem::replace(&mut node.item.value, item.value)),
            Ordering::Greater => {
                let (right, replaced) = Self::insert(node.right.take(), item);
                node.right = Some(right);
                replaced
            }
        };

        (node, replaced)
    }

    fn get(&self, key: &K) -> Option<&Item<K, V>>
    where
        K: Ord,
    {
        match key.cmp(&self.item.key) {
            Ordering::Less => self.left.as_deref()?.get(key),
            Ordering::Equal => Some(&self.item),
            Ordering::Greater => self.right.as_deref()?.get(key),
        }
    }

    /// Removes the node holding `key` from the subtree at `link`. Returns the removed item and
    /// which deletion case applied.
    fn remove(link: &mut Link<K, V>, key: &K) -> Option<(Item<K, V>, &'static str)>
    where
        K: Ord,
    {
        let node = link.as_mut()?;
        match key.cmp(&node.item.key) {
            Ordering::Less => Self::remove(&mut node.left, key),
            Ordering::Greater => Self::remove(&mut node.right, key),
            Ordering::Equal if node.left.is_none() => {
                let right = node.right.take();
                mem::replace(link, right).map(|target| (target.item, "leaf-or-right"))
            }
            Ordering::Equal if node.right.is_none() => {
                let left = node.left.take();
                mem::replace(link, left).map(|target| (target.item, "left-only"))
            }
            Ordering::Equal => {
                // Two children: the in-order successor's item moves into this node and the
                // successor's own node is the one that gets freed.
                let successor = Self::take_min(&mut node.right);
                Some((mem::replace(&mut node.item, successor.item), "successor"))
            }
        }
    }

    /// Unlinks the left-most node of the subtree at `link`, splicing its right child into its
    /// place.
    ///
    /// ## Panics
    ///
    /// When `link` is empty. `remove` only calls this on the right child of a node with two
    /// children.
    fn take_min(link: &mut Link<K, V>) -> Box<Self> {
        let mut cursor = link;
        while cursor.as_ref().is_some_and(|node| node.left.is_some()) {
            cursor = &mut cursor.as_mut().expect("loop condition saw a node").left;
        }

        let mut min = cursor
            .take()
            .expect("in-order successor searched for in an empty subtree");
        *cursor = min.right.take();
        min
    }

    fn height(&self) -> usize {
        let left = self.left.as_deref().map_or(0, Self::height);
        let right = self.right.as_deref().map_or(0, Self::height);
        1 + left.max(right)
    }
}

/// An ordered map from `K` to `V` stored as a Binary Search Tree. Nothing rebalances the tree so
/// inserting keys in sorted order builds a chain as tall as the number of keys.
pub struct Tree<K, V> {
    pub(crate) root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        // Unravel with a heap allocated stack; the default recursive drop would overflow the
        // thread's stack on a long chain.
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

// TODO stack based Clone
impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.for_each_inorder(|item| {
            map.entry(&item.key, &item.value);
        });
        map.finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for
    /// an existing key overwrites its value in place and returns the previous one.
    ///
    /// This descends recursively and relinks every visited node on the way back up.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), None);
    /// assert_eq!(tree.get(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Some(2));
    /// assert_eq!(tree.get(&1), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let (root, replaced) = Node::insert(self.root.take(), Item { key, value });
        self.root = Some(root);
        self.record_insert(replaced.is_none(), "recursive");
        replaced
    }

    /// Same as [`Tree::insert`] but takes the key and value as an [`Item`].
    pub fn insert_item(&mut self, item: Item<K, V>) -> Option<V>
    where
        K: Ord,
    {
        self.insert(item.key, item.value)
    }

    /// Inserts the given value at the given key without recursing. The descent remembers the last
    /// node it visited and attaches the new leaf directly to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.iter_insert(2, "two");
    /// tree.iter_insert(1, "one");
    ///
    /// assert_eq!(tree.inorder(), vec![&1, &2]);
    /// assert_eq!(tree.iter_insert(1, "uno"), Some("one"));
    /// ```
    pub fn iter_insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let item = Item { key, value };
        let mut parent = match self.root.as_mut() {
            Some(root) => root,
            None => {
                self.root = Some(Node::new_boxed(item));
                self.record_insert(true, "iterative");
                return None;
            }
        };

        loop {
            let next = match item.key.cmp(&parent.item.key) {
                Ordering::Less => &mut parent.left,
                Ordering::Greater => &mut parent.right,
                Ordering::Equal => {
                    let replaced = mem::replace(&mut parent.item.value, item.value);
                    self.record_insert(false, "iterative");
                    return Some(replaced);
                }
            };
            match next {
                Some(child) => parent = child,
                None => {
                    *next = Some(Node::new_boxed(item));
                    self.record_insert(true, "iterative");
                    return None;
                }
            }
        }
    }

    fn record_insert(&mut self, attached: bool, variant: &'static str) {
        if attached {
            self.len += 1;
            debug!(len = self.len, variant, "attached new node");
        } else {
            trace!(variant, "overwrote value of existing key");
        }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.get_item(key).map(|item| &item.value)
    }

    /// Like [`Tree::get`] but returns the stored key alongside the value.
    pub fn get_item(&self, key: &K) -> Option<&Item<K, V>>
    where
        K: Ord,
    {
        self.root.as_deref()?.get(key)
    }

    /// Looks up `key` with a loop instead of recursion. Behaves exactly like [`Tree::get`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(5, 'e'), (3, 'c'), (8, 'h')].into_iter().collect();
    ///
    /// assert_eq!(tree.iter_get(&3), Some(&'c'));
    /// assert_eq!(tree.iter_get(&4), None);
    /// ```
    pub fn iter_get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.item.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.item.value),
            };
        }
        None
    }

    /// Returns a mutable reference to the value stored at `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.item.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.item.value),
            };
        }
        None
    }

    /// Whether a node with `key` exists.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.iter_get(key).is_some()
    }

    /// Removes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children is not unlinked itself: it takes over the item of its in-order
    /// successor (the smallest key of its right subtree) and the successor's node is freed
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let mut tree: Tree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Some('b'));
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.inorder(), vec![&1, &3]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let (removed, case) = Node::remove(&mut self.root, key)?;
        self.len -= 1;
        debug!(case, len = self.len, "removed node");
        Some(removed.value)
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Sorted insertion degrades into a chain.
    /// tree.extend((0..4).map(|x| (x, x)));
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::height)
    }

    /// Visits every item parent first, then its left subtree, then its right subtree.
    pub fn for_each_preorder<'a>(&'a self, mut visit: impl FnMut(&'a Item<K, V>)) {
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            visit(&node.item);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
    }

    /// Visits every item in ascending key order.
    pub fn for_each_inorder<'a>(&'a self, mut visit: impl FnMut(&'a Item<K, V>)) {
        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            visit(&node.item);
            current = node.right.as_deref();
        }
    }

    /// The keys in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// assert_eq!(tree.preorder(), vec![&2, &1, &3]);
    /// ```
    pub fn preorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.for_each_preorder(|item| keys.push(&item.key));
        keys
    }

    /// The keys in in-order, which for a Binary Search Tree is ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// assert_eq!(tree.inorder(), vec![&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        self.for_each_inorder(|item| keys.push(&item.key));
        keys
    }

    /// Writes the pre-order keys to `out`, each followed by a space, then a newline.
    pub fn write_preorder<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        K: fmt::Display,
    {
        write_keys(out, self.preorder())
    }

    /// Writes the in-order keys to `out`, each followed by a space, then a newline.
    pub fn write_inorder<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        K: fmt::Display,
    {
        write_keys(out, self.inorder())
    }
}

fn write_keys<W, K>(out: &mut W, keys: Vec<&K>) -> io::Result<()>
where
    W: io::Write,
    K: fmt::Display,
{
    for key in keys {
        write!(out, "{key} ")?;
    }
    writeln!(out)
}
