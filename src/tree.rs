//! An ordered map based on an unbalanced binary search tree.

use compare::{Compare, Natural};
use log::trace;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug, Display};
use std::iter;
use std::mem::replace;
use std::ops;
use super::error::{Error, Result};
use super::node::{self, Arena, Left, Link, NodeId, Right};

/// An ordered map based on an unbalanced binary search tree whose nodes link back to their
/// parents.
///
/// No rebalancing is performed, so the depth of the tree, and with it the cost of every
/// operation, grows linearly when keys are inserted in sorted order.
///
/// The behavior of this tree is undefined if a key's ordering relative to any other key changes
/// while the key is in the tree. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Tree<K, V, C = Natural<K>> where C: Compare<K> {
    arena: Arena<K, V>,
    root: Link,
    len: usize,
    cmp: C,
}

impl<K, V> Tree<K, V> where K: Ord {
    /// Creates an empty tree ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.put(5, "e");
    /// tree.put(2, "b");
    /// tree.put(6, "f");
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&5));
    /// assert_eq!(it.next(), Some(&6));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Tree::with_cmp(compare::natural()) }
}

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Creates an empty tree ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut tree = bst::Tree::with_cmp(natural().rev());
    ///
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    /// tree.put(3, "c");
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&3, &2, &1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Tree { arena: Arena::new(), root: None, len: 0, cmp: cmp }
    }

    /// Checks if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert!(tree.is_empty());
    ///
    /// tree.put(2, "b");
    /// assert!(!tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert_eq!(tree.len(), 0);
    ///
    /// tree.put(2, "b");
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    ///
    /// tree.clear();
    ///
    /// assert_eq!(tree.len(), 0);
    /// assert_eq!(tree.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Inserts an entry into the tree, returning the previous value, if any, associated with the
    /// key.
    ///
    /// An existing key is kept and only its value is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert_eq!(tree.put(1, "a"), None);
    /// assert_eq!(tree.get(&1), Ok(&"a"));
    /// assert_eq!(tree.put(1, "b"), Some("a"));
    /// assert_eq!(tree.get(&1), Ok(&"b"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(self.arena.alloc(key, value, None));
                self.len = 1;
                return None;
            }
        };

        loop {
            let node = &mut self.arena[current];

            let child = match self.cmp.compare(&key, &node.key) {
                Equal => return Some(replace(&mut node.value, value)),
                Less => match node.left() {
                    Some(left) => left,
                    None => { self.arena.attach::<Left>(current, key, value); break; }
                },
                Greater => match node.right() {
                    Some(right) => right,
                    None => { self.arena.attach::<Right>(current, key, value); break; }
                },
            };

            current = child;
        }

        self.len += 1;
        None
    }

    fn find<Q: ?Sized>(&self, key: &Q) -> Link where C: Compare<Q, K> {
        let mut link = self.root;

        while let Some(id) = link {
            let node = &self.arena[id];

            link = match self.cmp.compare(key, &node.key) {
                Equal => return Some(id),
                Less => node.left(),
                Greater => node.right(),
            };
        }

        None
    }

    /// Returns a reference to the value associated with the given key, or
    /// `Error::KeyNotFound` if the tree does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert_eq!(tree.get(&1), Err(bst::Error::KeyNotFound));
    /// tree.put(1, "a");
    /// assert_eq!(tree.get(&1), Ok(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Result<&V> where C: Compare<Q, K> {
        match self.find(key) {
            Some(id) => Ok(&self.arena[id].value),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Returns a mutable reference to the value associated with the given key, or
    /// `Error::KeyNotFound` if the tree does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// tree.put(1, "a");
    ///
    /// *tree.get_mut(&1).unwrap() = "b";
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V> where C: Compare<Q, K> {
        match self.find(key) {
            Some(id) => Ok(&mut self.arena[id].value),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Checks if the tree contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    /// assert!(!tree.contains(&1));
    /// tree.put(1, "a");
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.get(key).is_ok()
    }

    /// Removes the entry whose key is equal to the given key and returns it, or returns
    /// `Error::KeyNotFound` without modifying the tree if the tree does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    /// tree.put(3, "c");
    ///
    /// assert_eq!(tree.delete(&1), Ok((1, "a")));
    /// assert_eq!(tree.len(), 2);
    /// assert!(!tree.contains(&1));
    /// assert_eq!(tree.delete(&1), Err(bst::Error::KeyNotFound));
    /// ```
    pub fn delete<Q: ?Sized>(&mut self, key: &Q) -> Result<(K, V)> where C: Compare<Q, K> {
        let id = self.find(key).ok_or(Error::KeyNotFound)?;

        let key_value = if self.arena[id].is_root() && self.arena[id].is_leaf() {
            trace!("removing sole node {:?}", id);
            self.root = None;
            let node = self.arena.free(id);
            (node.key, node.value)
        } else {
            self.remove(id)
        };

        self.len -= 1;
        Ok(key_value)
    }

    fn remove(&mut self, id: NodeId) -> (K, V) {
        if self.arena[id].has_both_children() {
            let successor = self.arena.find_successor(id)
                .expect("a node with a right subtree has a successor");
            trace!("removing {:?} by promoting its successor {:?}", id, successor);

            self.arena.splice_out(successor);
            let successor = self.arena.free(successor);

            // the splice may have replaced our right child
            let (left, right) = (self.arena[id].left(), self.arena[id].right());
            return self.arena.replace_node_data(id, successor.key, successor.value, left, right);
        }

        if self.arena[id].is_root() {
            let child = self.arena[id].left().or(self.arena[id].right());
            trace!("removing root {:?}, promoting {:?}", id, child);
            if let Some(child) = child { self.arena.detach(child); }
            self.root = child;
        } else {
            self.arena.splice_out(id);
        }

        let node = self.arena.free(id);
        (node.key, node.value)
    }

    /// Returns an iterator over the tree's keys.
    ///
    /// The iterator yields the keys in ascending order according to the tree's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    /// tree.put(3, "c");
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(node::Iter::new(&self.arena, self.root, self.len))
    }

    /// Returns an iterator over the tree's entries.
    ///
    /// The iterator yields the entries in ascending order according to the tree's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = bst::Tree::new();
    ///
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    ///
    /// let mut it = tree.entries();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries(node::Iter::new(&self.arena, self.root, self.len))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Link { self.root }

    #[cfg(test)]
    pub(crate) fn arena(&self) -> &Arena<K, V> { &self.arena }
}

impl<K, V, C> Debug for Tree<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Renders the tree as `BST{key:value, ...}` in ascending key order.
///
/// # Examples
///
/// ```
/// let mut tree = bst::Tree::new();
///
/// tree.put(5, 5);
/// tree.put(2, 22);
/// tree.put(6, 6);
///
/// assert_eq!(tree.to_string(), "BST{2:22, 5:5, 6:6, }");
/// ```
impl<K, V, C> Display for Tree<K, V, C> where K: Display, V: Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BST{{")?;
        for (key, value) in self.entries() { write!(f, "{}:{}, ", key, value)?; }
        write!(f, "}}")
    }
}

impl<K, V, C> Default for Tree<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Tree::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.put(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Tree<K, V, C>
    where C: Compare<K> + Default {

    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut tree: Self = Default::default();
        tree.extend(it);
        tree
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Tree<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;

    /// # Panics
    ///
    /// Panics if the tree does not contain the key.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> where C: Compare<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<K, V, C> PartialEq for Tree<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.entries().zip(other.entries()).all(|(l, r)| {
                self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
            })
    }
}

impl<K, V, C> Eq for Tree<K, V, C> where V: Eq, C: Compare<K> {}

/// An iterator over the tree's keys.
///
/// The iterator yields the keys in ascending order according to the tree's comparator. It is
/// lazy and is exhausted after a single pass; call [`Tree::iter`](struct.Tree.html#method.iter)
/// again to traverse the tree anew.
///
/// # Examples
///
/// Acquire through [`Tree::iter`](struct.Tree.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut tree = bst::Tree::new();
///
/// tree.put(2, "b");
/// tree.put(1, "a");
/// tree.put(3, "c");
///
/// for key in &tree {
///     println!("{:?}: {:?}", key, tree[key]);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|node| &node.key) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the tree's entries.
///
/// The iterator yields the entries in ascending order according to the tree's comparator.
///
/// Acquire through [`Tree::entries`](struct.Tree.html#method.entries).
pub struct Entries<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Entries<'a, K, V> {
    fn clone(&self) -> Entries<'a, K, V> { Entries(self.0.clone()) }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for Entries<'a, K, V> {}
