mod iter;


use log::trace;
use std::mem::replace;
use std::ops::{Index, IndexMut};

pub use self::iter::Iter;

/// A stable handle to a node slot in an `Arena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

pub type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    left: Link,
    right: Link,
    // Back-reference only; never keeps a slot alive.
    parent: Link,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Link) -> Self {
        Node { key: key, value: value, left: None, right: None, parent: parent }
    }

    pub fn left(&self) -> Link { self.left }

    pub fn right(&self) -> Link { self.right }

    pub fn parent(&self) -> Link { self.parent }

    pub fn has_left_child(&self) -> bool { self.left.is_some() }

    pub fn has_right_child(&self) -> bool { self.right.is_some() }

    pub fn has_any_children(&self) -> bool { self.has_left_child() || self.has_right_child() }

    pub fn has_both_children(&self) -> bool { self.has_left_child() && self.has_right_child() }

    pub fn is_leaf(&self) -> bool { !self.has_any_children() }

    pub fn is_root(&self) -> bool { self.parent.is_none() }
}

pub trait Dir: Sized {
    fn forward<K, V>(node: &Node<K, V>) -> Link;
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link;

    /// Follows this direction from `id` until no child remains.
    fn extremum<K, V>(arena: &Arena<K, V>, mut id: NodeId) -> NodeId {
        while let Some(child) = Self::forward(&arena[id]) { id = child; }
        id
    }
}

pub enum Left {}

impl Dir for Left {
    fn forward<K, V>(node: &Node<K, V>) -> Link { node.left }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    fn forward<K, V>(node: &Node<K, V>) -> Link { node.right }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.right }
}

/// Slot storage for the nodes of a single tree.
///
/// A node is owned by the slot it occupies; links between nodes are plain handles. Removing a
/// node frees its slot for reuse by a later allocation.
#[derive(Clone, Debug)]
pub struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self { Arena { slots: vec![], free: vec![] } }

    /// Returns the number of occupied slots.
    #[cfg(test)]
    pub fn len(&self) -> usize { self.slots.len() - self.free.len() }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn alloc(&mut self, key: K, value: V, parent: Link) -> NodeId {
        let node = Some(Node::new(key, value, parent));

        let id = match self.free.pop() {
            Some(index) => { self.slots[index] = node; NodeId(index) }
            None => { self.slots.push(node); NodeId(self.slots.len() - 1) }
        };

        trace!("allocated node {:?} under {:?}", id, parent);
        id
    }

    /// Releases the slot of a node that is no longer linked into the tree.
    pub fn free(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => { self.free.push(id.0); node }
            None => panic!("freeing vacant node slot {:?}", id),
        }
    }

    /// Creates a leaf in the `D` slot of `parent`, which must be empty.
    pub fn attach<D>(&mut self, parent: NodeId, key: K, value: V) -> NodeId where D: Dir {
        assert!(D::forward(&self[parent]).is_none(), "child slot of {:?} is occupied", parent);
        let id = self.alloc(key, value, Some(parent));
        *D::forward_mut(&mut self[parent]) = Some(id);
        id
    }

    pub fn is_left_child(&self, id: NodeId) -> bool {
        self[id].parent.map_or(false, |parent| self[parent].left == Some(id))
    }

    pub fn is_right_child(&self, id: NodeId) -> bool {
        self[id].parent.map_or(false, |parent| self[parent].right == Some(id))
    }

    /// Returns the node holding the smallest key of the subtree rooted at `id`.
    pub fn min(&self, id: NodeId) -> NodeId { Left::extremum(self, id) }

    /// Returns the in-order successor of `id`, if any.
    pub fn find_successor(&self, id: NodeId) -> Link {
        if let Some(right) = self[id].right { return Some(self.min(right)); }

        // climb until we arrive at an ancestor from its left side
        let mut current = id;

        loop {
            match self[current].parent {
                None => return None,
                Some(parent) if self[parent].left == Some(current) => return Some(parent),
                Some(parent) => current = parent,
            }
        }
    }

    /// Overwrites the key and value of `id` and replaces its children, returning the old key and
    /// value.
    pub fn replace_node_data(&mut self, id: NodeId, key: K, value: V, left: Link, right: Link)
        -> (K, V) {

        let node = &mut self[id];
        let key_value = (replace(&mut node.key, key), replace(&mut node.value, value));
        node.left = left;
        node.right = right;

        for child in left.into_iter().chain(right) { self[child].parent = Some(id); }
        key_value
    }

    /// Unlinks a node that has a parent and at most one child, moving that child into the
    /// node's slot in its parent.
    ///
    /// # Panics
    ///
    /// Panics unless the node has at most one child and a parent that links back to it.
    pub fn splice_out(&mut self, id: NodeId) {
        let (parent, child) = {
            let node = &self[id];
            assert!(!node.has_both_children(), "cannot splice out {:?}: it has two children", id);

            match node.parent {
                Some(parent) => (parent, node.left.or(node.right)),
                None => panic!("cannot splice out {:?}: it has no parent", id),
            }
        };

        trace!("splicing out {:?}, promoting {:?} under {:?}", id, child, parent);

        if self.is_left_child(id) {
            *Left::forward_mut(&mut self[parent]) = child;
        } else if self.is_right_child(id) {
            *Right::forward_mut(&mut self[parent]) = child;
        } else {
            panic!("cannot splice out {:?}: {:?} does not link back to it", id, parent);
        }

        if let Some(child) = child { self[child].parent = Some(parent); }

        let node = &mut self[id];
        node.left = None;
        node.right = None;
        node.parent = None;
    }

    /// Makes `id` a root by clearing its parent back-reference.
    pub fn detach(&mut self, id: NodeId) { self[id].parent = None; }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Node<K, V> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }
}
