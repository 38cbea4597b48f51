use super::{Arena, Dir, Left, Link, Node, NodeId};

/// An in-order traversal that keeps the unvisited left spine on an explicit stack.
pub struct Iter<'a, K: 'a, V: 'a> {
    arena: &'a Arena<K, V>,
    stack: Vec<NodeId>,
    size: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(arena: &'a Arena<K, V>, root: Link, size: usize) -> Iter<'a, K, V> {
        let mut it = Iter { arena: arena, stack: vec![], size: size };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = Left::forward(&self.arena[id]);
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> {
        Iter { arena: self.arena, stack: self.stack.clone(), size: self.size }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<&'a Node<K, V>> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.push_left_spine(node.right);
        self.size -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
