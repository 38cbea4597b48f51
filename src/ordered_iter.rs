use ::ordered_iter::{OrderedMapIterator, OrderedSetIterator};
use super::tree;

impl<'a, K, V> OrderedMapIterator for tree::Entries<'a, K, V> where K: Ord {
    type Key = &'a K;
    type Val = &'a V;
}

impl<'a, K, V> OrderedSetIterator for tree::Iter<'a, K, V> where K: Ord {}
