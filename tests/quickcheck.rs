#![cfg(feature = "quickcheck")]

use bst::Tree;
use quickcheck::{Arbitrary, Gen};

pub trait Remove<K> where K: Ord {
    fn remove<V>(&self, tree: &mut Tree<K, V>) -> Option<(K, V)>;
}

/// Deletes an arbitrary key, which is usually absent from the tree.
#[derive(Clone, Debug)]
pub struct Find<K>(K);

impl<K> Arbitrary for Find<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { Find(K::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(Find)) }
}

impl<K> Remove<K> for Find<K> where K: Ord {
    fn remove<V>(&self, tree: &mut Tree<K, V>) -> Option<(K, V)> {
        tree.delete(&self.0).ok()
    }
}

/// Deletes the key at index `n % tree.len()`, so that the key is always present unless the tree
/// is empty.
#[derive(Clone, Debug)]
pub struct Nth(usize);

impl Arbitrary for Nth {
    fn arbitrary(gen: &mut Gen) -> Self { Nth(usize::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(Nth)) }
}

impl<K> Remove<K> for Nth where K: Clone + Ord {
    fn remove<V>(&self, tree: &mut Tree<K, V>) -> Option<(K, V)> {
        if tree.is_empty() { return None; }
        let key = tree.iter().nth(self.0 % tree.len()).cloned()?;
        Some(tree.delete(&key).expect("iterated key is present"))
    }
}

macro_rules! remove {
    ($K:ty, $V:ty, $R:ty) => {
        mod remove {
            use crate::Remove;
            use bst::{Error, Tree};
            use quickcheck::{quickcheck, TestResult};

            #[test]
            fn removes_key() {
                fn test(mut tree: Tree<$K, $V>, removal: $R) -> TestResult {
                    match removal.remove(&mut tree) {
                        None => TestResult::discard(),
                        Some((ref key, _)) => TestResult::from_bool(
                            !tree.contains(key) &&
                            tree.get(key) == Err(Error::KeyNotFound) &&
                            tree.iter().find(|k| *k == key).is_none()
                        ),
                    }
                }

                quickcheck(test as fn(Tree<$K, $V>, $R) -> TestResult);
            }

            #[test]
            fn returns_removed_value() {
                fn test(mut tree: Tree<$K, $V>, removal: $R) -> TestResult {
                    let old_tree = tree.clone();

                    match removal.remove(&mut tree) {
                        None => TestResult::discard(),
                        Some((key, value)) => TestResult::from_bool(old_tree[&key] == value),
                    }
                }

                quickcheck(test as fn(Tree<$K, $V>, $R) -> TestResult);
            }

            #[test]
            fn affects_no_others() {
                fn test(mut tree: Tree<$K, $V>, removal: $R) -> bool {
                    let old_tree = tree.clone();

                    match removal.remove(&mut tree) {
                        None => tree == old_tree,
                        Some((ref key, _)) =>
                            tree.entries().collect::<Vec<_>>() ==
                                old_tree.entries().filter(|e| e.0 != key).collect::<Vec<_>>(),
                    }
                }

                quickcheck(test as fn(Tree<$K, $V>, $R) -> bool);
            }

            #[test]
            fn sets_len() {
                fn test(mut tree: Tree<$K, $V>, removal: $R) -> bool {
                    let old_len = tree.len();

                    match removal.remove(&mut tree) {
                        None => tree.len() == old_len,
                        Some(_) => tree.len() == old_len - 1,
                    }
                }

                quickcheck(test as fn(Tree<$K, $V>, $R) -> bool);
            }
        }
    }
}

mod find {
    remove!{u32, u16, crate::Find<u32>}
}

mod nth {
    remove!{u16, u16, crate::Nth}
}

mod put {
    use bst::Tree;
    use quickcheck::quickcheck;

    #[test]
    fn sets_len() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            let old_len = tree.len();

            if tree.put(key, value).is_some() {
                tree.len() == old_len
            } else {
                tree.len() == old_len + 1
            }
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn inserts_key() {
        fn test(mut tree: Tree<u32, u16>, key: u32, mut value: u16) -> bool {
            tree.put(key, value);

            tree.contains(&key) &&
            tree.get(&key) == Ok(&value) &&
            tree.get_mut(&key) == Ok(&mut value) &&
            tree.entries().filter(|e| *e.0 == key).collect::<Vec<_>>() == [(&key, &value)]
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn overwrites_value() {
        fn test(mut tree: Tree<u32, u16>, key: u32, v1: u16, v2: u16) -> bool {
            tree.put(key, v1);
            let len = tree.len();

            tree.put(key, v2) == Some(v1) && tree.len() == len && tree[&key] == v2
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16, u16) -> bool);
    }

    #[test]
    fn affects_no_others() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            let old_tree = tree.clone();
            tree.put(key, value);

            tree.entries().filter(|e| *e.0 != key).collect::<Vec<_>>() ==
                old_tree.entries().filter(|e| *e.0 != key).collect::<Vec<_>>()
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn returns_old_value() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            tree.get(&key).ok().cloned() == tree.put(key, value)
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }
}

mod contains {
    use bst::Tree;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn agrees_with_get(tree: Tree<u32, u16>, key: u32) -> bool {
        tree.contains(&key) == tree.get(&key).is_ok()
    }

    #[quickcheck]
    fn agrees_with_iter(tree: Tree<u32, u16>, key: u32) -> bool {
        tree.contains(&key) == tree.iter().any(|k| *k == key)
    }
}

mod iter {
    use bst::Tree;
    use quickcheck::quickcheck;
    use quickcheck_macros::quickcheck as property;

    #[test]
    fn ascends() {
        fn test(tree: Tree<u32, u16>) -> bool {
            tree.iter().zip(tree.iter().skip(1)).all(|(k1, k2)| k1 < k2)
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }

    #[test]
    fn size_hint_is_exact() {
        fn test(tree: Tree<u32, u16>) -> bool {
            let mut len = tree.len();
            let mut it = tree.iter();

            loop {
                if it.size_hint() != (len, Some(len)) { return false; }
                if it.next().is_none() { break; }
                len -= 1;
            }

            len == 0 && it.size_hint() == (0, Some(0))
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }

    #[property]
    fn keys_agree_with_entries(tree: Tree<u32, u16>) -> bool {
        tree.iter().eq(tree.entries().map(|e| e.0))
    }

    #[property]
    fn stays_exhausted(tree: Tree<u32, u16>) -> bool {
        let mut it = tree.iter();
        it.by_ref().for_each(drop);
        it.next().is_none() && it.next().is_none()
    }
}
