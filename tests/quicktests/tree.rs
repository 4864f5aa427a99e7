use ordered_bst::Tree;

use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Whether the in-order keys are strictly increasing and agree with the model's keys.
fn matches_model<K, V>(tree: &Tree<K, V>, model: &BTreeMap<K, V>) -> bool
where
    K: Ord,
    V: PartialEq,
{
    let keys = tree.inorder();
    keys.windows(2).all(|w| w[0] < w[1])
        && keys.into_iter().eq(model.keys())
        && tree.len() == model.len()
        && model
            .iter()
            .all(|(k, v)| tree.get(k) == Some(v) && tree.iter_get(k) == Some(v))
}

/// Applies a set of operations to a tree and a model map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both, in the same order.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, model: &mut BTreeMap<K, V>) -> bool
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                if bst.insert(k.clone(), v.clone()) != model.insert(k.clone(), v.clone()) {
                    return false;
                }
            }
            Op::IterInsert(k, v) => {
                if bst.iter_insert(k.clone(), v.clone()) != model.insert(k.clone(), v.clone()) {
                    return false;
                }
            }
            Op::Remove(k) => {
                if bst.remove(k) != model.remove(k) {
                    return false;
                }
            }
            Op::Check => {
                if !matches_model(bst, model) {
                    return false;
                }
            }
        }
    }

    matches_model(bst, model)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model)
}

#[quickcheck]
fn fuzz_multiple_operations_u16(ops: Vec<Op<u16, String>>) -> bool {
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.get(x) == Some(x) && tree.iter_get(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.iter_insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(x).is_none() && !tree.contains_key(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.get(x).is_none())
        && still_present.iter().all(|x| tree.get(x) == Some(x))
}

#[quickcheck]
fn duplicate_inserts_keep_one_node(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, 0);
    }
    let before = tree.len();
    for x in &xs {
        tree.iter_insert(*x, 1);
    }

    let distinct: HashSet<_> = xs.iter().collect();
    tree.len() == before
        && tree.len() == distinct.len()
        && tree.inorder().len() == distinct.len()
        && xs.iter().all(|x| tree.get(x) == Some(&1))
}

#[quickcheck]
fn height_bounds(xs: Vec<u8>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let height = tree.height();

    // At least the height of a complete tree, at most a chain.
    let min = (usize::BITS - tree.len().leading_zeros()) as usize;
    min <= height && height <= tree.len()
}

#[quickcheck]
fn preorder_visits_every_key_once(xs: Vec<i16>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let mut pre: Vec<_> = tree.preorder();
    pre.sort();

    // The first key ever inserted stays at the root.
    pre == tree.inorder() && tree.preorder().first().copied() == xs.first()
}
