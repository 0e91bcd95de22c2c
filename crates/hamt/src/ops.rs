//! The variant-polymorphic `assoc`/`without`/`get` recursion and the
//! two-leaf promotion helper.
//!
//! `shift`, the bit-offset into the hash, is passed explicitly through
//! every call; it is not stored in the node data.

use alloc::vec::Vec;

use crate::hash::{slot, SLICE_WIDTH};
use crate::node::{children_with_replacement, Collision, Leaf, Node};
use crate::ptr::Ptr;

/// Inserts or replaces `new_leaf` in `node`, returning the resulting trie.
///
/// `new_leaf.hash` must equal `hash`; the caller (the `Trie` façade)
/// guarantees this by constructing the leaf from the same hash it passes
/// down here.
pub(crate) fn assoc<K, V>(
    node: Option<&Ptr<Node<K, V>>>,
    hash: u32,
    shift: u32,
    new_leaf: Leaf<K, V>,
) -> Ptr<Node<K, V>>
where
    K: Eq + Clone,
    V: Clone,
{
    match node {
        None => Node::from_leaf(new_leaf),

        Some(ptr) => match &**ptr {
            Node::Leaf(l) => {
                if l.hash == hash && l.key == new_leaf.key {
                    Node::from_leaf(new_leaf)
                } else if l.hash == hash {
                    // Distinct keys, identical hash: a collision bucket,
                    // not a dispatch split.
                    Node::collision(hash, alloc::vec![l.clone(), new_leaf])
                } else {
                    promote(l.clone(), new_leaf, shift)
                }
            }

            Node::Collision(c) => {
                if hash != c.hash {
                    promote_against_collision(ptr.clone(), c.hash, new_leaf, shift)
                } else {
                    Node::collision(hash, assoc_into_members(&c.members, new_leaf))
                }
            }

            Node::Dispatch(d) => {
                let i = slot(hash, shift);

                match &d.children[i] {
                    None => {
                        let children = children_with_replacement(
                            &d.children,
                            i,
                            Some(Node::from_leaf(new_leaf)),
                        );

                        Node::dispatch(children)
                    }

                    Some(child) => {
                        let child_prime = assoc(Some(child), hash, shift + SLICE_WIDTH, new_leaf);

                        if Ptr::ptr_eq(child, &child_prime) {
                            return ptr.clone();
                        }

                        let children =
                            children_with_replacement(&d.children, i, Some(child_prime));

                        Node::dispatch(children)
                    }
                }
            }
        },
    }
}

/// Builds the replacement member list for a collision bucket that already
/// matches `new_leaf.hash`: replaces the member with an equal key if one
/// exists, otherwise appends.
fn assoc_into_members<K, V>(members: &[Leaf<K, V>], new_leaf: Leaf<K, V>) -> Vec<Leaf<K, V>>
where
    K: Eq + Clone,
    V: Clone,
{
    match members.iter().position(|m| m.key == new_leaf.key) {
        Some(pos) => {
            let mut members = members.to_vec();
            members[pos] = new_leaf;
            members
        }
        None => {
            let mut members = members.to_vec();
            members.push(new_leaf);
            members
        }
    }
}

/// Removes `probe_key` from `node`, returning the resulting trie (or the
/// Null sentinel, `None`, if the trie became empty).
///
/// Returns the same `Ptr` the caller passed in (wrapped back in `Some`)
/// whenever `probe_key` was absent.
pub(crate) fn without<K, V>(
    node: Option<&Ptr<Node<K, V>>>,
    hash: u32,
    shift: u32,
    probe_key: &K,
) -> Option<Ptr<Node<K, V>>>
where
    K: Eq + Clone,
    V: Clone,
{
    match node {
        None => None,

        Some(ptr) => match &**ptr {
            Node::Leaf(l) => {
                if l.hash == hash && &l.key == probe_key {
                    None
                } else {
                    Some(ptr.clone())
                }
            }

            Node::Collision(c) => {
                if hash != c.hash {
                    return Some(ptr.clone());
                }

                match c.members.iter().position(|m| &m.key == probe_key) {
                    None => Some(ptr.clone()),
                    Some(pos) => Some(without_collision_member(c, pos)),
                }
            }

            Node::Dispatch(d) => {
                let i = slot(hash, shift);

                let child = match &d.children[i] {
                    None => return Some(ptr.clone()),
                    Some(child) => child,
                };

                let child_prime = without(Some(child), hash, shift + SLICE_WIDTH, probe_key);

                if let Some(c2) = &child_prime {
                    if Ptr::ptr_eq(child, c2) {
                        return Some(ptr.clone());
                    }
                }

                let mut new_children = children_with_replacement(&d.children, i, child_prime);

                let mut occupied_count = 0usize;
                let mut occupied_index = 0usize;

                for (j, occupant) in new_children.iter().enumerate() {
                    if occupant.is_some() {
                        occupied_count += 1;
                        occupied_index = j;
                    }
                }

                match occupied_count {
                    0 => None,
                    1 => {
                        let is_branch = matches!(
                            new_children[occupied_index].as_deref(),
                            Some(Node::Dispatch(_))
                        );

                        if is_branch {
                            Some(Node::dispatch(new_children))
                        } else {
                            Some(
                                new_children[occupied_index]
                                    .take()
                                    .expect("occupied_index points at a Some slot"),
                            )
                        }
                    }
                    _ => Some(Node::dispatch(new_children)),
                }
            }
        },
    }
}

/// Removes the member at `pos` from a collision bucket, collapsing to a
/// bare `Leaf` when only one member survives.
fn without_collision_member<K, V>(c: &Collision<K, V>, pos: usize) -> Ptr<Node<K, V>>
where
    K: Clone,
    V: Clone,
{
    if c.members.len() == 2 {
        let survivor = c.members[1 - pos].clone();
        return Node::from_leaf(survivor);
    }

    let mut members = Vec::with_capacity(c.members.len() - 1);
    for (i, m) in c.members.iter().enumerate() {
        if i != pos {
            members.push(m.clone());
        }
    }

    Node::collision(c.hash, members)
}

/// Looks up `probe_key`, returning a reference to the matching leaf's value
/// if present.
pub(crate) fn get<'a, K, V>(
    node: Option<&'a Ptr<Node<K, V>>>,
    hash: u32,
    shift: u32,
    probe_key: &K,
) -> Option<&'a V>
where
    K: Eq,
{
    match node {
        None => None,

        Some(ptr) => match &**ptr {
            Node::Leaf(l) => {
                if l.hash == hash && &l.key == probe_key {
                    Some(&l.value)
                } else {
                    None
                }
            }

            Node::Collision(c) => {
                if hash != c.hash {
                    None
                } else {
                    c.members
                        .iter()
                        .find(|m| &m.key == probe_key)
                        .map(|m| &m.value)
                }
            }

            Node::Dispatch(d) => {
                let i = slot(hash, shift);
                get(d.children[i].as_ref(), hash, shift + SLICE_WIDTH, probe_key)
            }
        },
    }
}

/// Given a leaf already at `node`'s position and a fresh leaf with a
/// different hash, allocates a `Dispatch` node (or chain of them) that
/// separates the two.
///
/// Requires `l1.hash != l2.hash`; the caller routes equal-hash pairs to the
/// collision bucket instead.
fn promote<K, V>(l1: Leaf<K, V>, l2: Leaf<K, V>, shift: u32) -> Ptr<Node<K, V>> {
    debug_assert_ne!(l1.hash, l2.hash, "promote requires distinct hashes");

    let i1 = slot(l1.hash, shift);
    let i2 = slot(l2.hash, shift);

    if i1 != i2 {
        let mut children = crate::node::empty_children();
        children[i1] = Some(Node::from_leaf(l1));
        children[i2] = Some(Node::from_leaf(l2));
        return Node::dispatch(children);
    }

    let mut children = crate::node::empty_children();
    children[i1] = Some(promote(l1, l2, shift + SLICE_WIDTH));
    Node::dispatch(children)
}

/// Builds the smallest dispatch chain that places an existing `Collision`
/// node (reached via `existing_hash`) alongside a fresh leaf with a
/// different hash.
fn promote_against_collision<K, V>(
    existing: Ptr<Node<K, V>>,
    existing_hash: u32,
    new_leaf: Leaf<K, V>,
    shift: u32,
) -> Ptr<Node<K, V>> {
    debug_assert_ne!(
        existing_hash, new_leaf.hash,
        "promote_against_collision requires distinct hashes"
    );

    let i1 = slot(existing_hash, shift);
    let i2 = slot(new_leaf.hash, shift);

    if i1 != i2 {
        let mut children = crate::node::empty_children();
        children[i1] = Some(existing);
        children[i2] = Some(Node::from_leaf(new_leaf));
        return Node::dispatch(children);
    }

    let mut children = crate::node::empty_children();
    children[i1] = Some(promote_against_collision(
        existing,
        existing_hash,
        new_leaf,
        shift + SLICE_WIDTH,
    ));
    Node::dispatch(children)
}
