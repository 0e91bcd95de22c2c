//! The four-variant node taxonomy.
//!
//! The Null sentinel of the specification is not a variant here. It is
//! represented as `None` wherever a node reference is stored (a trie root,
//! a dispatch slot). The other three variants, [`Leaf`], [`Collision`],
//! [`Dispatch`], are the arms of [`Node`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::hash::BRANCH_FACTOR;
use crate::ptr::Ptr;

/// Per-thread live-node accounting, active for the crate's own test builds
/// and for any downstream build that opts in via `instrument-node-count`.
#[cfg(all(feature = "std", any(test, feature = "instrument-node-count")))]
mod live_count {
    use core::cell::Cell;

    std::thread_local! {
        static COUNT: Cell<isize> = Cell::new(0);
    }

    pub(crate) fn incr() {
        COUNT.with(|c| c.set(c.get() + 1));
    }

    pub(crate) fn decr() {
        COUNT.with(|c| c.set(c.get() - 1));
    }

    pub(crate) fn get() -> isize {
        COUNT.with(|c| c.get())
    }
}

#[cfg(not(all(feature = "std", any(test, feature = "instrument-node-count"))))]
mod live_count {
    pub(crate) fn incr() {}
    pub(crate) fn decr() {}
    pub(crate) fn get() -> isize {
        0
    }
}

/// Number of currently-live [`Node`] allocations on the calling thread.
pub(crate) fn live_node_count() -> isize {
    live_count::get()
}

/// One (hash, key, value) triple; a terminal node of the trie.
///
/// Invariant: `hash` equals the key's hash as computed at construction
/// time. Neither field mutates afterward; a `Leaf` is write-once, like
/// every other node.
#[derive(Debug, Clone)]
pub(crate) struct Leaf<K, V> {
    pub(crate) hash: u32,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Leaf<K, V> {
    pub(crate) fn new(hash: u32, key: K, value: V) -> Self {
        Self { hash, key, value }
    }
}

/// An unordered bucket of at least two leaves that share a full-width hash.
///
/// Invariant: every member's `hash` equals `hash`, and no two members are
/// equal under the key's `Eq` impl. A `Collision` is never constructed with
/// fewer than two members. A single surviving member collapses back to a
/// bare [`Leaf`] instead (see `ops::without`).
#[derive(Debug, Clone)]
pub(crate) struct Collision<K, V> {
    pub(crate) hash: u32,
    pub(crate) members: Vec<Leaf<K, V>>,
}

/// A branch node: `BRANCH_FACTOR` children, indexed by a 5-bit slice of the
/// hash at the current depth. The slot array is boxed.
///
/// Invariant: in normal form, at least two slots are occupied. A `Dispatch`
/// with zero occupied slots collapses to the Null sentinel (`None`); one
/// with exactly one occupied slot whose occupant is a `Leaf` or `Collision`
/// collapses to that occupant. See `ops::without`.
pub(crate) struct Dispatch<K, V> {
    pub(crate) children: Box<[Option<Ptr<Node<K, V>>>; BRANCH_FACTOR]>,
}

/// A node of the trie: a [`Leaf`], a [`Collision`] bucket, or a [`Dispatch`]
/// branch. The Null sentinel is `Option::<Ptr<Node<K, V>>>::None`, not a
/// variant of this enum.
pub(crate) enum Node<K, V> {
    Leaf(Leaf<K, V>),
    Collision(Collision<K, V>),
    Dispatch(Dispatch<K, V>),
}

impl<K, V> Drop for Node<K, V> {
    fn drop(&mut self) {
        live_count::decr();
    }
}

impl<K, V> Node<K, V> {
    /// Allocates a fresh, reference-counted node.
    pub(crate) fn alloc(self) -> Ptr<Node<K, V>> {
        live_count::incr();
        Ptr::new(self)
    }

    pub(crate) fn from_leaf(leaf: Leaf<K, V>) -> Ptr<Node<K, V>> {
        Node::Leaf(leaf).alloc()
    }

    pub(crate) fn collision(hash: u32, members: Vec<Leaf<K, V>>) -> Ptr<Node<K, V>> {
        debug_assert!(members.len() >= 2, "a collision bucket needs >= 2 members");
        Node::Collision(Collision { hash, members }).alloc()
    }

    pub(crate) fn dispatch(
        children: Box<[Option<Ptr<Node<K, V>>>; BRANCH_FACTOR]>,
    ) -> Ptr<Node<K, V>> {
        Node::Dispatch(Dispatch { children }).alloc()
    }
}

/// Builds a fresh, boxed, all-`None` child array.
pub(crate) fn empty_children<K, V>() -> Box<[Option<Ptr<Node<K, V>>>; BRANCH_FACTOR]> {
    Box::new(core::array::from_fn(|_| None))
}

/// Builds a fresh child array identical to `children` except slot `index`,
/// which becomes `replacement`. Retained slots are cloned (an `Rc`/`Arc`
/// refcount bump); the replaced slot is moved in, not cloned.
pub(crate) fn children_with_replacement<K, V>(
    children: &[Option<Ptr<Node<K, V>>>; BRANCH_FACTOR],
    index: usize,
    replacement: Option<Ptr<Node<K, V>>>,
) -> Box<[Option<Ptr<Node<K, V>>>; BRANCH_FACTOR]> {
    let mut slot_value = Some(replacement);

    Box::new(core::array::from_fn(|i| {
        if i == index {
            slot_value.take().expect("from_fn visits each index once")
        } else {
            children[i].clone()
        }
    }))
}
