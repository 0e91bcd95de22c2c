//! The public façade: `Trie<K, V, S>`, implementing exactly the external
//! interface named in the specification's external-interfaces section.

use core::hash::{BuildHasher, Hash};

use crate::hash::hash32;
use crate::node::{Leaf, Node};
use crate::ops;
use crate::ptr::Ptr;

/// The default hasher for `Trie<K, V>`: the standard library's
/// randomly-seeded `RandomState`.
#[cfg(feature = "std")]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// A persistent, structurally-shared hash-array-mapped trie.
///
/// Every mutating method, [`assoc`](Trie::assoc) and [`without`](Trie::without),
/// returns a new `Trie` sharing every subtree the change did not touch with
/// `self`. `self` is left untouched and remains fully usable.
///
/// `K` requires `Hash + Eq + Clone`; `V` requires `Clone`. A misbehaving
/// `Hash`/`Eq` pair is a caller contract violation the trie does not detect.
///
/// `S: BuildHasher` selects how keys are hashed, defaulting to
/// [`DefaultHashBuilder`] under the `std` feature.
#[cfg(feature = "std")]
pub struct Trie<K, V, S = DefaultHashBuilder> {
    root: Option<Ptr<Node<K, V>>>,
    hasher: S,
}

/// See the `std`-enabled [`Trie`] doc comment; without `std` there is no
/// default hasher, so `S` must always be named explicitly.
#[cfg(not(feature = "std"))]
pub struct Trie<K, V, S> {
    root: Option<Ptr<Node<K, V>>>,
    hasher: S,
}

impl<K, V, S> Clone for Trie<K, V, S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Trie {
            root: self.root.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

#[cfg(feature = "std")]
impl<K, V> Default for Trie<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Trie::new()
    }
}

#[cfg(feature = "std")]
impl<K, V> Trie<K, V, DefaultHashBuilder> {
    /// Returns the canonical empty trie, hashed with the default
    /// `std`-provided hasher.
    pub fn new() -> Self {
        Trie::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, V, S> Trie<K, V, S> {
    /// Returns the canonical empty trie, hashed with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Trie { root: None, hasher }
    }

    /// `true` if this trie holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<K, V, S> Trie<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Returns a new trie with `key` mapped to `value`, replacing any prior
    /// mapping for an equal key. `self` is unaffected and remains valid.
    pub fn assoc(&self, key: K, value: V) -> Self
    where
        S: Clone,
    {
        let h = hash32(&self.hasher, &key);
        let leaf = Leaf::new(h, key, value);
        let root = ops::assoc(self.root.as_ref(), h, 0, leaf);

        Trie {
            root: Some(root),
            hasher: self.hasher.clone(),
        }
    }

    /// Returns a new trie with `key` removed, if present. If `key` was
    /// absent, the returned trie shares its root with `self` (no
    /// allocation occurs).
    pub fn without(&self, key: &K) -> Self
    where
        S: Clone,
    {
        let h = hash32(&self.hasher, key);
        let root = ops::without(self.root.as_ref(), h, 0, key);

        Trie {
            root,
            hasher: self.hasher.clone(),
        }
    }

    /// Looks up `key`, returning its value if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        let h = hash32(&self.hasher, key);
        ops::get(self.root.as_ref(), h, 0, key)
    }

    /// `true` if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a trie sharing the same root as `self`, holding one
    /// additional share on it.
    pub fn retain(&self) -> Self
    where
        S: Clone,
    {
        self.clone()
    }

    /// Releases this handle's share of the trie's root.
    pub fn release(self) {}
}

#[cfg(test)]
impl<K, V, S> Trie<K, V, S> {
    /// Exposes the root pointer for structural assertions in the test
    /// suite (reference identity across versions, node-variant shape).
    pub(crate) fn debug_root(&self) -> Option<&Ptr<Node<K, V>>> {
        self.root.as_ref()
    }
}
