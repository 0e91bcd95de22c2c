//! The shared node pointer, selected at compile time by the `atomic` feature.
//!
//! Every reference to a child node goes through `Ptr<T>`. With the default
//! feature set this is [`alloc::rc::Rc`]: non-atomic, single-thread
//! reference counting. Enabling `atomic` swaps it for [`alloc::sync::Arc`],
//! making a [`crate::Trie`] built against it `Send`/`Sync` whenever its key
//! and value types are.
//!
//! Nothing else in the crate is aware of which pointer is active.

#[cfg(not(feature = "atomic"))]
pub(crate) type Ptr<T> = alloc::rc::Rc<T>;

#[cfg(feature = "atomic")]
pub(crate) type Ptr<T> = alloc::sync::Arc<T>;
