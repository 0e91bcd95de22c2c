#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod hash;
mod node;
mod ops;
mod ptr;
mod trie;


pub use hash::{BRANCH_FACTOR, HASH_WIDTH, MAX_DEPTH, SLICE_WIDTH};
pub use trie::Trie;

#[cfg(feature = "std")]
pub use trie::DefaultHashBuilder;
