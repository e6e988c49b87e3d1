//! Identifier management
//!
//! Generators allocate and recycle non-negative integer ids;
//! [`IdentifierMap`] couples a generator with the values stored under
//! those ids.

pub mod generator;
pub mod map;

pub use generator::{IdGenerator, IdGeneratorKind, ListIdGenerator, MaxIdGenerator, SetIdGenerator};
pub use map::IdentifierMap;

use std::hash::Hash;

/// A key type backed by a raw `u64` identifier
pub trait IdKey: Copy + Eq + Hash {
    fn from_raw(raw: u64) -> Self;

    fn raw(self) -> u64;
}

impl IdKey for u64 {
    fn from_raw(raw: u64) -> Self {
        raw
    }

    fn raw(self) -> u64 {
        self
    }
}
