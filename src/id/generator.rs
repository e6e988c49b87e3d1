//! Identifier generators
//!
//! Three strategies share one contract:
//! - [`MaxIdGenerator`] always hands out an id above every id seen so far and
//!   never reuses anything
//! - [`SetIdGenerator`] keeps released ids in an ordered set and reissues the
//!   smallest one first
//! - [`ListIdGenerator`] keeps released ids in a stack and reissues the most
//!   recently released one first
//!
//! [`IdGenerator`] wraps the three behind a single type selected by
//! [`IdGeneratorKind`].

use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Strategy used to allocate and recycle identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdGeneratorKind {
    /// Monotonic, never reclaims
    Max,
    /// Reclaims into a set
    #[default]
    Set,
    /// Reclaims into a LIFO list
    List,
}

impl IdGeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdGeneratorKind::Max => "max",
            IdGeneratorKind::Set => "set",
            IdGeneratorKind::List => "list",
        }
    }
}

impl fmt::Display for IdGeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdGeneratorKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(IdGeneratorKind::Max),
            "set" => Ok(IdGeneratorKind::Set),
            "list" => Ok(IdGeneratorKind::List),
            other => Err(GraphError::UnknownGenerator(other.to_string())),
        }
    }
}

fn successor(id: u64) -> GraphResult<u64> {
    id.checked_add(1).ok_or(GraphError::IdOutOfRange(id))
}

/// Generator returning ids strictly above the highest id handed out so far
///
/// Requesting an explicit id above `next_fresh` silently consumes every id
/// in between; those ids can never be requested again until `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxIdGenerator {
    next_fresh: u64,
}

impl MaxIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&mut self, requested: Option<u64>) -> GraphResult<u64> {
        match requested {
            None => {
                let id = self.next_fresh;
                self.next_fresh = successor(id)?;
                Ok(id)
            }
            Some(id) if id < self.next_fresh => Err(GraphError::IdInUse(id)),
            Some(id) => {
                self.next_fresh = successor(id)?;
                Ok(id)
            }
        }
    }

    /// Ids are never reclaimed by this strategy.
    pub fn release_id(&mut self, _id: u64) -> GraphResult<()> {
        Ok(())
    }

    pub fn clear(&mut self) {
        self.next_fresh = 0;
    }
}

/// Generator recycling released ids, smallest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetIdGenerator {
    next_fresh: u64,
    reclaimed: BTreeSet<u64>,
}

impl SetIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&mut self, requested: Option<u64>) -> GraphResult<u64> {
        match requested {
            None => match self.reclaimed.pop_first() {
                Some(id) => Ok(id),
                None => {
                    let id = self.next_fresh;
                    self.next_fresh = successor(id)?;
                    Ok(id)
                }
            },
            Some(id) if id >= self.next_fresh => {
                let next = successor(id)?;
                self.reclaimed.extend(self.next_fresh..id);
                self.next_fresh = next;
                Ok(id)
            }
            Some(id) => {
                if self.reclaimed.remove(&id) {
                    Ok(id)
                } else {
                    Err(GraphError::IdInUse(id))
                }
            }
        }
    }

    pub fn release_id(&mut self, id: u64) -> GraphResult<()> {
        if id >= self.next_fresh {
            return Err(GraphError::IdOutOfRange(id));
        }
        if !self.reclaimed.insert(id) {
            return Err(GraphError::IdNotInUse(id));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.next_fresh = 0;
        self.reclaimed.clear();
    }
}

/// Generator recycling released ids, most recently released first
///
/// Release and explicit requests below `next_fresh` scan the list, so both
/// are linear in the number of reclaimed ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIdGenerator {
    next_fresh: u64,
    reclaimed: Vec<u64>,
}

impl ListIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&mut self, requested: Option<u64>) -> GraphResult<u64> {
        match requested {
            None => match self.reclaimed.pop() {
                Some(id) => Ok(id),
                None => {
                    let id = self.next_fresh;
                    self.next_fresh = successor(id)?;
                    Ok(id)
                }
            },
            Some(id) if id >= self.next_fresh => {
                let next = successor(id)?;
                self.reclaimed.extend(self.next_fresh..id);
                self.next_fresh = next;
                Ok(id)
            }
            Some(id) => match self.reclaimed.iter().position(|&free| free == id) {
                Some(pos) => {
                    self.reclaimed.remove(pos);
                    Ok(id)
                }
                None => Err(GraphError::IdInUse(id)),
            },
        }
    }

    pub fn release_id(&mut self, id: u64) -> GraphResult<()> {
        if id >= self.next_fresh {
            return Err(GraphError::IdOutOfRange(id));
        }
        if self.reclaimed.contains(&id) {
            return Err(GraphError::IdNotInUse(id));
        }
        self.reclaimed.push(id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.next_fresh = 0;
        self.reclaimed.clear();
    }
}

/// An id generator of any of the three strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdGenerator {
    Max(MaxIdGenerator),
    Set(SetIdGenerator),
    List(ListIdGenerator),
}

impl IdGenerator {
    pub fn new(kind: IdGeneratorKind) -> Self {
        match kind {
            IdGeneratorKind::Max => IdGenerator::Max(MaxIdGenerator::new()),
            IdGeneratorKind::Set => IdGenerator::Set(SetIdGenerator::new()),
            IdGeneratorKind::List => IdGenerator::List(ListIdGenerator::new()),
        }
    }

    pub fn kind(&self) -> IdGeneratorKind {
        match self {
            IdGenerator::Max(_) => IdGeneratorKind::Max,
            IdGenerator::Set(_) => IdGeneratorKind::Set,
            IdGenerator::List(_) => IdGeneratorKind::List,
        }
    }

    /// Hand out `requested` if it is available, or a new id when `None`.
    ///
    /// Fails with [`GraphError::IdInUse`] when `requested` was already
    /// handed out and not released.
    pub fn get_id(&mut self, requested: Option<u64>) -> GraphResult<u64> {
        match self {
            IdGenerator::Max(gen) => gen.get_id(requested),
            IdGenerator::Set(gen) => gen.get_id(requested),
            IdGenerator::List(gen) => gen.get_id(requested),
        }
    }

    /// Mark `id` as available again.
    ///
    /// Recycling strategies fail with [`GraphError::IdOutOfRange`] for ids
    /// never handed out and [`GraphError::IdNotInUse`] for ids already
    /// released.
    pub fn release_id(&mut self, id: u64) -> GraphResult<()> {
        match self {
            IdGenerator::Max(gen) => gen.release_id(id),
            IdGenerator::Set(gen) => gen.release_id(id),
            IdGenerator::List(gen) => gen.release_id(id),
        }
    }

    pub fn clear(&mut self) {
        match self {
            IdGenerator::Max(gen) => gen.clear(),
            IdGenerator::Set(gen) => gen.clear(),
            IdGenerator::List(gen) => gen.clear(),
        }
    }

    /// Smallest id never handed out yet
    pub fn next_fresh(&self) -> u64 {
        match self {
            IdGenerator::Max(gen) => gen.next_fresh,
            IdGenerator::Set(gen) => gen.next_fresh,
            IdGenerator::List(gen) => gen.next_fresh,
        }
    }

    /// Whether `id` was released (or skipped) and may be handed out again
    pub fn is_reclaimed(&self, id: u64) -> bool {
        match self {
            IdGenerator::Max(_) => false,
            IdGenerator::Set(gen) => gen.reclaimed.contains(&id),
            IdGenerator::List(gen) => gen.reclaimed.contains(&id),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new(IdGeneratorKind::default())
    }
}
