#![warn(missing_docs)]

//! Typed Arena
//!
//! A `Corrida` owns every value pushed into it for its whole lifetime and hands back a small `Copy` handle instead of a reference.
//! Handles are dense and sequential, so graph structures (automata, trees) can link nodes by index without any unsafe pointer juggling,
//! and side tables indexed by `Idx::index` line up with the arena one to one.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

// MARK: Handle
/// A handle to a value living in a `Corrida<T>`. Only meaningful for the arena that produced it.
pub struct Idx<T> {
    raw: usize,
    _boo: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Builds a handle from a raw position, the caller is responsible for it being in bounds of the arena it is used with.
    pub fn from_raw(raw: usize) -> Self {
        Self {
            raw,
            _boo: PhantomData,
        }
    }

    /// Position of the value in allocation order.
    pub fn index(self) -> usize {
        self.raw
    }
}

// Manual impls, deriving would put bounds on T.
impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.raw)
    }
}

// MARK: Arena
/// Append only arena. Values are never removed, so a handle stays valid as long as the arena lives.
pub struct Corrida<T> {
    fighters: Vec<T>,
}

impl<T> Corrida<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            fighters: Vec::new(),
        }
    }

    /// Creates an empty arena with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fighters: Vec::with_capacity(capacity),
        }
    }

    /// Moves the value into the arena, returning its handle.
    pub fn alloc(&mut self, fighter: T) -> Idx<T> {
        let idx = Idx::from_raw(self.fighters.len());
        self.fighters.push(fighter);
        idx
    }

    /// Returns the value behind the handle, or None if the handle is out of bounds.
    pub fn get(&self, idx: Idx<T>) -> Option<&T> {
        self.fighters.get(idx.index())
    }

    /// Mutable version of `get`.
    pub fn get_mut(&mut self, idx: Idx<T>) -> Option<&mut T> {
        self.fighters.get_mut(idx.index())
    }

    /// Number of values allocated so far.
    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    /// True if nothing was allocated yet.
    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    /// Iterates over (handle, value) pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> + '_ {
        self.fighters
            .iter()
            .enumerate()
            .map(|(i, fighter)| (Idx::from_raw(i), fighter))
    }

    /// Iterates over every handle in allocation order.
    pub fn indices(&self) -> impl Iterator<Item = Idx<T>> + use<T> {
        (0..self.fighters.len()).map(Idx::from_raw)
    }
}

impl<T> Default for Corrida<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Idx<T>> for Corrida<T> {
    type Output = T;

    fn index(&self, idx: Idx<T>) -> &T {
        &self.fighters[idx.index()]
    }
}

impl<T> IndexMut<Idx<T>> for Corrida<T> {
    fn index_mut(&mut self, idx: Idx<T>) -> &mut T {
        &mut self.fighters[idx.index()]
    }
}

impl<T: fmt::Debug> fmt::Debug for Corrida<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
