//! Sets of NFA states, the identity of a DFA state during subset construction.

use fixedbitset::FixedBitSet;
use std::fmt;

use crate::nfa::StateId;

/// A set of NFA states backed by a bit set sized to the NFA.
///
/// Equality and hashing include the capacity, so every set compared against another must be created for the same NFA.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Creates an empty set able to hold states `0..capacity` without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Creates a set holding one state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Inserts a state, returning true if it was not there before.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state.index();
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Checks membership.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state.index())
    }

    /// True if no state is in the set.
    pub fn is_empty(&self) -> bool {
        self.bits.ones().next().is_none()
    }

    /// Number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterates in ascending state order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(StateId::from_raw)
    }

    /// Adds every state of `other`.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// True if the two sets share a state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(StateId::index)).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().map(|s| s.index() + 1).max().unwrap_or(0);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn id(raw: usize) -> StateId {
        StateId::from_raw(raw)
    }

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        assert!(set.insert(id(3)));
        assert!(set.insert(id(7)));
        assert!(!set.insert(id(3)));
        assert_eq!(set.len(), 2);
        assert!(set.contains(id(3)));
        assert!(!set.contains(id(5)));
        assert_eq!(set.iter().map(StateId::index).collect::<Vec<_>>(), [3, 7]);
    }

    #[test]
    fn test_state_set_union() {
        let mut left = StateSet::singleton(id(1), 4);
        let right: StateSet = [id(2), id(3)].into_iter().collect();

        assert!(!left.intersects(&right));
        left.union_with(&right);
        assert_eq!(left.len(), 3);
        assert!(left.intersects(&right));
    }

    #[test]
    fn test_equal_sets_hash_alike() {
        use std::collections::HashSet;

        let mut a = StateSet::with_capacity(8);
        a.insert(id(5));
        a.insert(id(1));
        let mut b = StateSet::with_capacity(8);
        b.insert(id(1));
        b.insert(id(5));

        let seen: HashSet<StateSet> = [a, b].into_iter().collect();
        assert_eq!(seen.len(), 1);
    }

    mod model {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn matches_btreeset(left in prop::collection::vec(0usize..64, 0..20), right in prop::collection::vec(0usize..64, 0..20)) {
                let mut set = StateSet::with_capacity(16);
                let mut expected = BTreeSet::new();
                for &raw in &left {
                    prop_assert_eq!(set.insert(id(raw)), expected.insert(raw));
                }
                prop_assert_eq!(set.len(), expected.len());
                prop_assert_eq!(set.iter().map(StateId::index).collect::<Vec<_>>(), expected.iter().copied().collect::<Vec<_>>());

                let other: StateSet = right.iter().copied().map(id).collect();
                let other_expected: BTreeSet<usize> = right.iter().copied().collect();
                prop_assert_eq!(set.intersects(&other), !expected.is_disjoint(&other_expected));

                set.union_with(&other);
                expected.extend(other_expected);
                prop_assert_eq!(set.iter().map(StateId::index).collect::<Vec<_>>(), expected.into_iter().collect::<Vec<_>>());
            }
        }
    }
}
