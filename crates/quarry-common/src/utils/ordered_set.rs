//! Insertion-ordered, duplicate-free collection.
//!
//! [`OrderedSet`] keeps the first-seen order of its elements so that compiled
//! output is reproducible, while comparing and hashing like a set. Two sets
//! holding the same elements in different order are equal and hash the same,
//! which is what lets structurally identical graphs built in different literal
//! order share one memoized compilation.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;

/// Seeds for element hashing. Fixed so that equal sets hash equally no matter
/// which hasher instance the outer `Hash` call was made with.
const ELEMENT_HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// An insertion-ordered set.
///
/// Appending an element that is already present is a no-op, so the position
/// of an element is always where it was first inserted.
///
/// # Example
///
/// ```
/// use quarry_common::OrderedSet;
///
/// let mut set: OrderedSet<_> = ["b", "a", "b"].into_iter().collect();
/// set.insert("c");
/// set.insert("a");
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    elements: IndexSet<T>,
}

impl<T> OrderedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: IndexSet::new(),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns the first inserted element.
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }
}

impl<T: Hash + Eq> OrderedSet<T> {
    /// Creates a set holding a single element.
    #[must_use]
    pub fn singleton(element: T) -> Self {
        let mut set = Self::new();
        set.insert(element);
        set
    }

    /// Appends an element unless it is already present.
    ///
    /// Returns `true` if the element was added.
    pub fn insert(&mut self, element: T) -> bool {
        self.elements.insert(element)
    }

    /// Returns `true` if the set holds the element.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Appends every element of `other`, in its order, skipping those already present.
    #[must_use]
    pub fn union(mut self, other: impl IntoIterator<Item = T>) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Hash + Eq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq> Eq for OrderedSet<T> {}

impl<T: Hash> Hash for OrderedSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let [k0, k1, k2, k3] = ELEMENT_HASH_SEEDS;
        let build = ahash::RandomState::with_seeds(k0, k1, k2, k3);
        // Commutative combination keeps the hash independent of insertion order.
        let combined = self
            .elements
            .iter()
            .fold(0u64, |acc, element| acc.wrapping_add(build.hash_one(element)));
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}
