//! Resource-type enumeration and dense resource vectors
//!
//! The resource-type set is fixed when a system is created. Every vector
//! in the system is a dense `u64` array indexed by position in that set,
//! so component lookups are total functions: name resolution happens once
//! at the API boundary and an unknown name is rejected there.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use avert_errors::AllocationError;
use serde::{Deserialize, Serialize};

/// Immutable, ordered enumeration of resource type names
///
/// The ordering is the declaration order at system creation and defines
/// the component index of every [`ResourceVector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ResourceSet {
    /// Create a resource set from an ordered list of names
    ///
    /// Duplicate names collapse to the first occurrence; callers build
    /// the list from map keys, which are already unique.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Number of resource types
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Component index of a resource name, if it exists
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of the resource at a component index
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range for this set.
    #[must_use]
    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// All resource names in component order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Fixed-dimension, non-negative integer quantity per resource type
///
/// Quantities are `u64`, so negative values are unrepresentable; the
/// arithmetic below is checked or saturating, never wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceVector {
    values: Vec<u64>,
}

impl ResourceVector {
    /// All-zero vector with one component per resource type
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }

    /// Vector from raw components already in resource order
    #[must_use]
    pub fn from_values(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// Build a vector from a name-keyed map, resolving names against the
    /// resource set
    ///
    /// Names absent from the map default to zero. This is the only place
    /// defaulting happens; after construction every lookup is positional.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::UnknownResource`] if the map contains a
    /// name outside the resource set.
    pub fn from_map(
        set: &ResourceSet,
        map: &BTreeMap<String, u64>,
    ) -> Result<Self, AllocationError> {
        let mut values = vec![0; set.len()];
        for (name, amount) in map {
            let idx = set
                .index_of(name)
                .ok_or_else(|| AllocationError::UnknownResource { name: name.clone() })?;
            values[idx] = *amount;
        }
        Ok(Self { values })
    }

    /// Render the vector as a name-keyed map for reports
    #[must_use]
    pub fn to_map(&self, set: &ResourceSet) -> BTreeMap<String, u64> {
        set.names()
            .iter()
            .zip(&self.values)
            .map(|(name, amount)| (name.clone(), *amount))
            .collect()
    }

    /// Component at index, zero if out of range
    #[must_use]
    pub fn get(&self, idx: usize) -> u64 {
        self.values.get(idx).copied().unwrap_or(0)
    }

    /// Raw components in resource order
    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if every component is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Sum of all components
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Elementwise `self[r] <= bound[r]` for every resource
    #[must_use]
    pub fn fits_within(&self, bound: &Self) -> bool {
        self.values
            .iter()
            .zip(&bound.values)
            .all(|(a, b)| a <= b)
    }

    /// Index of the first component where `self[r] > bound[r]`
    #[must_use]
    pub fn first_excess(&self, bound: &Self) -> Option<usize> {
        self.values
            .iter()
            .zip(&bound.values)
            .position(|(a, b)| a > b)
    }

    /// Elementwise addition in place
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
    }

    /// Elementwise subtraction in place; returns `false` and leaves the
    /// vector untouched if any component would go negative
    pub fn checked_sub_assign(&mut self, other: &Self) -> bool {
        if !other.fits_within(self) {
            return false;
        }
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a -= b;
        }
        true
    }

    /// Elementwise subtraction clamped at zero
    #[must_use]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a.saturating_sub(*b))
                .collect(),
        }
    }

    /// Replace every component with zero, returning the previous values
    pub fn drain(&mut self) -> Self {
        let drained = self.clone();
        self.values.iter_mut().for_each(|v| *v = 0);
        drained
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ResourceSet {
        ResourceSet::new(vec!["CPU".to_string(), "Memory".to_string()])
    }

    fn map(cpu: u64, mem: u64) -> BTreeMap<String, u64> {
        BTreeMap::from([("CPU".to_string(), cpu), ("Memory".to_string(), mem)])
    }

    #[test]
    fn from_map_resolves_names() {
        let v = ResourceVector::from_map(&set(), &map(3, 7)).unwrap();
        assert_eq!(v.values(), &[3, 7]);
    }

    #[test]
    fn from_map_defaults_missing_names_to_zero() {
        let partial = BTreeMap::from([("Memory".to_string(), 4)]);
        let v = ResourceVector::from_map(&set(), &partial).unwrap();
        assert_eq!(v.values(), &[0, 4]);
    }

    #[test]
    fn from_map_rejects_unknown_names() {
        let bad = BTreeMap::from([("Disk".to_string(), 1)]);
        let err = ResourceVector::from_map(&set(), &bad).unwrap_err();
        assert_eq!(
            err,
            AllocationError::UnknownResource {
                name: "Disk".to_string()
            }
        );
    }

    #[test]
    fn fits_within_is_elementwise() {
        let s = set();
        let small = ResourceVector::from_map(&s, &map(2, 7)).unwrap();
        let big = ResourceVector::from_map(&s, &map(3, 7)).unwrap();
        assert!(small.fits_within(&big));
        assert!(!big.fits_within(&small));
        assert_eq!(big.first_excess(&small), Some(0));
        assert_eq!(small.first_excess(&big), None);
    }

    #[test]
    fn checked_sub_refuses_underflow() {
        let s = set();
        let mut v = ResourceVector::from_map(&s, &map(2, 3)).unwrap();
        let too_big = ResourceVector::from_map(&s, &map(3, 0)).unwrap();
        assert!(!v.checked_sub_assign(&too_big));
        assert_eq!(v.values(), &[2, 3]);

        let ok = ResourceVector::from_map(&s, &map(1, 3)).unwrap();
        assert!(v.checked_sub_assign(&ok));
        assert_eq!(v.values(), &[1, 0]);
    }

    #[test]
    fn drain_zeroes_and_returns_previous() {
        let s = set();
        let mut v = ResourceVector::from_map(&s, &map(2, 3)).unwrap();
        let drained = v.drain();
        assert_eq!(drained.values(), &[2, 3]);
        assert!(v.is_zero());
    }
}
