//! Canonical pet collection and its filtered view.
//!
//! # Design
//! `PetList` is an immutable value: every transition borrows the prior state
//! and returns the next one. The filtered view is never patched in place; it
//! is recomputed by `filter` from the canonical collection and the query on
//! every transition, so it is always a subset of the canonical collection in
//! canonical order.

use crate::error::SyncError;
use crate::types::Pet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetList {
    canonical: Vec<Pet>,
    filtered: Vec<Pet>,
    query: String,
}

impl PetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in the order the store returned or they were added.
    pub fn canonical(&self) -> &[Pet] {
        &self.canonical
    }

    /// Records matching the current query.
    pub fn filtered(&self) -> &[Pet] {
        &self.filtered
    }

    /// The current query, already case-folded.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Pet> {
        self.canonical.iter().find(|pet| pet.id == Some(id))
    }

    /// Replace the collection with `pets` and clear the query.
    pub fn loaded(&self, pets: Vec<Pet>) -> Self {
        Self::derive(pets, String::new())
    }

    pub fn searched(&self, query: &str) -> Self {
        Self::derive(self.canonical.clone(), query.to_lowercase())
    }

    /// Append a freshly created record.
    pub fn inserted(&self, pet: Pet) -> Result<Self, SyncError> {
        let id = pet.id.ok_or(SyncError::MissingId)?;
        if self.get(id).is_some() {
            return Err(SyncError::DuplicateId(id));
        }
        let mut canonical = self.canonical.clone();
        canonical.push(pet);
        Ok(Self::derive(canonical, self.query.clone()))
    }

    /// Replace the record with the same id. Unknown ids are an error, not an upsert.
    pub fn replaced(&self, pet: Pet) -> Result<Self, SyncError> {
        let id = pet.id.ok_or(SyncError::MissingId)?;
        let mut canonical = self.canonical.clone();
        let slot = canonical
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or(SyncError::UnknownRecord(id))?;
        *slot = pet;
        Ok(Self::derive(canonical, self.query.clone()))
    }

    /// Drop the record with `id`. Absent ids leave the collection as is.
    pub fn removed(&self, id: i64) -> Self {
        let canonical = self
            .canonical
            .iter()
            .filter(|pet| pet.id != Some(id))
            .cloned()
            .collect();
        Self::derive(canonical, self.query.clone())
    }

    fn derive(canonical: Vec<Pet>, query: String) -> Self {
        let filtered = filter(&canonical, &query);
        Self {
            canonical,
            filtered,
            query,
        }
    }
}

/// Records of `canonical` that match `query` (case-insensitive), in order.
/// An empty query matches everything.
pub fn filter(canonical: &[Pet], query: &str) -> Vec<Pet> {
    let needle = query.to_lowercase();
    canonical
        .iter()
        .filter(|pet| pet.matches(&needle))
        .cloned()
        .collect()
}
