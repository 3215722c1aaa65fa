//! Run-scoped hydrant pool with claim tracking.

use std::collections::HashSet;

use crate::resources::{Hydrant, HydrantId};

/// Hydrants available to one assignment run, plus the ids already handed out.
///
/// The pool borrows the caller's inventory and never outlives the run that built it.
#[derive(Debug)]
pub struct ResourcePool<'a> {
    hydrants: &'a [Hydrant],
    claimed: HashSet<HydrantId>,
}

impl<'a> ResourcePool<'a> {
    pub fn new(hydrants: &'a [Hydrant]) -> Self {
        Self {
            hydrants,
            claimed: HashSet::new(),
        }
    }

    /// Mark `hydrant` as taken. Returns `false` if its id was already claimed, in
    /// which case the pool is left unchanged.
    pub fn claim(&mut self, hydrant: &Hydrant) -> bool {
        self.claimed.insert(hydrant.id)
    }

    pub fn is_claimed(&self, id: &HydrantId) -> bool {
        self.claimed.contains(id)
    }

    pub fn claimed(&self) -> &HashSet<HydrantId> {
        &self.claimed
    }

    /// Unclaimed hydrants in inventory order.
    pub fn available(&self) -> impl Iterator<Item = &'a Hydrant> + '_ {
        self.hydrants
            .iter()
            .filter(move |hydrant| !self.claimed.contains(&hydrant.id))
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    /// Total hydrants in the inventory, claimed or not.
    pub fn len(&self) -> usize {
        self.hydrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hydrants.is_empty()
    }
}
