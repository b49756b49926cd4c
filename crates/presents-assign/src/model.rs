use std::collections::{BTreeMap, BTreeSet};

use presents_core::{AdultId, ChildId};
use serde::{Deserialize, Serialize};

/// Options for the assignment engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOptions {
    /// Seed for the random draw; a fresh one is picked when absent.
    pub seed: Option<u64>,
    /// Maximum greedy passes per matcher before giving up.
    pub max_attempts: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: 10_000,
        }
    }
}

/// A matcher result with the number of greedy passes it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched<T> {
    pub assignment: T,
    pub attempts: u32,
}

/// One-to-one adult assignment, giver to receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdultAssignment {
    receivers: BTreeMap<AdultId, AdultId>,
}

impl AdultAssignment {
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn receiver_of(&self, giver: AdultId) -> Option<AdultId> {
        self.receivers.get(&giver).copied()
    }

    /// Pairs in giver declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AdultId, AdultId)> {
        self.receivers
            .iter()
            .map(|(giver, receiver)| (*giver, *receiver))
    }
}

impl FromIterator<(AdultId, AdultId)> for AdultAssignment {
    fn from_iter<I: IntoIterator<Item = (AdultId, AdultId)>>(iter: I) -> Self {
        Self {
            receivers: iter.into_iter().collect(),
        }
    }
}

/// One-to-many adult to children assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildAssignment {
    receivers: BTreeMap<AdultId, BTreeSet<ChildId>>,
}

impl ChildAssignment {
    pub(crate) fn assigned_count(&self, giver: AdultId) -> usize {
        self.receivers.get(&giver).map_or(0, BTreeSet::len)
    }

    pub(crate) fn assign(&mut self, giver: AdultId, child: ChildId) {
        self.receivers.entry(giver).or_default().insert(child);
    }

    /// Number of givers with at least one child.
    pub fn giver_count(&self) -> usize {
        self.receivers.len()
    }

    /// Total number of assigned children.
    pub fn child_count(&self) -> usize {
        self.receivers.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn receivers_of(&self, giver: AdultId) -> Option<&BTreeSet<ChildId>> {
        self.receivers.get(&giver)
    }

    /// Givers in declaration order with their children.
    pub fn iter(&self) -> impl Iterator<Item = (AdultId, &BTreeSet<ChildId>)> {
        self.receivers
            .iter()
            .map(|(giver, children)| (*giver, children))
    }
}

impl FromIterator<(AdultId, ChildId)> for ChildAssignment {
    fn from_iter<I: IntoIterator<Item = (AdultId, ChildId)>>(iter: I) -> Self {
        let mut assignment = Self::default();
        for (giver, child) in iter {
            assignment.assign(giver, child);
        }
        assignment
    }
}

/// Summary of an assignment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub seed: u64,
    pub capacity: usize,
    pub adult_attempts: u32,
    pub child_attempts: u32,
    pub duration_ms: u64,
}
