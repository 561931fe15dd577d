// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Change tracking for model mutations.
//!
//! Every mutating graph operation records the ids it touched into a
//! [`ChangeDescription`]. Descriptions merge associatively (union of sets,
//! bitwise-OR of hints) so nested operations and multiple handlers in one
//! transaction compose into a single record observers can act on.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::model::ModelId;

/// Bitmask classifying what kind of change occurred on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChangeHints(u8);

impl ChangeHints {
    pub const NONE: Self = Self(0);
    /// Field values changed (name, data kind, selection membership, ...).
    pub const DATA: Self = Self(1);
    /// Canvas placement changed.
    pub const LAYOUT: Self = Self(1 << 1);
    /// Connectivity changed (wires attached, detached, or reordered).
    pub const TOPOLOGY: Self = Self(1 << 2);
    /// Group membership changed.
    pub const GROUPING: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ChangeHints {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeHints {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The record of which model ids a transaction created, changed, or deleted.
///
/// Recording keeps the three sets disjoint: a model created in this
/// transaction stays "new" even if later changed, and a deletion supersedes
/// both earlier records. Hints are kept only for changed models (creation and
/// deletion subsume every hint).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeDescription {
    new_models: BTreeSet<ModelId>,
    changed_models: BTreeSet<ModelId>,
    deleted_models: BTreeSet<ModelId>,
    hints: BTreeMap<ModelId, ChangeHints>,
}

impl ChangeDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.new_models.is_empty()
            && self.changed_models.is_empty()
            && self.deleted_models.is_empty()
    }

    pub fn new_models(&self) -> &BTreeSet<ModelId> {
        &self.new_models
    }

    pub fn changed_models(&self) -> &BTreeSet<ModelId> {
        &self.changed_models
    }

    pub fn deleted_models(&self) -> &BTreeSet<ModelId> {
        &self.deleted_models
    }

    /// Hints recorded for a changed model; `NONE` for everything else.
    pub fn hints_for(&self, id: ModelId) -> ChangeHints {
        self.hints.get(&id).copied().unwrap_or(ChangeHints::NONE)
    }

    pub fn record_new(&mut self, id: ModelId) {
        self.changed_models.remove(&id);
        self.deleted_models.remove(&id);
        self.hints.remove(&id);
        self.new_models.insert(id);
    }

    pub fn record_changed(&mut self, id: ModelId, hints: ChangeHints) {
        if self.new_models.contains(&id) || self.deleted_models.contains(&id) {
            return;
        }
        self.changed_models.insert(id);
        *self.hints.entry(id).or_default() |= hints;
    }

    pub fn record_deleted(&mut self, id: ModelId) {
        self.new_models.remove(&id);
        self.changed_models.remove(&id);
        self.hints.remove(&id);
        self.deleted_models.insert(id);
    }

    /// Replays `other` through the recording rules, preserving associativity.
    pub fn merge(&mut self, other: &ChangeDescription) {
        for &id in &other.new_models {
            self.record_new(id);
        }
        for &id in &other.changed_models {
            self.record_changed(id, other.hints_for(id));
        }
        for &id in &other.deleted_models {
            self.record_deleted(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeDescription, ChangeHints};
    use crate::model::ModelId;

    #[test]
    fn change_hints_combine_bitwise() {
        let hints = ChangeHints::DATA | ChangeHints::LAYOUT;
        assert!(hints.contains(ChangeHints::DATA));
        assert!(hints.contains(ChangeHints::LAYOUT));
        assert!(!hints.contains(ChangeHints::TOPOLOGY));
        assert!(ChangeHints::NONE.is_empty());
    }

    #[test]
    fn changed_after_new_stays_new() {
        let id = ModelId::fresh();
        let mut changes = ChangeDescription::new();
        changes.record_new(id);
        changes.record_changed(id, ChangeHints::LAYOUT);

        assert!(changes.new_models().contains(&id));
        assert!(!changes.changed_models().contains(&id));
        assert_eq!(changes.hints_for(id), ChangeHints::NONE);
    }

    #[test]
    fn deleted_supersedes_new_and_changed() {
        let id = ModelId::fresh();
        let mut changes = ChangeDescription::new();
        changes.record_new(id);
        changes.record_deleted(id);

        assert!(changes.deleted_models().contains(&id));
        assert!(!changes.new_models().contains(&id));

        let other = ModelId::fresh();
        changes.record_changed(other, ChangeHints::DATA);
        changes.record_deleted(other);
        assert!(!changes.changed_models().contains(&other));
        assert_eq!(changes.hints_for(other), ChangeHints::NONE);
    }

    #[test]
    fn merge_unions_sets_and_ors_hints() {
        let a_id = ModelId::fresh();
        let b_id = ModelId::fresh();

        let mut left = ChangeDescription::new();
        left.record_changed(a_id, ChangeHints::DATA);
        left.record_new(b_id);

        let mut right = ChangeDescription::new();
        right.record_changed(a_id, ChangeHints::TOPOLOGY);

        left.merge(&right);

        assert!(left.changed_models().contains(&a_id));
        assert_eq!(left.hints_for(a_id), ChangeHints::DATA | ChangeHints::TOPOLOGY);
        assert!(left.new_models().contains(&b_id));
    }

    #[test]
    fn merge_is_associative_for_delete_after_change() {
        let id = ModelId::fresh();

        let mut changed = ChangeDescription::new();
        changed.record_changed(id, ChangeHints::LAYOUT);
        let mut deleted = ChangeDescription::new();
        deleted.record_deleted(id);

        let mut left_first = changed.clone();
        left_first.merge(&deleted);

        let mut empty = ChangeDescription::new();
        let mut pair = changed;
        pair.merge(&deleted);
        empty.merge(&pair);

        assert_eq!(left_first, empty);
        assert!(left_first.deleted_models().contains(&id));
        assert!(!left_first.changed_models().contains(&id));
    }
}
