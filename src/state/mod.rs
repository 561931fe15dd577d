// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Versioned state containers.
//!
//! A [`StateComponent`] pairs a value with a monotonically increasing version
//! and a bounded changelog of change descriptions. Mutation is only possible
//! through [`StateComponent::update`], whose scope guard commits the version
//! bump and pending changes exactly once on disposal. Observers poll the
//! version and pull [`StateComponent::changes_since`] to reprocess only the
//! ids that were touched instead of rescanning the whole state.

pub mod components;

use std::collections::VecDeque;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::change::ChangeDescription;

/// Changelog entries kept per component. Observers that fall further behind
/// get a full-refresh signal instead of a merged description.
const CHANGELOG_CAP: usize = 64;

#[derive(Debug)]
pub struct StateComponent<T> {
    value: T,
    version: u64,
    changelog: VecDeque<(u64, ChangeDescription)>,
}

impl<T> StateComponent<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            changelog: VecDeque::new(),
        }
    }

    /// Read access. Mutation goes through [`Self::update`].
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Opens the sole authorized mutation handle. The returned scope derefs
    /// to the value; dropping it commits.
    pub fn update(&mut self) -> UpdateScope<'_, T> {
        UpdateScope {
            component: self,
            pending: ChangeDescription::new(),
        }
    }

    /// Merged changes between `observed` and the current version.
    ///
    /// Returns `Some(empty)` when the observer is current, and `None` when
    /// the gap is no longer covered by the changelog (log truncated, or the
    /// component was restored from a snapshot) — the observer must then do a
    /// full refresh.
    pub fn changes_since(&self, observed: u64) -> Option<ChangeDescription> {
        if observed > self.version {
            return None;
        }
        if observed == self.version {
            return Some(ChangeDescription::new());
        }

        let mut merged = ChangeDescription::new();
        let mut covered = observed;
        for (version, changes) in &self.changelog {
            if *version <= observed {
                continue;
            }
            if *version != covered + 1 {
                return None;
            }
            covered = *version;
            merged.merge(changes);
        }
        (covered == self.version).then(|| merged)
    }

    fn commit(&mut self, changes: ChangeDescription) {
        self.version += 1;
        self.changelog.push_back((self.version, changes));
        while self.changelog.len() > CHANGELOG_CAP {
            self.changelog.pop_front();
        }
    }

    /// Swaps the live value with a snapshot slot, bumping the version and
    /// invalidating the changelog so observers do a full refresh. Used by the
    /// undo engine; the swapped-out value becomes the redo snapshot.
    pub(crate) fn swap_restore(&mut self, slot: &mut T) {
        mem::swap(&mut self.value, slot);
        self.version += 1;
        self.changelog.clear();
    }
}

impl<T: Default> Default for StateComponent<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Scoped updater for a [`StateComponent`].
///
/// Scopes may nest across components within one handler; dispose in reverse
/// acquisition order (enforced by convention). If the thread is panicking
/// when the scope drops, nothing is committed and the last consistent version
/// is retained.
#[derive(Debug)]
pub struct UpdateScope<'a, T> {
    component: &'a mut StateComponent<T>,
    pending: ChangeDescription,
}

impl<T> UpdateScope<'_, T> {
    /// Merges a change description into the pending record flushed on drop.
    pub fn mark_updated(&mut self, changes: ChangeDescription) {
        self.pending.merge(&changes);
    }
}

impl<T> Deref for UpdateScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.component.value
    }
}

impl<T> DerefMut for UpdateScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.component.value
    }
}

impl<T> Drop for UpdateScope<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let pending = mem::take(&mut self.pending);
        self.component.commit(pending);
    }
}
