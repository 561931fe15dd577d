// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot-based undo/redo.
//!
//! A handler opens an [`UndoTransaction`] before mutating, captures a deep
//! snapshot of every component it is about to touch, and the transaction
//! becomes one labelled entry on the linear [`UndoStack`] when it drops.
//! [`UndoTransaction::save_and_update`] couples the snapshot to the update
//! scope in a single call, so the default mutation path cannot forget to
//! snapshot. Restoring swaps snapshots with live values, which makes redo the
//! symmetric swap of undo.

use std::mem;

use smol_str::SmolStr;

use crate::model::GraphModel;
use crate::state::components::{AutoPlacementState, SelectionState, ViewState};
use crate::state::{StateComponent, UpdateScope};

/// A deep, immutable copy of one state component's value. No reference
/// sharing with live state: restoring is a value swap.
#[derive(Debug, Clone, PartialEq)]
pub enum StateSnapshot {
    Graph(GraphModel),
    Selection(SelectionState),
    View(ViewState),
    Placement(AutoPlacementState),
}

/// State values the undo engine can capture.
pub trait UndoableState: Clone {
    fn into_snapshot(self) -> StateSnapshot;
}

impl UndoableState for GraphModel {
    fn into_snapshot(self) -> StateSnapshot {
        StateSnapshot::Graph(self)
    }
}

impl UndoableState for SelectionState {
    fn into_snapshot(self) -> StateSnapshot {
        StateSnapshot::Selection(self)
    }
}

impl UndoableState for ViewState {
    fn into_snapshot(self) -> StateSnapshot {
        StateSnapshot::View(self)
    }
}

impl UndoableState for AutoPlacementState {
    fn into_snapshot(self) -> StateSnapshot {
        StateSnapshot::Placement(self)
    }
}

/// One host undo menu entry: a label plus the snapshots it restores.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    label: SmolStr,
    snapshots: Vec<StateSnapshot>,
}

impl UndoEntry {
    fn new(label: SmolStr) -> Self {
        Self {
            label,
            snapshots: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn snapshots(&self) -> &[StateSnapshot] {
        &self.snapshots
    }

    pub(crate) fn snapshots_mut(&mut self) -> &mut [StateSnapshot] {
        &mut self.snapshots
    }

    fn captures_component_of(&self, snapshot: &StateSnapshot) -> bool {
        self.snapshots
            .iter()
            .any(|existing| mem::discriminant(existing) == mem::discriminant(snapshot))
    }

    fn push(&mut self, snapshot: StateSnapshot) {
        if !self.captures_component_of(&snapshot) {
            self.snapshots.push(snapshot);
        }
    }
}

/// Linear undo history with a cursor.
///
/// Entries before the cursor are undoable, entries at and after it are
/// redoable. Pushing a new entry truncates the redo tail.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
    cursor: usize,
    merging: bool,
    merge_target: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a transaction for the next undoable command. The entry lands on
    /// the stack when the transaction drops, if anything was saved.
    pub fn begin(&mut self, label: impl Into<SmolStr>) -> UndoTransaction<'_> {
        UndoTransaction {
            stack: self,
            entry: Some(UndoEntry::new(label.into())),
        }
    }

    pub fn entries(&self) -> &[UndoEntry] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Coalesces every entry pushed until [`Self::end_merge`] into one entry
    /// (drag streams). The first snapshot per component wins.
    pub fn begin_merge(&mut self) {
        self.merging = true;
        self.merge_target = None;
    }

    pub fn end_merge(&mut self) {
        self.merging = false;
        self.merge_target = None;
    }

    /// Drops every entry at and after `index` (graph-loading navigation).
    pub fn truncate_history(&mut self, index: usize) {
        self.entries.truncate(index);
        self.cursor = self.cursor.min(self.entries.len());
        self.merge_target = None;
    }

    /// Drops the whole history (graph load/unload).
    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.merge_target = None;
    }

    pub(crate) fn undo_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    pub(crate) fn redo_index(&self) -> Option<usize> {
        self.can_redo().then(|| self.cursor)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut UndoEntry> {
        self.entries.get_mut(index)
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.entries.len());
    }

    fn push_entry(&mut self, entry: UndoEntry) {
        self.entries.truncate(self.cursor);

        if self.merging {
            if let Some(target) = self.merge_target.filter(|target| *target < self.entries.len()) {
                let existing = &mut self.entries[target];
                for snapshot in entry.snapshots {
                    existing.push(snapshot);
                }
                return;
            }
        }

        self.entries.push(entry);
        self.cursor = self.entries.len();
        if self.merging {
            self.merge_target = Some(self.cursor - 1);
        }
    }
}

/// Pending undo entry for one command.
///
/// Save every component you are about to mutate before opening its update
/// scope — or use [`Self::save_and_update`], which does both and cannot be
/// used in the wrong order.
#[derive(Debug)]
pub struct UndoTransaction<'a> {
    stack: &'a mut UndoStack,
    entry: Option<UndoEntry>,
}

impl UndoTransaction<'_> {
    /// Captures a deep snapshot of the component's current value. Repeated
    /// saves of the same component within one transaction are ignored, so the
    /// pre-mutation value is the one that sticks.
    pub fn save<T: UndoableState>(&mut self, component: &StateComponent<T>) {
        if let Some(entry) = self.entry.as_mut() {
            entry.push(component.value().clone().into_snapshot());
        }
    }

    /// Snapshot, then open the component's update scope.
    pub fn save_and_update<'c, T: UndoableState>(
        &mut self,
        component: &'c mut StateComponent<T>,
    ) -> UpdateScope<'c, T> {
        self.save(component);
        component.update()
    }
}

impl Drop for UndoTransaction<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(entry) = self.entry.take() {
            if !entry.snapshots.is_empty() {
                self.stack.push_entry(entry);
            }
        }
    }
}
