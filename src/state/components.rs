// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The concrete state slices of an editor session, and the [`EditorState`]
//! aggregate that command handlers receive.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{GraphModel, ModelId, Position, Vector};
use crate::undo::{StateSnapshot, UndoStack};

use super::StateComponent;

/// The set of currently selected element ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: BTreeSet<ModelId>,
}

impl SelectionState {
    pub fn selected(&self) -> &BTreeSet<ModelId> {
        &self.selected
    }

    pub fn is_selected(&self, id: ModelId) -> bool {
        self.selected.contains(&id)
    }

    /// Returns true if the id was newly selected.
    pub fn select(&mut self, id: ModelId) -> bool {
        self.selected.insert(id)
    }

    /// Returns true if the id was selected before.
    pub fn deselect(&mut self, id: ModelId) -> bool {
        self.selected.remove(&id)
    }

    /// Returns true if the id is selected afterwards.
    pub fn toggle(&mut self, id: ModelId) -> bool {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
            return true;
        }
        false
    }

    pub fn clear(&mut self) -> BTreeSet<ModelId> {
        std::mem::take(&mut self.selected)
    }
}

/// A provisional wire endpoint followed by the pointer while a connection is
/// being dragged. Never part of the committed graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostWire {
    pub from_port_id: ModelId,
    pub end_position: Position,
}

/// Viewport pan/zoom plus transient drag feedback for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pan: Position,
    zoom: f64,
    ghost_wire: Option<GhostWire>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan: Position::ORIGIN,
            zoom: 1.0,
            ghost_wire: None,
        }
    }
}

impl ViewState {
    pub fn pan(&self) -> Position {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn ghost_wire(&self) -> Option<&GhostWire> {
        self.ghost_wire.as_ref()
    }

    pub fn set_pan(&mut self, pan: Position) {
        self.pan = pan;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.max(0.01);
    }

    pub fn set_ghost_wire(&mut self, ghost_wire: Option<GhostWire>) {
        self.ghost_wire = ghost_wire;
    }
}

/// Where the next element created without an explicit position lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPlacementState {
    next_slot: Position,
    stride: Vector,
}

impl Default for AutoPlacementState {
    fn default() -> Self {
        Self {
            next_slot: Position::ORIGIN,
            stride: Vector::new(40.0, 40.0),
        }
    }
}

impl AutoPlacementState {
    pub fn next_slot(&self) -> Position {
        self.next_slot
    }

    /// Consumes the current slot and advances by the stride.
    pub fn take_slot(&mut self) -> Position {
        let slot = self.next_slot;
        self.next_slot = slot + self.stride;
        slot
    }

    pub fn reset(&mut self, origin: Position) {
        self.next_slot = origin;
    }
}

/// Every state component of one editor session, plus its undo stack.
///
/// Created once at session start; handlers receive it mutably and reach the
/// individual components as fields so borrows stay disjoint.
#[derive(Debug, Default)]
pub struct EditorState {
    pub graph: StateComponent<GraphModel>,
    pub selection: StateComponent<SelectionState>,
    pub view: StateComponent<ViewState>,
    pub placement: StateComponent<AutoPlacementState>,
    pub undo_stack: UndoStack,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops (or, for redo, re-applies) the most recent undo entry, restoring
    /// every captured component. Returns false when there is nothing to do.
    ///
    /// Restoration swaps the live value with the stored snapshot, so the same
    /// entry serves both directions.
    pub fn undo(&mut self, is_redo: bool) -> bool {
        let index = if is_redo {
            self.undo_stack.redo_index()
        } else {
            self.undo_stack.undo_index()
        };
        let Some(index) = index else {
            return false;
        };

        let Some(entry) = self.undo_stack.entry_mut(index) else {
            return false;
        };
        for snapshot in entry.snapshots_mut() {
            match snapshot {
                StateSnapshot::Graph(value) => self.graph.swap_restore(value),
                StateSnapshot::Selection(value) => self.selection.swap_restore(value),
                StateSnapshot::View(value) => self.view.swap_restore(value),
                StateSnapshot::Placement(value) => self.placement.swap_restore(value),
            }
        }

        self.undo_stack
            .set_cursor(if is_redo { index + 1 } else { index });
        true
    }
}
