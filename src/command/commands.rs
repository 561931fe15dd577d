// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::model::{ModelId, PortDescription, Position, ReorderType, Vector};
use crate::state::components::GhostWire;

use super::Command;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateNodeCommand {
    pub name: SmolStr,
    /// `None` takes the next auto-placement slot.
    pub position: Option<Position>,
    pub ports: Vec<PortDescription>,
}

impl Command for CreateNodeCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Create Node")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateWireCommand {
    pub to_port_id: ModelId,
    pub from_port_id: ModelId,
}

impl Command for CreateWireCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Create Wire")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteElementsCommand {
    pub element_ids: Vec<ModelId>,
}

impl Command for DeleteElementsCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Delete")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveElementsCommand {
    pub element_ids: Vec<ModelId>,
    pub delta: Vector,
}

impl Command for MoveElementsCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Move")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderWiresCommand {
    pub wire_ids: Vec<ModelId>,
    pub order: ReorderType,
}

impl Command for ReorderWiresCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Reorder Wire")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameElementCommand {
    pub element_id: ModelId,
    pub name: SmolStr,
}

impl Command for RenameElementCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Rename")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupCommand {
    pub name: SmolStr,
    pub member_ids: Vec<ModelId>,
}

impl Command for CreateGroupCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Create Group")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlacematCommand {
    pub title: SmolStr,
    pub position: Position,
}

impl Command for CreatePlacematCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Create Placemat")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Replace,
    Add,
    Remove,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectElementsCommand {
    pub element_ids: Vec<ModelId>,
    pub mode: SelectionMode,
}

impl Command for SelectElementsCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Select")
    }
}

/// Reconnects each node's single incoming source to the node's outgoing
/// destinations, then deletes the node. Best-effort per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassNodesCommand {
    pub node_ids: Vec<ModelId>,
}

impl Command for BypassNodesCommand {
    fn undo_label(&self) -> Option<&str> {
        Some("Bypass")
    }
}

/// View-state only; not undoable. Also the compensating command a cancelled
/// manipulator issues to restore the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ReframeViewCommand {
    pub pan: Position,
    pub zoom: f64,
    pub ghost_wire: Option<GhostWire>,
}

impl Command for ReframeViewCommand {}
