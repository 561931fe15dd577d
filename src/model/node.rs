// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::geometry::Position;
use super::ids::ModelId;

/// Declared flow direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
    None,
}

/// How many wires a port accepts.
///
/// A `Single` port never carries more than one wire; connecting a new wire
/// drops the previous one inside the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortCapacity {
    Single,
    Multi,
}

/// Blueprint for a port created together with its node.
///
/// Nested `sub_ports` become hierarchical child ports of the created port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDescription {
    pub name: SmolStr,
    pub direction: PortDirection,
    pub capacity: PortCapacity,
    pub data_kind: Option<SmolStr>,
    pub sub_ports: Vec<PortDescription>,
}

impl PortDescription {
    pub fn new(name: impl Into<SmolStr>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            capacity: PortCapacity::Multi,
            data_kind: None,
            sub_ports: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: PortCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_data_kind(mut self, data_kind: impl Into<SmolStr>) -> Self {
        self.data_kind = Some(data_kind.into());
        self
    }

    pub fn with_sub_ports(mut self, sub_ports: Vec<PortDescription>) -> Self {
        self.sub_ports = sub_ports;
        self
    }
}

/// A node on the canvas, owning an ordered list of top-level port ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    name: SmolStr,
    position: Position,
    ports: SmallVec<[ModelId; 4]>,
}

impl NodeModel {
    pub(crate) fn new(name: impl Into<SmolStr>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ports: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn ports(&self) -> &[ModelId] {
        &self.ports
    }

    pub(crate) fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn push_port(&mut self, port_id: ModelId) {
        self.ports.push(port_id);
    }

    pub(crate) fn detach_port(&mut self, port_id: ModelId) {
        self.ports.retain(|id| *id != port_id);
    }
}

/// A connection point owned by exactly one node.
///
/// Connected wire ids are kept in insertion order; reordering operations edit
/// this list in place. Sub-ports carry their parent's id so cascades can walk
/// the hierarchy in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortModel {
    name: SmolStr,
    node_id: ModelId,
    direction: PortDirection,
    capacity: PortCapacity,
    data_kind: Option<SmolStr>,
    parent_port_id: Option<ModelId>,
    sub_ports: SmallVec<[ModelId; 2]>,
    wires: SmallVec<[ModelId; 2]>,
}

impl PortModel {
    pub(crate) fn new(
        name: impl Into<SmolStr>,
        node_id: ModelId,
        direction: PortDirection,
        capacity: PortCapacity,
        data_kind: Option<SmolStr>,
        parent_port_id: Option<ModelId>,
    ) -> Self {
        Self {
            name: name.into(),
            node_id,
            direction,
            capacity,
            data_kind,
            parent_port_id,
            sub_ports: SmallVec::new(),
            wires: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_id(&self) -> ModelId {
        self.node_id
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn capacity(&self) -> PortCapacity {
        self.capacity
    }

    pub fn data_kind(&self) -> Option<&str> {
        self.data_kind.as_deref()
    }

    pub fn parent_port_id(&self) -> Option<ModelId> {
        self.parent_port_id
    }

    pub fn sub_ports(&self) -> &[ModelId] {
        &self.sub_ports
    }

    /// Connected wire ids, oldest first unless reordered.
    pub fn wires(&self) -> &[ModelId] {
        &self.wires
    }

    pub(crate) fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    pub(crate) fn push_sub_port(&mut self, port_id: ModelId) {
        self.sub_ports.push(port_id);
    }

    pub(crate) fn detach_sub_port(&mut self, port_id: ModelId) {
        self.sub_ports.retain(|id| *id != port_id);
    }

    pub(crate) fn attach_wire(&mut self, wire_id: ModelId) {
        self.wires.push(wire_id);
    }

    pub(crate) fn detach_wire(&mut self, wire_id: ModelId) {
        self.wires.retain(|id| *id != wire_id);
    }

    pub(crate) fn wires_mut(&mut self) -> &mut SmallVec<[ModelId; 2]> {
        &mut self.wires
    }
}
