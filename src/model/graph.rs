// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The owning store of all node/port/wire/group/placemat identities.
//!
//! Elements live in one arena keyed by [`ModelId`]; relations are explicit id
//! lists, so deletion is "remove from arena + scrub referencing relations".
//! Every mutating operation validates first, then edits, and records the ids
//! it touched into the caller's [`ChangeDescription`] accumulator — nested
//! operations append to the same accumulator passed down the call chain.
//! Invalid operations mutate nothing and record nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::change::{ChangeDescription, ChangeHints};

use super::geometry::{Position, Vector};
use super::group::{GroupModel, PlacematModel};
use super::ids::ModelId;
use super::node::{NodeModel, PortCapacity, PortDescription, PortDirection, PortModel};
use super::wire::{ReorderType, WireModel};

/// One arena slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Node(NodeModel),
    Port(PortModel),
    Wire(WireModel),
    Group(GroupModel),
    Placemat(PlacematModel),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Port(_) => ElementKind::Port,
            Self::Wire(_) => ElementKind::Wire,
            Self::Group(_) => ElementKind::Group,
            Self::Placemat(_) => ElementKind::Placemat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Port,
    Wire,
    Group,
    Placemat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompatibleReason {
    Direction,
    DataKind,
}

impl fmt::Display for IncompatibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direction => f.write_str("directions do not connect"),
            Self::DataKind => f.write_str("data kinds differ"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    NodeNotFound { node_id: ModelId },
    PortNotFound { port_id: ModelId },
    WireNotFound { wire_id: ModelId },
    ElementNotFound { element_id: ModelId },
    IncompatiblePorts {
        from_port_id: ModelId,
        to_port_id: ModelId,
        reason: IncompatibleReason,
    },
    DuplicateWire {
        from_port_id: ModelId,
        to_port_id: ModelId,
    },
    UnsupportedElement {
        element_id: ModelId,
        kind: ElementKind,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::PortNotFound { port_id } => write!(f, "port not found (id={port_id})"),
            Self::WireNotFound { wire_id } => write!(f, "wire not found (id={wire_id})"),
            Self::ElementNotFound { element_id } => {
                write!(f, "element not found (id={element_id})")
            }
            Self::IncompatiblePorts {
                from_port_id,
                to_port_id,
                reason,
            } => write!(
                f,
                "ports cannot connect (from={from_port_id}, to={to_port_id}): {reason}"
            ),
            Self::DuplicateWire {
                from_port_id,
                to_port_id,
            } => write!(
                f,
                "wire already exists (from={from_port_id}, to={to_port_id})"
            ),
            Self::UnsupportedElement { element_id, kind } => {
                write!(f, "operation does not apply to {kind:?} (id={element_id})")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// The mutable graph: sole owner of element identity and adjacency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    elements: BTreeMap<ModelId, Element>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element_kind(&self, id: ModelId) -> Option<ElementKind> {
        self.elements.get(&id).map(Element::kind)
    }

    pub fn node(&self, id: ModelId) -> Option<&NodeModel> {
        match self.elements.get(&id) {
            Some(Element::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn port(&self, id: ModelId) -> Option<&PortModel> {
        match self.elements.get(&id) {
            Some(Element::Port(port)) => Some(port),
            _ => None,
        }
    }

    pub fn wire(&self, id: ModelId) -> Option<&WireModel> {
        match self.elements.get(&id) {
            Some(Element::Wire(wire)) => Some(wire),
            _ => None,
        }
    }

    pub fn group(&self, id: ModelId) -> Option<&GroupModel> {
        match self.elements.get(&id) {
            Some(Element::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn placemat(&self, id: ModelId) -> Option<&PlacematModel> {
        match self.elements.get(&id) {
            Some(Element::Placemat(placemat)) => Some(placemat),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = (ModelId, &NodeModel)> + '_ {
        self.elements.iter().filter_map(|(id, element)| match element {
            Element::Node(node) => Some((*id, node)),
            _ => None,
        })
    }

    pub fn wires(&self) -> impl Iterator<Item = (ModelId, &WireModel)> + '_ {
        self.elements.iter().filter_map(|(id, element)| match element {
            Element::Wire(wire) => Some((*id, wire)),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = (ModelId, &GroupModel)> + '_ {
        self.elements.iter().filter_map(|(id, element)| match element {
            Element::Group(group) => Some((*id, group)),
            _ => None,
        })
    }

    fn node_mut(&mut self, id: ModelId) -> Option<&mut NodeModel> {
        match self.elements.get_mut(&id) {
            Some(Element::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn port_mut(&mut self, id: ModelId) -> Option<&mut PortModel> {
        match self.elements.get_mut(&id) {
            Some(Element::Port(port)) => Some(port),
            _ => None,
        }
    }

    fn group_mut(&mut self, id: ModelId) -> Option<&mut GroupModel> {
        match self.elements.get_mut(&id) {
            Some(Element::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Top-level and nested port ids of a node, parents before children.
    pub fn ports_of_node(&self, node_id: ModelId) -> Vec<ModelId> {
        let mut out = BTreeSet::new();
        if let Some(node) = self.node(node_id) {
            for &port_id in node.ports() {
                self.collect_port_tree(port_id, &mut out);
            }
        }
        out.into_iter().collect()
    }

    fn collect_port_tree(&self, port_id: ModelId, out: &mut BTreeSet<ModelId>) {
        let Some(port) = self.port(port_id) else {
            return;
        };
        if !out.insert(port_id) {
            return;
        }
        for &sub_port_id in port.sub_ports() {
            self.collect_port_tree(sub_port_id, out);
        }
    }

    /// Ids of wires touching the node's ports (and sub-ports), optionally
    /// restricted to ports with an exact declared direction.
    pub fn wires_on_node(
        &self,
        node_id: ModelId,
        direction: Option<PortDirection>,
    ) -> BTreeSet<ModelId> {
        let mut out = BTreeSet::new();
        for port_id in self.ports_of_node(node_id) {
            let Some(port) = self.port(port_id) else {
                continue;
            };
            if let Some(direction) = direction {
                if port.direction() != direction {
                    continue;
                }
            }
            out.extend(port.wires().iter().copied());
        }
        out
    }

    /// Creates a node with its declared ports (and nested sub-ports).
    pub fn create_node(
        &mut self,
        name: impl Into<SmolStr>,
        position: Position,
        ports: &[PortDescription],
        changes: &mut ChangeDescription,
    ) -> ModelId {
        let node_id = ModelId::fresh();
        self.elements
            .insert(node_id, Element::Node(NodeModel::new(name, position)));
        changes.record_new(node_id);
        for description in ports {
            self.create_port(node_id, None, description, changes);
        }
        node_id
    }

    fn create_port(
        &mut self,
        node_id: ModelId,
        parent_port_id: Option<ModelId>,
        description: &PortDescription,
        changes: &mut ChangeDescription,
    ) -> ModelId {
        let port_id = ModelId::fresh();
        let port = PortModel::new(
            description.name.clone(),
            node_id,
            description.direction,
            description.capacity,
            description.data_kind.clone(),
            parent_port_id,
        );
        self.elements.insert(port_id, Element::Port(port));
        changes.record_new(port_id);

        match parent_port_id {
            Some(parent_id) => {
                if let Some(parent) = self.port_mut(parent_id) {
                    parent.push_sub_port(port_id);
                }
            }
            None => {
                if let Some(node) = self.node_mut(node_id) {
                    node.push_port(port_id);
                }
            }
        }

        for sub_description in &description.sub_ports {
            self.create_port(node_id, Some(port_id), sub_description, changes);
        }
        port_id
    }

    /// Checks whether a wire from `from_port` (output side) to `to_port`
    /// (input side) would be accepted, without mutating anything.
    pub fn can_create_wire(&self, to_port: ModelId, from_port: ModelId) -> Result<(), GraphError> {
        let to = self
            .port(to_port)
            .ok_or(GraphError::PortNotFound { port_id: to_port })?;
        let from = self
            .port(from_port)
            .ok_or(GraphError::PortNotFound { port_id: from_port })?;

        let incompatible = |reason| GraphError::IncompatiblePorts {
            from_port_id: from_port,
            to_port_id: to_port,
            reason,
        };

        // An undirected port connects on either side.
        if from.direction() == PortDirection::Input || to.direction() == PortDirection::Output {
            return Err(incompatible(IncompatibleReason::Direction));
        }
        if let (Some(from_kind), Some(to_kind)) = (from.data_kind(), to.data_kind()) {
            if from_kind != to_kind {
                return Err(incompatible(IncompatibleReason::DataKind));
            }
        }

        let already_wired = to.wires().iter().any(|&wire_id| {
            self.wire(wire_id)
                .map(|wire| wire.from_port_id() == from_port)
                .unwrap_or(false)
        });
        if already_wired {
            return Err(GraphError::DuplicateWire {
                from_port_id: from_port,
                to_port_id: to_port,
            });
        }
        Ok(())
    }

    /// Connects two ports. Single-capacity endpoints drop their previous wire
    /// inside the same transaction; the drop is recorded as a deletion.
    pub fn create_wire(
        &mut self,
        to_port: ModelId,
        from_port: ModelId,
        changes: &mut ChangeDescription,
    ) -> Result<ModelId, GraphError> {
        self.can_create_wire(to_port, from_port)?;

        let mut displaced = BTreeSet::new();
        for port_id in [to_port, from_port] {
            let Some(port) = self.port(port_id) else {
                continue;
            };
            if port.capacity() == PortCapacity::Single {
                displaced.extend(port.wires().iter().copied());
            }
        }
        let displaced: Vec<ModelId> = displaced.into_iter().collect();
        self.delete_wires(&displaced, changes);

        let wire_id = ModelId::fresh();
        self.elements
            .insert(wire_id, Element::Wire(WireModel::new(from_port, to_port)));
        if let Some(port) = self.port_mut(from_port) {
            port.attach_wire(wire_id);
        }
        // A self-loop has one endpoint; attach once.
        if to_port != from_port {
            if let Some(port) = self.port_mut(to_port) {
                port.attach_wire(wire_id);
            }
        }
        changes.record_new(wire_id);
        changes.record_changed(from_port, ChangeHints::TOPOLOGY);
        changes.record_changed(to_port, ChangeHints::TOPOLOGY);
        Ok(wire_id)
    }

    /// Removes wires and detaches them from surviving endpoints. Unknown ids
    /// are skipped per item.
    pub fn delete_wires(&mut self, wire_ids: &[ModelId], changes: &mut ChangeDescription) {
        for &wire_id in wire_ids {
            let Some(wire) = self.wire(wire_id) else {
                continue;
            };
            let from_port_id = wire.from_port_id();
            let to_port_id = wire.to_port_id();
            self.elements.remove(&wire_id);
            for port_id in [from_port_id, to_port_id] {
                if let Some(port) = self.port_mut(port_id) {
                    port.detach_wire(wire_id);
                    changes.record_changed(port_id, ChangeHints::TOPOLOGY);
                }
            }
            changes.record_deleted(wire_id);
        }
    }

    /// Deletes elements, cascading: nodes expand to their ports and sub-ports,
    /// every wire touching a deleted port goes with it, and deleted ids are
    /// scrubbed from surviving group member lists. Groups delete only
    /// themselves; their members survive. Unknown ids are skipped per item.
    pub fn delete_elements(&mut self, element_ids: &[ModelId], changes: &mut ChangeDescription) {
        let mut doomed_nodes = BTreeSet::new();
        let mut doomed_ports = BTreeSet::new();
        let mut doomed_wires = BTreeSet::new();
        let mut doomed_groups = BTreeSet::new();
        let mut doomed_placemats = BTreeSet::new();

        for &id in element_ids {
            match self.element_kind(id) {
                Some(ElementKind::Node) => {
                    doomed_nodes.insert(id);
                    doomed_ports.extend(self.ports_of_node(id));
                }
                Some(ElementKind::Port) => self.collect_port_tree(id, &mut doomed_ports),
                Some(ElementKind::Wire) => {
                    doomed_wires.insert(id);
                }
                Some(ElementKind::Group) => {
                    doomed_groups.insert(id);
                }
                Some(ElementKind::Placemat) => {
                    doomed_placemats.insert(id);
                }
                None => {}
            }
        }

        for &port_id in &doomed_ports {
            if let Some(port) = self.port(port_id) {
                doomed_wires.extend(port.wires().iter().copied());
            }
        }

        let wire_ids: Vec<ModelId> = doomed_wires.iter().copied().collect();
        self.delete_wires(&wire_ids, changes);

        for &port_id in &doomed_ports {
            let Some(port) = self.port(port_id) else {
                continue;
            };
            let node_id = port.node_id();
            let parent_port_id = port.parent_port_id();

            if !doomed_nodes.contains(&node_id) {
                match parent_port_id {
                    Some(parent_id) if !doomed_ports.contains(&parent_id) => {
                        if let Some(parent) = self.port_mut(parent_id) {
                            parent.detach_sub_port(port_id);
                            changes.record_changed(parent_id, ChangeHints::TOPOLOGY);
                        }
                    }
                    None => {
                        if let Some(node) = self.node_mut(node_id) {
                            node.detach_port(port_id);
                            changes.record_changed(node_id, ChangeHints::TOPOLOGY);
                        }
                    }
                    Some(_) => {}
                }
            }
            self.elements.remove(&port_id);
            changes.record_deleted(port_id);
        }

        for set in [&doomed_nodes, &doomed_groups, &doomed_placemats] {
            for &id in set {
                self.elements.remove(&id);
                changes.record_deleted(id);
            }
        }

        let mut removed = BTreeSet::new();
        removed.extend(doomed_nodes);
        removed.extend(doomed_ports);
        removed.extend(wire_ids);
        removed.extend(doomed_groups);
        removed.extend(doomed_placemats);
        self.scrub_group_members(&removed, changes);
    }

    fn scrub_group_members(&mut self, removed: &BTreeSet<ModelId>, changes: &mut ChangeDescription) {
        let group_ids: Vec<ModelId> = self.groups().map(|(id, _)| id).collect();
        for group_id in group_ids {
            let Some(group) = self.group_mut(group_id) else {
                continue;
            };
            let mut scrubbed = false;
            for &id in removed {
                scrubbed |= group.remove_member(id);
            }
            if scrubbed {
                changes.record_changed(group_id, ChangeHints::GROUPING);
            }
        }
    }

    /// Creates a group over the given members. Unknown ids and nested groups
    /// are skipped per item.
    pub fn create_group(
        &mut self,
        name: impl Into<SmolStr>,
        member_ids: &[ModelId],
        changes: &mut ChangeDescription,
    ) -> ModelId {
        let group_id = ModelId::fresh();
        let mut group = GroupModel::new(name);
        for &id in member_ids {
            match self.element_kind(id) {
                Some(ElementKind::Group) | None => continue,
                Some(_) => {
                    group.push_member(id);
                    changes.record_changed(id, ChangeHints::GROUPING);
                }
            }
        }
        self.elements.insert(group_id, Element::Group(group));
        changes.record_new(group_id);
        group_id
    }

    /// Adds members to an existing group. Unknown ids, nested groups, and
    /// existing members are skipped per item.
    pub fn add_to_group(
        &mut self,
        group_id: ModelId,
        member_ids: &[ModelId],
        changes: &mut ChangeDescription,
    ) -> Result<(), GraphError> {
        if self.group(group_id).is_none() {
            return Err(GraphError::ElementNotFound {
                element_id: group_id,
            });
        }

        let mut grew = false;
        for &id in member_ids {
            match self.element_kind(id) {
                Some(ElementKind::Group) | None => continue,
                Some(_) => {}
            }
            let Some(group) = self.group_mut(group_id) else {
                break;
            };
            if group.contains(id) {
                continue;
            }
            group.push_member(id);
            changes.record_changed(id, ChangeHints::GROUPING);
            grew = true;
        }
        if grew {
            changes.record_changed(group_id, ChangeHints::GROUPING);
        }
        Ok(())
    }

    pub fn create_placemat(
        &mut self,
        title: impl Into<SmolStr>,
        position: Position,
        changes: &mut ChangeDescription,
    ) -> ModelId {
        let placemat_id = ModelId::fresh();
        self.elements.insert(
            placemat_id,
            Element::Placemat(PlacematModel::new(title, position)),
        );
        changes.record_new(placemat_id);
        placemat_id
    }

    /// Places a node or placemat at an absolute position.
    pub fn set_element_position(
        &mut self,
        element_id: ModelId,
        position: Position,
        changes: &mut ChangeDescription,
    ) -> Result<(), GraphError> {
        match self.elements.get_mut(&element_id) {
            Some(Element::Node(node)) => node.set_position(position),
            Some(Element::Placemat(placemat)) => placemat.set_position(position),
            Some(other) => {
                return Err(GraphError::UnsupportedElement {
                    element_id,
                    kind: other.kind(),
                })
            }
            None => return Err(GraphError::ElementNotFound { element_id }),
        }
        changes.record_changed(element_id, ChangeHints::LAYOUT);
        Ok(())
    }

    /// Moves a node or placemat by a delta.
    pub fn translate_element(
        &mut self,
        element_id: ModelId,
        delta: Vector,
        changes: &mut ChangeDescription,
    ) -> Result<(), GraphError> {
        match self.elements.get_mut(&element_id) {
            Some(Element::Node(node)) => {
                let moved = node.position() + delta;
                node.set_position(moved);
            }
            Some(Element::Placemat(placemat)) => {
                let moved = placemat.position() + delta;
                placemat.set_position(moved);
            }
            Some(other) => {
                return Err(GraphError::UnsupportedElement {
                    element_id,
                    kind: other.kind(),
                })
            }
            None => return Err(GraphError::ElementNotFound { element_id }),
        }
        changes.record_changed(element_id, ChangeHints::LAYOUT);
        Ok(())
    }

    /// Renames a node, port, or group, or retitles a placemat.
    pub fn rename_element(
        &mut self,
        element_id: ModelId,
        name: impl Into<SmolStr>,
        changes: &mut ChangeDescription,
    ) -> Result<(), GraphError> {
        match self.elements.get_mut(&element_id) {
            Some(Element::Node(node)) => node.set_name(name),
            Some(Element::Port(port)) => port.set_name(name),
            Some(Element::Group(group)) => group.set_name(name),
            Some(Element::Placemat(placemat)) => placemat.set_title(name),
            Some(other @ Element::Wire(_)) => {
                return Err(GraphError::UnsupportedElement {
                    element_id,
                    kind: other.kind(),
                })
            }
            None => return Err(GraphError::ElementNotFound { element_id }),
        }
        changes.record_changed(element_id, ChangeHints::DATA);
        Ok(())
    }

    /// Repositions wires on their from-port's ordered wire list. Best-effort
    /// per wire: unknown ids and already-positioned wires are skipped.
    pub fn reorder_wires(
        &mut self,
        wire_ids: &[ModelId],
        order: ReorderType,
        changes: &mut ChangeDescription,
    ) {
        for &wire_id in wire_ids {
            let Some(wire) = self.wire(wire_id) else {
                continue;
            };
            let from_port_id = wire.from_port_id();
            let Some(port) = self.port_mut(from_port_id) else {
                continue;
            };
            let list = port.wires_mut();
            let Some(index) = list.iter().position(|id| *id == wire_id) else {
                continue;
            };
            let last = list.len() - 1;
            let target = match order {
                ReorderType::MoveFirst => 0,
                ReorderType::MoveUp => index.saturating_sub(1),
                ReorderType::MoveDown => (index + 1).min(last),
                ReorderType::MoveLast => last,
            };
            if target == index {
                continue;
            }
            let id = list.remove(index);
            list.insert(target, id);
            changes.record_changed(wire_id, ChangeHints::TOPOLOGY);
            changes.record_changed(from_port_id, ChangeHints::TOPOLOGY);
        }
    }
}
