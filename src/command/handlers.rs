// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The built-in command handlers.
//!
//! Every handler validates its preconditions before opening any scope:
//! routine invalid user input (unknown ids, incompatible ports, nothing to
//! do) is a logged warning and a clean no-op — no mutation, no undo entry.
//! Mutation then runs under an undo transaction whose `save_and_update`
//! couples the snapshot to the update scope.

use std::collections::BTreeSet;

use crate::change::{ChangeDescription, ChangeHints};
use crate::model::{ElementKind, GraphModel, ModelId, PortDirection};
use crate::state::components::EditorState;

use super::commands::{
    BypassNodesCommand, CreateGroupCommand, CreateNodeCommand, CreatePlacematCommand,
    CreateWireCommand, DeleteElementsCommand, MoveElementsCommand, ReframeViewCommand,
    RenameElementCommand, ReorderWiresCommand, SelectElementsCommand, SelectionMode,
};
use super::{Command, CommandError, Dispatcher};

pub(super) fn register_defaults(dispatcher: &mut Dispatcher) {
    dispatcher.register(handle_create_node);
    dispatcher.register(handle_create_wire);
    dispatcher.register(handle_delete_elements);
    dispatcher.register(handle_move_elements);
    dispatcher.register(handle_reorder_wires);
    dispatcher.register(handle_rename_element);
    dispatcher.register(handle_create_group);
    dispatcher.register(handle_create_placemat);
    dispatcher.register(handle_select_elements);
    dispatcher.register(handle_bypass_nodes);
    dispatcher.register(handle_reframe_view);
}

fn label_of<C: Command>(command: &C) -> &str {
    command.undo_label().unwrap_or("Edit")
}

fn handle_create_node(
    state: &mut EditorState,
    command: &CreateNodeCommand,
) -> Result<(), CommandError> {
    let mut txn = state.undo_stack.begin(label_of(command));

    let position = match command.position {
        Some(position) => position,
        None => txn.save_and_update(&mut state.placement).take_slot(),
    };

    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    graph.create_node(command.name.clone(), position, &command.ports, &mut changes);
    graph.mark_updated(changes);
    Ok(())
}

fn handle_create_wire(
    state: &mut EditorState,
    command: &CreateWireCommand,
) -> Result<(), CommandError> {
    if let Err(err) = state
        .graph
        .value()
        .can_create_wire(command.to_port_id, command.from_port_id)
    {
        log::warn!("create wire skipped: {err}");
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    if let Err(err) = graph.create_wire(command.to_port_id, command.from_port_id, &mut changes) {
        log::warn!("create wire rejected: {err}");
    }
    graph.mark_updated(changes);
    Ok(())
}

fn handle_delete_elements(
    state: &mut EditorState,
    command: &DeleteElementsCommand,
) -> Result<(), CommandError> {
    let existing: Vec<ModelId> = command
        .element_ids
        .iter()
        .copied()
        .filter(|&id| state.graph.value().element_kind(id).is_some())
        .collect();
    if existing.is_empty() {
        log::warn!("delete skipped: no existing elements among targets");
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    {
        let mut graph = txn.save_and_update(&mut state.graph);
        graph.delete_elements(&existing, &mut changes);
        graph.mark_updated(changes.clone());
    }

    let doomed_selected: Vec<ModelId> = changes
        .deleted_models()
        .iter()
        .copied()
        .filter(|&id| state.selection.value().is_selected(id))
        .collect();
    if !doomed_selected.is_empty() {
        let mut selection = txn.save_and_update(&mut state.selection);
        let mut selection_changes = ChangeDescription::new();
        for id in doomed_selected {
            selection.deselect(id);
            selection_changes.record_deleted(id);
        }
        selection.mark_updated(selection_changes);
    }
    Ok(())
}

fn handle_move_elements(
    state: &mut EditorState,
    command: &MoveElementsCommand,
) -> Result<(), CommandError> {
    let movable: Vec<ModelId> = command
        .element_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|&id| {
            matches!(
                state.graph.value().element_kind(id),
                Some(ElementKind::Node | ElementKind::Placemat)
            )
        })
        .collect();
    if movable.is_empty() {
        log::warn!("move skipped: no movable elements among targets");
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    for id in movable {
        if let Err(err) = graph.translate_element(id, command.delta, &mut changes) {
            log::warn!("move skipped for one element: {err}");
        }
    }
    graph.mark_updated(changes);
    Ok(())
}

fn handle_reorder_wires(
    state: &mut EditorState,
    command: &ReorderWiresCommand,
) -> Result<(), CommandError> {
    let known: Vec<ModelId> = command
        .wire_ids
        .iter()
        .copied()
        .filter(|&id| state.graph.value().wire(id).is_some())
        .collect();
    if known.is_empty() {
        log::warn!("reorder skipped: no known wires among targets");
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    graph.reorder_wires(&known, command.order, &mut changes);
    graph.mark_updated(changes);
    Ok(())
}

fn handle_rename_element(
    state: &mut EditorState,
    command: &RenameElementCommand,
) -> Result<(), CommandError> {
    match state.graph.value().element_kind(command.element_id) {
        None | Some(ElementKind::Wire) => {
            log::warn!("rename skipped: target is absent or not nameable");
            return Ok(());
        }
        Some(_) => {}
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    if let Err(err) = graph.rename_element(command.element_id, command.name.clone(), &mut changes) {
        log::warn!("rename rejected: {err}");
    }
    graph.mark_updated(changes);
    Ok(())
}

fn handle_create_group(
    state: &mut EditorState,
    command: &CreateGroupCommand,
) -> Result<(), CommandError> {
    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    graph.create_group(command.name.clone(), &command.member_ids, &mut changes);
    graph.mark_updated(changes);
    Ok(())
}

fn handle_create_placemat(
    state: &mut EditorState,
    command: &CreatePlacematCommand,
) -> Result<(), CommandError> {
    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    graph.create_placemat(command.title.clone(), command.position, &mut changes);
    graph.mark_updated(changes);
    Ok(())
}

fn handle_select_elements(
    state: &mut EditorState,
    command: &SelectElementsCommand,
) -> Result<(), CommandError> {
    let existing: BTreeSet<ModelId> = command
        .element_ids
        .iter()
        .copied()
        .filter(|&id| state.graph.value().element_kind(id).is_some())
        .collect();

    let selection = state.selection.value();
    let flipped: Vec<ModelId> = match command.mode {
        SelectionMode::Replace => selection
            .selected()
            .symmetric_difference(&existing)
            .copied()
            .collect(),
        SelectionMode::Add => existing
            .iter()
            .copied()
            .filter(|&id| !selection.is_selected(id))
            .collect(),
        SelectionMode::Remove => existing
            .iter()
            .copied()
            .filter(|&id| selection.is_selected(id))
            .collect(),
        SelectionMode::Toggle => existing.iter().copied().collect(),
    };
    if flipped.is_empty() {
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut scope = txn.save_and_update(&mut state.selection);
    match command.mode {
        SelectionMode::Replace => {
            scope.clear();
            for &id in &existing {
                scope.select(id);
            }
        }
        SelectionMode::Add => {
            for &id in &existing {
                scope.select(id);
            }
        }
        SelectionMode::Remove => {
            for &id in &existing {
                scope.deselect(id);
            }
        }
        SelectionMode::Toggle => {
            for &id in &existing {
                scope.toggle(id);
            }
        }
    }

    let mut changes = ChangeDescription::new();
    for id in flipped {
        changes.record_changed(id, ChangeHints::DATA);
    }
    scope.mark_updated(changes);
    Ok(())
}

/// The reconnection plan for one bypassable node: `(to_port, from_port)`
/// pairs to wire after the node is deleted.
fn plan_bypass(graph: &GraphModel, node_id: ModelId) -> Option<Vec<(ModelId, ModelId)>> {
    graph.node(node_id)?;

    let incoming: Vec<ModelId> = graph
        .wires_on_node(node_id, Some(PortDirection::Input))
        .into_iter()
        .collect();
    let outgoing: Vec<ModelId> = graph
        .wires_on_node(node_id, Some(PortDirection::Output))
        .into_iter()
        .collect();
    if incoming.len() != 1 || outgoing.is_empty() {
        return None;
    }

    let source_port = graph.wire(incoming[0])?.from_port_id();
    let mut pairs = Vec::with_capacity(outgoing.len());
    for wire_id in outgoing {
        let destination_port = graph.wire(wire_id)?.to_port_id();
        pairs.push((destination_port, source_port));
    }
    Some(pairs)
}

fn handle_bypass_nodes(
    state: &mut EditorState,
    command: &BypassNodesCommand,
) -> Result<(), CommandError> {
    let applicable = command
        .node_ids
        .iter()
        .any(|&node_id| plan_bypass(state.graph.value(), node_id).is_some());
    if !applicable {
        log::warn!("bypass skipped: no node has the required wire shape");
        return Ok(());
    }

    let mut txn = state.undo_stack.begin(label_of(command));
    let mut changes = ChangeDescription::new();
    let mut graph = txn.save_and_update(&mut state.graph);
    for &node_id in &command.node_ids {
        // Re-plan against the mutated graph: earlier bypasses may have
        // changed this node's wires.
        let Some(pairs) = plan_bypass(&graph, node_id) else {
            continue;
        };
        graph.delete_elements(&[node_id], &mut changes);
        for (to_port, from_port) in pairs {
            if let Err(err) = graph.create_wire(to_port, from_port, &mut changes) {
                log::warn!("bypass reconnection skipped: {err}");
            }
        }
    }
    graph.mark_updated(changes);
    Ok(())
}

fn handle_reframe_view(
    state: &mut EditorState,
    command: &ReframeViewCommand,
) -> Result<(), CommandError> {
    let mut view = state.view.update();
    view.set_pan(command.pan);
    view.set_zoom(command.zoom);
    view.set_ghost_wire(command.ghost_wire.clone());
    Ok(())
}
