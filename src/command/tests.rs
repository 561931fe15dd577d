// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use smol_str::SmolStr;

use crate::diff::NodeWireDiff;
use crate::model::fixtures::{fan_in_single_capacity, fan_out_wired};
use crate::model::{
    GraphModel, ModelId, PortDescription, PortDirection, Position, ReorderType, Vector,
};
use crate::state::components::EditorState;

use super::{
    BypassNodesCommand, CommandError, CreateGroupCommand, CreateNodeCommand,
    CreatePlacematCommand, CreateWireCommand, DeleteElementsCommand, Dispatcher,
    MoveElementsCommand, ReframeViewCommand, RenameElementCommand, ReorderWiresCommand,
    SelectElementsCommand, SelectionMode,
};

fn editor_with(graph: GraphModel) -> EditorState {
    let mut state = EditorState::new();
    *state.graph.update() = graph;
    state
}

#[test]
fn dispatching_unregistered_command_fails_without_mutation() {
    let dispatcher = Dispatcher::new();
    let mut state = EditorState::new();
    let result = dispatcher.dispatch(
        &mut state,
        &CreateNodeCommand {
            name: SmolStr::new("Mixer"),
            position: None,
            ports: Vec::new(),
        },
    );
    assert!(matches!(
        result,
        Err(CommandError::UnregisteredCommand { .. })
    ));
    assert!(state.graph.value().is_empty());
    assert!(state.undo_stack.entries().is_empty());
}

#[test]
#[should_panic(expected = "duplicate handler registration")]
fn double_registration_panics() {
    let mut dispatcher = Dispatcher::with_default_handlers();
    dispatcher.register(|_state, _command: &CreateNodeCommand| Ok(()));
}

#[test]
fn create_node_without_position_takes_the_next_placement_slot() {
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = EditorState::new();
    let expected_slot = state.placement.value().next_slot();

    dispatcher
        .dispatch(
            &mut state,
            &CreateNodeCommand {
                name: SmolStr::new("Mixer"),
                position: None,
                ports: vec![
                    PortDescription::new("in", PortDirection::Input),
                    PortDescription::new("out", PortDirection::Output),
                ],
            },
        )
        .expect("dispatch");

    let (node_id, node) = state.graph.value().nodes().next().expect("one node");
    assert_eq!(node.name(), "Mixer");
    assert_eq!(node.position(), expected_slot);
    assert_eq!(state.graph.value().ports_of_node(node_id).len(), 2);
    assert_ne!(state.placement.value().next_slot(), expected_slot);

    assert_eq!(state.graph.value().len(), 3);
    assert_eq!(state.undo_stack.entries().len(), 1);
    assert_eq!(state.undo_stack.entries()[0].label(), "Create Node");
}

#[test]
fn incompatible_wire_dispatch_is_a_clean_noop() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let version = state.graph.version();

    // Input side offered as the source: rejected before any scope opens.
    dispatcher
        .dispatch(
            &mut state,
            &CreateWireCommand {
                to_port_id: fixture.source_out,
                from_port_id: fixture.left_in,
            },
        )
        .expect("routine rejection is not a dispatch error");

    assert_eq!(state.graph.version(), version);
    assert!(state.undo_stack.entries().is_empty());
}

#[test]
fn single_capacity_replacement_observed_through_wire_diff() {
    let fixture = fan_in_single_capacity();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &CreateWireCommand {
                to_port_id: fixture.sink_in,
                from_port_id: fixture.source_a_out,
            },
        )
        .expect("first wire");
    let first_wire = state
        .graph
        .value()
        .wires_on_node(fixture.sink_id, None)
        .into_iter()
        .next()
        .expect("wired");

    let diff = NodeWireDiff::new(state.graph.value(), fixture.sink_id, None);
    dispatcher
        .dispatch(
            &mut state,
            &CreateWireCommand {
                to_port_id: fixture.sink_in,
                from_port_id: fixture.source_b_out,
            },
        )
        .expect("replacement wire");

    // The single-capacity input dropped its previous wire in the same step.
    assert_eq!(diff.deleted_wires(state.graph.value()), [first_wire]);
    assert_eq!(diff.added_wires(state.graph.value()).len(), 1);
    assert_eq!(
        state.graph.value().wires_on_node(fixture.sink_id, None).len(),
        1
    );
}

#[test]
fn delete_cascades_and_scrubs_the_selection() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &SelectElementsCommand {
                element_ids: vec![fixture.source_id, fixture.left_id],
                mode: SelectionMode::Replace,
            },
        )
        .expect("select");

    let selection_version = state.selection.version();
    dispatcher
        .dispatch(
            &mut state,
            &DeleteElementsCommand {
                element_ids: vec![fixture.source_id],
            },
        )
        .expect("delete");

    let graph = state.graph.value();
    assert!(graph.node(fixture.source_id).is_none());
    assert!(graph.port(fixture.source_out).is_none());
    assert!(graph.wire(fixture.wire_to_left).is_none());
    assert!(graph.wire(fixture.wire_to_right).is_none());
    assert!(graph.node(fixture.left_id).is_some());
    assert!(graph.node(fixture.right_id).is_some());

    assert!(!state.selection.value().is_selected(fixture.source_id));
    assert!(state.selection.value().is_selected(fixture.left_id));
    let selection_changes = state
        .selection
        .changes_since(selection_version)
        .expect("covered");
    assert!(selection_changes
        .deleted_models()
        .contains(&fixture.source_id));
}

#[test]
fn undo_restores_and_redo_reapplies_the_deletion() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let before = state.graph.value().clone();

    dispatcher
        .dispatch(
            &mut state,
            &DeleteElementsCommand {
                element_ids: vec![fixture.source_id],
            },
        )
        .expect("delete");
    let after = state.graph.value().clone();
    assert_ne!(&before, &after);

    assert!(state.undo(false));
    assert_eq!(state.graph.value(), &before);
    assert!(state.undo_stack.can_redo());

    assert!(state.undo(true));
    assert_eq!(state.graph.value(), &after);
    assert!(!state.undo(true), "nothing further to redo");
}

#[test]
fn new_command_after_undo_truncates_the_redo_tail() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &DeleteElementsCommand {
                element_ids: vec![fixture.left_id],
            },
        )
        .expect("delete left");
    assert!(state.undo(false));

    dispatcher
        .dispatch(
            &mut state,
            &DeleteElementsCommand {
                element_ids: vec![fixture.right_id],
            },
        )
        .expect("delete right");

    assert!(!state.undo_stack.can_redo());
    assert!(state.graph.value().node(fixture.left_id).is_some());
    assert!(state.graph.value().node(fixture.right_id).is_none());
}

#[test]
fn rename_dispatch_renames_and_lands_on_the_undo_stack() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &RenameElementCommand {
                element_id: fixture.left_id,
                name: SmolStr::new("Sink"),
            },
        )
        .expect("rename");

    assert_eq!(
        state.graph.value().node(fixture.left_id).expect("node").name(),
        "Sink"
    );
    assert_eq!(state.undo_stack.entries().len(), 1);
    assert_eq!(state.undo_stack.entries()[0].label(), "Rename");
}

#[rstest]
#[case::wire_target(true)]
#[case::unknown_target(false)]
fn rename_dispatch_skips_unnameable_targets(#[case] use_wire: bool) {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let version = state.graph.version();
    let target = if use_wire {
        fixture.wire_to_left
    } else {
        ModelId::fresh()
    };

    dispatcher
        .dispatch(
            &mut state,
            &RenameElementCommand {
                element_id: target,
                name: SmolStr::new("W"),
            },
        )
        .expect("routine rejection is not a dispatch error");

    assert_eq!(state.graph.version(), version);
    assert!(state.undo_stack.entries().is_empty());
}

#[test]
fn reorder_dispatch_repositions_on_the_from_port() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &ReorderWiresCommand {
                wire_ids: vec![fixture.wire_to_left],
                order: ReorderType::MoveLast,
            },
        )
        .expect("reorder");

    assert_eq!(
        state
            .graph
            .value()
            .port(fixture.source_out)
            .expect("port")
            .wires(),
        [fixture.wire_to_right, fixture.wire_to_left]
    );
    assert_eq!(state.undo_stack.entries()[0].label(), "Reorder Wire");
}

#[test]
fn reorder_dispatch_with_unknown_wires_is_a_noop() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let version = state.graph.version();

    dispatcher
        .dispatch(
            &mut state,
            &ReorderWiresCommand {
                wire_ids: vec![ModelId::fresh()],
                order: ReorderType::MoveFirst,
            },
        )
        .expect("noop");

    assert_eq!(state.graph.version(), version);
    assert!(state.undo_stack.entries().is_empty());
}

#[test]
fn create_group_dispatch_groups_known_members() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    dispatcher
        .dispatch(
            &mut state,
            &CreateGroupCommand {
                name: SmolStr::new("Consumers"),
                member_ids: vec![fixture.left_id, fixture.right_id, ModelId::fresh()],
            },
        )
        .expect("group");

    let (group_id, group) = state.graph.value().groups().next().expect("one group");
    assert_eq!(group.name(), "Consumers");
    assert_eq!(group.member_ids(), [fixture.left_id, fixture.right_id]);
    assert!(state.graph.value().group(group_id).is_some());
    assert_eq!(state.undo_stack.entries()[0].label(), "Create Group");
}

#[test]
fn create_placemat_dispatch_places_the_titled_surface() {
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = EditorState::new();
    let version = state.graph.version();

    dispatcher
        .dispatch(
            &mut state,
            &CreatePlacematCommand {
                title: SmolStr::new("Inputs"),
                position: Position::new(-80.0, 40.0),
            },
        )
        .expect("placemat");

    let changes = state.graph.changes_since(version).expect("covered");
    assert_eq!(changes.new_models().len(), 1);
    let placemat_id = *changes.new_models().iter().next().expect("new id");
    let placemat = state.graph.value().placemat(placemat_id).expect("placemat");
    assert_eq!(placemat.title(), "Inputs");
    assert_eq!(placemat.position(), Position::new(-80.0, 40.0));
    assert_eq!(state.undo_stack.entries()[0].label(), "Create Placemat");
}

#[rstest]
#[case(SelectionMode::Replace, &["right"], &["right"])]
#[case(SelectionMode::Add, &["right"], &["left", "right"])]
#[case(SelectionMode::Remove, &["left"], &[])]
#[case(SelectionMode::Toggle, &["left", "right"], &["right"])]
fn select_modes(
    #[case] mode: SelectionMode,
    #[case] targets: &[&str],
    #[case] expected: &[&str],
) {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let id_of = |name: &str| match name {
        "left" => fixture.left_id,
        "right" => fixture.right_id,
        other => panic!("unknown fixture node {other}"),
    };

    dispatcher
        .dispatch(
            &mut state,
            &SelectElementsCommand {
                element_ids: vec![fixture.left_id],
                mode: SelectionMode::Replace,
            },
        )
        .expect("initial selection");

    dispatcher
        .dispatch(
            &mut state,
            &SelectElementsCommand {
                element_ids: targets.iter().map(|name| id_of(name)).collect(),
                mode,
            },
        )
        .expect("select");

    let expected: std::collections::BTreeSet<ModelId> =
        expected.iter().map(|name| id_of(name)).collect();
    assert_eq!(state.selection.value().selected(), &expected);
}

#[test]
fn selecting_the_current_selection_again_is_a_noop() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);

    let select = SelectElementsCommand {
        element_ids: vec![fixture.left_id],
        mode: SelectionMode::Replace,
    };
    dispatcher.dispatch(&mut state, &select).expect("select");
    let entries = state.undo_stack.entries().len();
    let version = state.selection.version();

    dispatcher.dispatch(&mut state, &select).expect("reselect");
    assert_eq!(state.undo_stack.entries().len(), entries);
    assert_eq!(state.selection.version(), version);
}

#[test]
fn merged_move_stream_undoes_in_one_step() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let start = state
        .graph
        .value()
        .node(fixture.source_id)
        .expect("node")
        .position();

    state.undo_stack.begin_merge();
    for _ in 0..3 {
        dispatcher
            .dispatch(
                &mut state,
                &MoveElementsCommand {
                    element_ids: vec![fixture.source_id],
                    delta: Vector::new(10.0, 0.0),
                },
            )
            .expect("move");
    }
    state.undo_stack.end_merge();

    let moved = state
        .graph
        .value()
        .node(fixture.source_id)
        .expect("node")
        .position();
    assert_eq!(moved, start + Vector::new(30.0, 0.0));
    assert_eq!(state.undo_stack.entries().len(), 1);

    assert!(state.undo(false));
    assert_eq!(
        state
            .graph
            .value()
            .node(fixture.source_id)
            .expect("node")
            .position(),
        start
    );
}

#[test]
fn bypass_rewires_around_the_node() {
    let mut graph = GraphModel::new();
    let mut changes = crate::change::ChangeDescription::new();
    let source_id = graph.create_node(
        "Source",
        Position::new(0.0, 0.0),
        &[PortDescription::new("out", PortDirection::Output)],
        &mut changes,
    );
    let filter_id = graph.create_node(
        "Filter",
        Position::new(120.0, 0.0),
        &[
            PortDescription::new("in", PortDirection::Input),
            PortDescription::new("out", PortDirection::Output),
        ],
        &mut changes,
    );
    let dest_id = graph.create_node(
        "Dest",
        Position::new(240.0, 0.0),
        &[PortDescription::new("in", PortDirection::Input)],
        &mut changes,
    );
    let source_out = graph.node(source_id).expect("node").ports()[0];
    let filter_in = graph.node(filter_id).expect("node").ports()[0];
    let filter_out = graph.node(filter_id).expect("node").ports()[1];
    let dest_in = graph.node(dest_id).expect("node").ports()[0];
    graph
        .create_wire(filter_in, source_out, &mut changes)
        .expect("into filter");
    graph
        .create_wire(dest_in, filter_out, &mut changes)
        .expect("out of filter");

    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(graph);

    dispatcher
        .dispatch(
            &mut state,
            &BypassNodesCommand {
                node_ids: vec![filter_id],
            },
        )
        .expect("bypass");

    let graph = state.graph.value();
    assert!(graph.node(filter_id).is_none());
    let (_, wire) = graph.wires().next().expect("replacement wire");
    assert_eq!(wire.from_port_id(), source_out);
    assert_eq!(wire.to_port_id(), dest_in);
    assert_eq!(graph.wires().count(), 1);
    assert_eq!(state.undo_stack.entries()[0].label(), "Bypass");

    // The whole bypass restores in one undo step.
    assert!(state.undo(false));
    let graph = state.graph.value();
    assert!(graph.node(filter_id).is_some());
    assert_eq!(graph.wires().count(), 2);
}

#[test]
fn bypass_without_the_required_shape_is_a_noop() {
    let fixture = fan_out_wired();
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = editor_with(fixture.graph);
    let version = state.graph.version();

    // Source has no incoming wire; nothing to bypass.
    dispatcher
        .dispatch(
            &mut state,
            &BypassNodesCommand {
                node_ids: vec![fixture.source_id],
            },
        )
        .expect("noop");

    assert_eq!(state.graph.version(), version);
    assert!(state.undo_stack.entries().is_empty());
}

#[test]
fn reframe_view_skips_the_undo_stack() {
    let dispatcher = Dispatcher::with_default_handlers();
    let mut state = EditorState::new();

    dispatcher
        .dispatch(
            &mut state,
            &ReframeViewCommand {
                pan: Position::new(100.0, -40.0),
                zoom: 2.0,
                ghost_wire: None,
            },
        )
        .expect("reframe");

    assert_eq!(state.view.value().pan(), Position::new(100.0, -40.0));
    assert_eq!(state.view.value().zoom(), 2.0);
    assert!(state.undo_stack.entries().is_empty());
    assert_eq!(state.view.version(), 1);
}
