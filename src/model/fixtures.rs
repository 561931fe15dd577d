// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::change::ChangeDescription;

use super::geometry::Position;
use super::graph::GraphModel;
use super::ids::ModelId;
use super::node::{PortCapacity, PortDescription, PortDirection};

/// Two producers and one single-capacity consumer, unwired.
pub(crate) struct FanInFixture {
    pub graph: GraphModel,
    pub source_a_id: ModelId,
    pub source_a_out: ModelId,
    pub source_b_id: ModelId,
    pub source_b_out: ModelId,
    pub sink_id: ModelId,
    pub sink_in: ModelId,
}

fn only_port(graph: &GraphModel, node_id: ModelId) -> ModelId {
    let node = graph.node(node_id).expect("node");
    assert_eq!(node.ports().len(), 1, "fixture node has one port");
    node.ports()[0]
}

pub(crate) fn fan_in_single_capacity() -> FanInFixture {
    let mut graph = GraphModel::new();
    let mut changes = ChangeDescription::new();

    let out_port = || vec![PortDescription::new("out", PortDirection::Output)];
    let in_port = || {
        vec![PortDescription::new("in", PortDirection::Input)
            .with_capacity(PortCapacity::Single)]
    };

    let source_a_id = graph.create_node("A", Position::new(0.0, 0.0), &out_port(), &mut changes);
    let source_b_id = graph.create_node("B", Position::new(0.0, 120.0), &out_port(), &mut changes);
    let sink_id = graph.create_node("Sink", Position::new(240.0, 60.0), &in_port(), &mut changes);

    let source_a_out = only_port(&graph, source_a_id);
    let source_b_out = only_port(&graph, source_b_id);
    let sink_in = only_port(&graph, sink_id);

    FanInFixture {
        graph,
        source_a_id,
        source_a_out,
        source_b_id,
        source_b_out,
        sink_id,
        sink_in,
    }
}

/// One producer fanned out to two multi-capacity consumers, fully wired.
pub(crate) struct FanOutFixture {
    pub graph: GraphModel,
    pub source_id: ModelId,
    pub source_out: ModelId,
    pub left_id: ModelId,
    pub left_in: ModelId,
    pub right_id: ModelId,
    pub right_in: ModelId,
    pub wire_to_left: ModelId,
    pub wire_to_right: ModelId,
}

pub(crate) fn fan_out_wired() -> FanOutFixture {
    let mut graph = GraphModel::new();
    let mut changes = ChangeDescription::new();

    let source_id = graph.create_node(
        "Source",
        Position::new(0.0, 60.0),
        &[PortDescription::new("out", PortDirection::Output)],
        &mut changes,
    );
    let left_id = graph.create_node(
        "Left",
        Position::new(240.0, 0.0),
        &[PortDescription::new("in", PortDirection::Input)],
        &mut changes,
    );
    let right_id = graph.create_node(
        "Right",
        Position::new(240.0, 120.0),
        &[PortDescription::new("in", PortDirection::Input)],
        &mut changes,
    );

    let source_out = only_port(&graph, source_id);
    let left_in = only_port(&graph, left_id);
    let right_in = only_port(&graph, right_id);

    let wire_to_left = graph
        .create_wire(left_in, source_out, &mut changes)
        .expect("wire to left");
    let wire_to_right = graph
        .create_wire(right_in, source_out, &mut changes)
        .expect("wire to right");

    FanOutFixture {
        graph,
        source_id,
        source_out,
        left_id,
        left_in,
        right_id,
        right_in,
        wire_to_left,
        wire_to_right,
    }
}
