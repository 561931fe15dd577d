// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental wire-set diffing for one node.
//!
//! A [`NodeWireDiff`] captures the ids of the wires touching a node at
//! construction time, then answers "which wires appeared / disappeared" against
//! a later graph. Observers that render per-node connections use this instead
//! of rebuilding their view from scratch on every graph version.

use std::collections::BTreeSet;

use crate::model::{GraphModel, ModelId, PortDirection};

/// Snapshot of one node's wire set, optionally restricted to ports of one
/// declared direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeWireDiff {
    node_id: ModelId,
    direction: Option<PortDirection>,
    snapshot: BTreeSet<ModelId>,
}

impl NodeWireDiff {
    /// Captures the node's current wire set. A node absent from the graph
    /// yields an empty snapshot, so every later wire shows up as added.
    pub fn new(graph: &GraphModel, node_id: ModelId, direction: Option<PortDirection>) -> Self {
        Self {
            node_id,
            direction,
            snapshot: graph.wires_on_node(node_id, direction),
        }
    }

    pub fn node_id(&self) -> ModelId {
        self.node_id
    }

    /// Wires present now but not in the snapshot, in id order.
    pub fn added_wires(&self, graph: &GraphModel) -> Vec<ModelId> {
        graph
            .wires_on_node(self.node_id, self.direction)
            .difference(&self.snapshot)
            .copied()
            .collect()
    }

    /// Wires in the snapshot but gone now, in id order.
    pub fn deleted_wires(&self, graph: &GraphModel) -> Vec<ModelId> {
        self.snapshot
            .difference(&graph.wires_on_node(self.node_id, self.direction))
            .copied()
            .collect()
    }

    /// Re-baselines the snapshot to the graph's current wire set.
    pub fn rebase(&mut self, graph: &GraphModel) {
        self.snapshot = graph.wires_on_node(self.node_id, self.direction);
    }
}
