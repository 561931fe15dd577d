// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::ModelId;

/// A committed connection between two ports.
///
/// `from` is the output side, `to` the input side. Both endpoints must belong
/// to ports in the same graph; the graph's delete cascade guarantees a wire
/// never outlives either endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireModel {
    from_port_id: ModelId,
    to_port_id: ModelId,
}

impl WireModel {
    pub(crate) fn new(from_port_id: ModelId, to_port_id: ModelId) -> Self {
        Self {
            from_port_id,
            to_port_id,
        }
    }

    pub fn from_port_id(&self) -> ModelId {
        self.from_port_id
    }

    pub fn to_port_id(&self) -> ModelId {
        self.to_port_id
    }
}

/// Explicit insertion position for wire reordering on a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReorderType {
    MoveFirst,
    MoveUp,
    MoveDown,
    MoveLast,
}
