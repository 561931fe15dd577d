// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core graph data model.
//!
//! A [`GraphModel`] owns every node, port, wire, group, and placemat identity
//! in one GUID-keyed arena and exposes the validated mutation operations the
//! command layer funnels through.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod graph;
pub mod group;
pub mod ids;
pub mod node;
pub mod wire;

pub use geometry::{Position, Vector};
pub use graph::{Element, ElementKind, GraphError, GraphModel, IncompatibleReason};
pub use group::{GroupModel, PlacematModel};
pub use ids::{ModelId, ParseModelIdError};
pub use node::{NodeModel, PortCapacity, PortDescription, PortDirection, PortModel};
pub use wire::{ReorderType, WireModel};
