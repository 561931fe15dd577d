// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::geometry::Position;
use super::ids::ModelId;

/// A named collection of canvas elements.
///
/// Membership is a reference, not ownership: deleting a group leaves its
/// members in place, and deleting a member scrubs it from the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupModel {
    name: SmolStr,
    member_ids: Vec<ModelId>,
}

impl GroupModel {
    pub(crate) fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            member_ids: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_ids(&self) -> &[ModelId] {
        &self.member_ids
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.member_ids.contains(&id)
    }

    pub(crate) fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    pub(crate) fn push_member(&mut self, id: ModelId) {
        if !self.member_ids.contains(&id) {
            self.member_ids.push(id);
        }
    }

    pub(crate) fn remove_member(&mut self, id: ModelId) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|member| *member != id);
        self.member_ids.len() != before
    }
}

/// A free-floating annotation surface behind the nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacematModel {
    title: SmolStr,
    position: Position,
}

impl PlacematModel {
    pub(crate) fn new(title: impl Into<SmolStr>, position: Position) -> Self {
        Self {
            title: title.into(),
            position,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_title(&mut self, title: impl Into<SmolStr>) {
        self.title = title.into();
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
