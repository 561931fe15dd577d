// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Triton — node-graph editing core (commands + versioned state + undo).
//!
//! The embedding host constructs a [`command::Dispatcher`], feeds user intents
//! in as command structs, and polls the [`state::StateComponent`] versions to
//! find out what to redraw.

pub mod change;
pub mod command;
pub mod diff;
pub mod model;
pub mod state;
pub mod undo;
