// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command dispatch.
//!
//! Every editing intent is an immutable command struct routed through the
//! [`Dispatcher`]: an explicit registry from the command's type to its one
//! handler, populated once at startup. Dispatch is the single mutation entry
//! point; handlers receive only the [`EditorState`] and the command.

mod commands;
mod handlers;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::state::components::EditorState;

pub use commands::{
    BypassNodesCommand, CreateGroupCommand, CreateNodeCommand, CreatePlacematCommand,
    CreateWireCommand, DeleteElementsCommand, MoveElementsCommand, ReframeViewCommand,
    RenameElementCommand, ReorderWiresCommand, SelectElementsCommand, SelectionMode,
};

/// An immutable description of one user-initiated edit intent.
///
/// Commands are identified by their runtime type, constructed by UI code,
/// consumed exactly once by their handler, then discarded.
pub trait Command: Any + fmt::Debug {
    /// Label for the host's undo menu entry; `None` for commands that do not
    /// reach the undo stack.
    fn undo_label(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Dispatching a command type with no registered handler is a contract
    /// violation by calling code, not a user condition.
    UnregisteredCommand { command_type: &'static str },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredCommand { command_type } => {
                write!(f, "no handler registered for command type {command_type}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

type HandlerFn = Box<dyn Fn(&mut EditorState, &dyn Any) -> Result<(), CommandError>>;

/// Registry from command type to handler.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<TypeId, HandlerFn>,
}

impl Dispatcher {
    /// An empty registry. Most callers want [`Self::with_default_handlers`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in editing command registered.
    pub fn with_default_handlers() -> Self {
        let mut dispatcher = Self::new();
        handlers::register_defaults(&mut dispatcher);
        dispatcher
    }

    /// Registers the one handler for command type `C`.
    ///
    /// Panics if a handler for `C` is already registered: exactly one handler
    /// per command type, and registration happens once at startup.
    pub fn register<C, F>(&mut self, handler: F)
    where
        C: Command,
        F: Fn(&mut EditorState, &C) -> Result<(), CommandError> + 'static,
    {
        let erased: HandlerFn = Box::new(move |state, command| {
            let Some(command) = command.downcast_ref::<C>() else {
                // Registry keys are TypeIds; a mismatch here cannot happen
                // unless the registry itself is corrupted.
                return Err(CommandError::UnregisteredCommand {
                    command_type: std::any::type_name::<C>(),
                });
            };
            handler(state, command)
        });
        let previous = self.handlers.insert(TypeId::of::<C>(), erased);
        if previous.is_some() {
            panic!(
                "duplicate handler registration for command type {}",
                std::any::type_name::<C>()
            );
        }
    }

    /// Routes a command to its registered handler.
    ///
    /// An unregistered command type fails fast with no state mutated.
    pub fn dispatch<C: Command>(
        &self,
        state: &mut EditorState,
        command: &C,
    ) -> Result<(), CommandError> {
        let Some(handler) = self.handlers.get(&TypeId::of::<C>()) else {
            let command_type = std::any::type_name::<C>();
            log::error!("dispatched unregistered command type {command_type}");
            return Err(CommandError::UnregisteredCommand { command_type });
        };
        handler(state, command)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registered", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
