//! Ordering of the town's `FixedUpdate` systems.
//!
//! ```text
//! Input  →  Commands  →  PostCommands
//! ```
//!
//! * **Input** – systems that translate player input into queued
//!   [`crate::town_actions::TownCommand`]s.
//! * **Commands** – the executor. The only phase allowed to mutate
//!   [`crate::town::Town`].
//! * **PostCommands** – readers of the updated town: save/load requests,
//!   notifications, the tick counter.

use bevy::prelude::*;

/// Configured as a chain by [`crate::TownPlugin`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TownSet {
    Input,
    Commands,
    PostCommands,
}
