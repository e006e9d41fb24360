//! Bounded history of executed commands and their outcomes.
//!
//! The executor appends every outcome; once [`HISTORY_LEN`] entries are held
//! the oldest is dropped. A UI reads [`CommandResultLog::last_rejection`] to
//! explain why a building could not go where the player clicked.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{CommandResult, TownCommand};
use crate::placement::PlacementError;

pub const HISTORY_LEN: usize = 64;

#[derive(Resource, Debug, Clone)]
pub struct CommandResultLog {
    history: VecDeque<(TownCommand, CommandResult)>,
}

impl Default for CommandResultLog {
    fn default() -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }
}

impl CommandResultLog {
    pub fn record(&mut self, command: TownCommand, result: CommandResult) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back((command, result));
    }

    /// The newest outcome.
    pub fn latest(&self) -> Option<&(TownCommand, CommandResult)> {
        self.history.back()
    }

    /// Up to `n` outcomes, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &(TownCommand, CommandResult)> {
        self.history.iter().rev().take(n)
    }

    /// The most recent commit the placement rules refused, if any is still
    /// in the history.
    pub fn last_rejection(&self) -> Option<&PlacementError> {
        self.history.iter().rev().find_map(|(_, result)| match result {
            CommandResult::Rejected(rejection) => Some(rejection),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
