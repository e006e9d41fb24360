use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::TownCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandSource {
    Player,
    Script,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedCommand {
    pub tick: u64,
    pub source: CommandSource,
    pub command: TownCommand,
}

/// Single funnel for town mutations. Systems and UI push; only the executor
/// drains.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandQueue {
    pending: Vec<QueuedCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, tick: u64, source: CommandSource, command: TownCommand) {
        self.pending.push(QueuedCommand {
            tick,
            source,
            command,
        });
    }

    pub fn push_queued(&mut self, queued: QueuedCommand) {
        self.pending.push(queued);
    }

    pub fn drain(&mut self) -> Vec<QueuedCommand> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PendingHandle;

    #[test]
    fn push_and_drain_preserves_fifo() {
        let mut queue = CommandQueue::default();
        queue.push(
            10,
            CommandSource::Player,
            TownCommand::BeginBuilding {
                building_type: "hut".into(),
            },
        );
        queue.push(
            10,
            CommandSource::Script,
            TownCommand::MovePending {
                handle: PendingHandle(0),
                x: 4,
                y: 5,
            },
        );
        queue.push(
            11,
            CommandSource::Replay,
            TownCommand::Commit {
                handle: PendingHandle(0),
            },
        );

        assert_eq!(queue.len(), 3);
        assert!(!queue.is_empty());

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert!(queue.is_empty());

        assert_eq!(drained[0].tick, 10);
        assert_eq!(drained[0].source, CommandSource::Player);
        assert_eq!(drained[1].source, CommandSource::Script);
        assert_eq!(
            drained[1].command,
            TownCommand::MovePending {
                handle: PendingHandle(0),
                x: 4,
                y: 5
            }
        );
        assert_eq!(drained[2].tick, 11);
        assert_eq!(
            drained[2].command,
            TownCommand::Commit {
                handle: PendingHandle(0)
            }
        );
    }

    #[test]
    fn push_queued_appends_as_is() {
        let mut queue = CommandQueue::default();
        let queued = QueuedCommand {
            tick: 3,
            source: CommandSource::Replay,
            command: TownCommand::Destroy { x: 1, y: 2 },
        };
        queue.push_queued(queued.clone());
        assert_eq!(queue.drain(), vec![queued]);
    }
}
