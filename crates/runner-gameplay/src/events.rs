//! Event bus for reporting what happened during a frame.
//!
//! The core publishes; the engine drains once per frame for logging or UI.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use runner_common::EntityId;

use crate::input::Vec2;
use crate::player_state::PlayerState;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player entered a new state
    StateChanged {
        /// Previous state
        from: PlayerState,
        /// New state
        to: PlayerState,
    },
    /// Enemy defeated by a roll or dive
    EnemyDefeated {
        /// Enemy ID
        enemy: EntityId,
        /// Enemy center at the moment of contact
        position: Vec2,
        /// Score after the kill
        score: u32,
    },
    /// Player touched an enemy outside an attack
    PlayerHit {
        /// Enemy ID
        enemy: EntityId,
    },
    /// Enemy added to the level
    EnemySpawned {
        /// Enemy ID
        enemy: EntityId,
    },
    /// Enemy removed by the cleanup sweep
    EnemyRemoved {
        /// Enemy ID
        enemy: EntityId,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<GameEvent>,
    /// Receiver for collecting events
    receiver: Receiver<GameEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: GameEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
