//! Enemy entities as seen by the player controller.
//!
//! Enemy AI lives elsewhere; this type only carries what collision and the
//! cleanup sweep need: geometry and the removal flag.

use runner_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::input::Vec2;
use crate::physics::AABB;

/// Enemy archetype. Only selects the default sprite size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks along the ground
    Ground,
    /// Flies above the ground
    Flying,
    /// Hangs from the top of the screen
    Climbing,
}

impl EnemyKind {
    /// Default sprite size.
    #[must_use]
    pub const fn size(self) -> Vec2 {
        match self {
            Self::Ground => Vec2::new(60.0, 87.0),
            Self::Flying => Vec2::new(60.0, 44.0),
            Self::Climbing => Vec2::new(120.0, 144.0),
        }
    }
}

/// An enemy in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    id: EntityId,
    kind: EnemyKind,
    /// Top-left corner
    position: Vec2,
    size: Vec2,
    marked_for_deletion: bool,
}

impl Enemy {
    /// Enemy of `kind` at `position` with its default size.
    #[must_use]
    pub fn new(kind: EnemyKind, position: Vec2) -> Self {
        Self::with_size(kind, position, kind.size())
    }

    /// Enemy with an explicit size.
    #[must_use]
    pub fn with_size(kind: EnemyKind, position: Vec2, size: Vec2) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            size,
            marked_for_deletion: false,
        }
    }

    /// Unique ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Archetype.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Collision box.
    #[must_use]
    pub fn bounds(&self) -> AABB {
        AABB::from_rect(self.position, self.size)
    }

    /// Center of the collision box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Flag for removal by the next cleanup sweep.
    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    /// Waiting for the cleanup sweep.
    #[must_use]
    pub const fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    /// Shift left by the world scroll; flag once fully off screen.
    pub fn scroll(&mut self, world_speed: f32) {
        self.position.x -= world_speed;
        if self.position.x + self.size.x < 0.0 {
            self.marked_for_deletion = true;
        }
    }
}
