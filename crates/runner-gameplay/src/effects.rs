//! Collision feedback effect (the "boom" drawn where an enemy was touched).
//!
//! Plays its sprite row once, drifts with the world scroll, then flags itself
//! for removal.

use runner_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationClock, SpriteFrame};
use crate::input::Vec2;

/// Sprite cell width of the effect sheet.
pub const EFFECT_SPRITE_WIDTH: f32 = 100.0;
/// Sprite cell height of the effect sheet.
pub const EFFECT_SPRITE_HEIGHT: f32 = 90.0;
/// Last column of the effect sheet.
pub const EFFECT_MAX_FRAME: u32 = 4;
/// Animation rate of the effect.
pub const EFFECT_FPS: f32 = 15.0;

/// One collision effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEffect {
    id: EntityId,
    /// Center of the effect
    center: Vec2,
    /// Random scale in [0.5, 1.5)
    size_modifier: f32,
    clock: AnimationClock,
    marked_for_deletion: bool,
}

impl CollisionEffect {
    /// Effect centered on `center`, scaled by a random modifier from `rng`.
    #[must_use]
    pub fn new(center: Vec2, rng: &mut fastrand::Rng) -> Self {
        Self::with_size_modifier(center, rng.f32() + 0.5)
    }

    /// Effect with a fixed scale.
    #[must_use]
    pub fn with_size_modifier(center: Vec2, size_modifier: f32) -> Self {
        Self {
            id: EntityId::new(),
            center,
            size_modifier,
            clock: AnimationClock::new(EFFECT_FPS, EFFECT_MAX_FRAME),
            marked_for_deletion: false,
        }
    }

    /// Unique ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Center of the effect.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Scale applied to the sprite cell.
    #[must_use]
    pub const fn size_modifier(&self) -> f32 {
        self.size_modifier
    }

    /// Drawn size.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(EFFECT_SPRITE_WIDTH, EFFECT_SPRITE_HEIGHT).scale(self.size_modifier)
    }

    /// Current animation column.
    #[must_use]
    pub const fn frame_x(&self) -> u32 {
        self.clock.frame_x()
    }

    /// Finished playing, waiting for the cleanup sweep.
    #[must_use]
    pub const fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    /// Scroll with the world and advance the animation.
    pub fn update(&mut self, delta_ms: f32, world_speed: f32) {
        self.center.x -= world_speed;
        if self.clock.tick(delta_ms).wrapped {
            self.marked_for_deletion = true;
        }
    }

    /// Rectangle for the renderer. The destination is the drawn size centered
    /// on the effect.
    #[must_use]
    pub fn sprite_frame(&self) -> SpriteFrame {
        let size = self.size();
        let mut frame = self.clock.sprite_frame(
            EFFECT_SPRITE_WIDTH,
            EFFECT_SPRITE_HEIGHT,
            self.center.x - size.x * 0.5,
            self.center.y - size.y * 0.5,
            false,
        );
        frame.width = size.x;
        frame.height = size.y;
        frame
    }
}
