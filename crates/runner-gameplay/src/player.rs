//! Player controller for movement and state management.
//!
//! One [`Player::update`] runs the whole frame in a fixed order: collision,
//! state input handling, motion, animation. The session context is passed in
//! explicitly; the player holds no reference back to it.

use runner_common::EntityId;
use tracing::debug;

use crate::animation::{AnimationClock, SpriteFrame};
use crate::collision;
use crate::config::PlayerConfig;
use crate::events::GameEvent;
use crate::input::{Input, Vec2};
use crate::physics::{Motion, WorldBounds, AABB};
use crate::player_state::{PlayerState, StateView, SCROLL_STOP};
use crate::session::GameContext;

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    /// Entity ID
    entity_id: EntityId,
    /// Top-left corner in world space
    position: Vec2,
    /// Sprite and collision size
    size: Vec2,
    /// Horizontal and vertical motion
    motion: Motion,
    /// Sprite frame clock
    clock: AnimationClock,
    /// Active state
    state: PlayerState,
    /// Tunables
    config: PlayerConfig,
    /// Copy of the world extents from the context
    world: WorldBounds,
}

impl Player {
    /// Create a player standing on the ground at the left edge, in
    /// [`PlayerState::Sitting`].
    ///
    /// # Panics
    ///
    /// Panics if the player does not fit inside the world above the ground
    /// margin, or if `config.fps` is not positive.
    #[must_use]
    pub fn new(config: &PlayerConfig, ctx: &mut GameContext) -> Self {
        let world = *ctx.world();
        assert!(
            config.width > 0.0 && config.height > 0.0,
            "player size must be positive, got {}x{}",
            config.width,
            config.height
        );
        assert!(
            config.width <= world.width() && world.ground_y(config.height) >= 0.0,
            "player {}x{} does not fit a {}x{} world with ground margin {}",
            config.width,
            config.height,
            world.width(),
            world.height(),
            world.ground_margin()
        );

        let initial = PlayerState::default().animation();
        let mut player = Self {
            entity_id: EntityId::new(),
            position: Vec2::new(0.0, world.ground_y(config.height)),
            size: Vec2::new(config.width, config.height),
            motion: Motion::new(config),
            clock: AnimationClock::new(config.fps, initial.max_frame),
            state: PlayerState::default(),
            config: config.clone(),
            world,
        };
        player.set_state(PlayerState::Sitting, SCROLL_STOP, ctx);
        player
    }

    /// Run one frame.
    pub fn update(&mut self, input: &Input, delta_ms: f32, ctx: &mut GameContext) {
        let report = collision::detect(&self.bounds(), self.state, ctx);
        if report.player_hit() {
            self.set_state(PlayerState::Hit, SCROLL_STOP, ctx);
        }

        let view = StateView {
            on_ground: self.on_ground(),
            vy: self.motion.vy(),
            weight: self.motion.weight(),
            animation_done: self.clock.on_last_frame(),
        };
        if let Some(change) = self.state.handle_input(input, &view) {
            if change.bounce {
                self.motion.set_vy(-self.config.dive_bounce);
            }
            self.set_state(change.state, change.speed_multiplier, ctx);
        }

        self.motion.integrate(
            &mut self.position,
            self.size,
            input,
            self.state.locks_movement(),
            &self.world,
        );

        self.clock.tick(delta_ms);
    }

    /// Switch to `state`, set the world scroll to `max_speed * speed_multiplier`
    /// and run the state's entry hook.
    pub fn set_state(&mut self, state: PlayerState, speed_multiplier: f32, ctx: &mut GameContext) {
        let from = self.state;
        self.state = state;
        ctx.set_speed(ctx.max_speed() * speed_multiplier);

        let on_ground = self.on_ground();
        state.enter(&mut self.clock, &mut self.motion, on_ground, &self.config);

        debug!(
            %from,
            to = %state,
            scroll = ctx.speed(),
            vy = self.motion.vy(),
            "player state changed"
        );
        ctx.publish(GameEvent::StateChanged { from, to: state });
    }

    /// Whether the player stands on the ground line.
    #[must_use]
    pub fn on_ground(&self) -> bool {
        self.world.is_on_ground(self.position.y, self.size.y)
    }

    /// Get the player's entity ID.
    #[must_use]
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the player, clamped to the world.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = Vec2::new(
            position.x.clamp(0.0, self.world.max_x(self.size.x)),
            position.y.min(self.world.ground_y(self.size.y)),
        );
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Active state.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// Horizontal delta applied on the last frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.motion.speed()
    }

    /// Vertical velocity.
    #[must_use]
    pub const fn vy(&self) -> f32 {
        self.motion.vy()
    }

    /// Sprite frame clock.
    #[must_use]
    pub const fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Tunables.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Collision box.
    #[must_use]
    pub fn bounds(&self) -> AABB {
        AABB::from_rect(self.position, self.size)
    }

    /// Rectangle for the renderer.
    #[must_use]
    pub fn sprite_frame(&self, debug_outline: bool) -> SpriteFrame {
        self.clock.sprite_frame(
            self.size.x,
            self.size.y,
            self.position.x,
            self.position.y,
            debug_outline,
        )
    }
}
