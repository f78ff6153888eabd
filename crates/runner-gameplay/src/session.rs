//! Game session management.
//!
//! This module handles the running level:
//! - [`GameContext`]: world state shared with the player each frame
//! - [`Session`]: owns the player and the context, drives one frame at a time
//! - Deferred removal of defeated and off-screen entities

use runner_common::{ConfigError, EntityId};
use tracing::{debug, trace};

use crate::animation::SpriteFrame;
use crate::config::GameConfig;
use crate::effects::CollisionEffect;
use crate::enemy::Enemy;
use crate::events::{EventBus, GameEvent};
use crate::input::Input;
use crate::physics::WorldBounds;
use crate::player::Player;

// ============================================================================
// Game Context
// ============================================================================

/// World state the player reads and writes during its update.
#[derive(Debug)]
pub struct GameContext {
    /// World extents
    world: WorldBounds,
    /// Scroll rate at multiplier 1
    max_speed: f32,
    /// Current scroll rate
    speed: f32,
    /// Enemies defeated
    score: u32,
    /// Live enemies, in spawn order
    enemies: Vec<Enemy>,
    /// Live collision effects
    effects: Vec<CollisionEffect>,
    /// Draw debug outlines
    debug: bool,
    /// Frame events
    events: EventBus,
    /// Randomness for effect sizes
    rng: fastrand::Rng,
}

impl GameContext {
    /// Create an empty context from the world config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::from_rng(config, fastrand::Rng::new())
    }

    /// Create an empty context with a deterministic random source.
    #[must_use]
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::from_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn from_rng(config: &GameConfig, rng: fastrand::Rng) -> Self {
        Self {
            world: WorldBounds::from_config(&config.world),
            max_speed: config.world.max_speed,
            speed: 0.0,
            score: 0,
            enemies: Vec::new(),
            effects: Vec::new(),
            debug: config.debug,
            events: EventBus::default(),
            rng,
        }
    }

    /// World extents.
    #[must_use]
    pub const fn world(&self) -> &WorldBounds {
        &self.world
    }

    /// Scroll rate at multiplier 1.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Current scroll rate.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Enemies defeated so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Add to the score and return the new total.
    pub(crate) fn add_score(&mut self, points: u32) -> u32 {
        self.score += points;
        self.score
    }

    /// Whether debug outlines are drawn.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Live enemies.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Add an enemy to the level.
    pub fn add_enemy(&mut self, enemy: Enemy) -> EntityId {
        let id = enemy.id();
        trace!(%id, kind = ?enemy.kind(), x = enemy.position().x, "enemy spawned");
        self.enemies.push(enemy);
        self.publish(GameEvent::EnemySpawned { enemy: id });
        id
    }

    /// Live collision effects.
    #[must_use]
    pub fn effects(&self) -> &[CollisionEffect] {
        &self.effects
    }

    pub(crate) fn spawn_effect(&mut self, effect: CollisionEffect) {
        self.effects.push(effect);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    /// Publish an event for this frame.
    pub fn publish(&self, event: GameEvent) {
        self.events.publish(event);
    }

    /// Take all events published since the last drain.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Move enemies and effects by the current scroll and advance effects.
    fn scroll(&mut self, delta_ms: f32) {
        let speed = self.speed;
        for enemy in &mut self.enemies {
            enemy.scroll(speed);
        }
        for effect in &mut self.effects {
            effect.update(delta_ms, speed);
        }
    }

    /// Drop every flagged enemy and effect. Returns how many enemies went.
    fn sweep(&mut self) -> usize {
        let events = &self.events;
        let before = self.enemies.len();
        self.enemies.retain(|enemy| {
            if enemy.is_marked_for_deletion() {
                events.publish(GameEvent::EnemyRemoved { enemy: enemy.id() });
                false
            } else {
                true
            }
        });
        self.effects.retain(|effect| !effect.is_marked_for_deletion());
        before - self.enemies.len()
    }
}

// ============================================================================
// Session
// ============================================================================

/// A running level.
#[derive(Debug)]
pub struct Session {
    /// The player
    player: Player,
    /// World state
    ctx: GameContext,
    /// Updates are ignored while paused
    paused: bool,
    /// Frames simulated
    frame: u64,
}

impl Session {
    /// Start a level.
    ///
    /// # Panics
    ///
    /// Panics if the player does not fit the world; use [`Session::try_new`]
    /// for untrusted config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::from_context(config, GameContext::new(config))
    }

    /// Start a level with a deterministic random source.
    #[must_use]
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::from_context(config, GameContext::with_seed(config, seed))
    }

    /// Validate `config`, then start a level.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in `config`.
    pub fn try_new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self::with_seed(config, seed))
    }

    fn from_context(config: &GameConfig, mut ctx: GameContext) -> Self {
        let player = Player::new(&config.player, &mut ctx);
        Self {
            player,
            ctx,
            paused: false,
            frame: 0,
        }
    }

    /// Simulate one frame.
    pub fn update(&mut self, input: &Input, delta_ms: f32) {
        if self.paused {
            return;
        }
        self.frame += 1;

        self.player.update(input, delta_ms, &mut self.ctx);
        self.ctx.scroll(delta_ms);
        let removed = self.ctx.sweep();

        if removed > 0 {
            debug!(
                frame = self.frame,
                removed,
                remaining = self.ctx.enemies.len(),
                "enemies swept"
            );
        }
    }

    /// Add an enemy to the level.
    pub fn spawn_enemy(&mut self, enemy: Enemy) -> EntityId {
        self.ctx.add_enemy(enemy)
    }

    /// Flip debug outlines; returns the new setting.
    pub fn toggle_debug(&mut self) -> bool {
        self.ctx.debug = !self.ctx.debug;
        debug!(debug = self.ctx.debug, "debug outlines toggled");
        self.ctx.debug
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether updates are ignored.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames simulated so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// World state.
    #[must_use]
    pub const fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Enemies defeated so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.ctx.score()
    }

    /// Player sprite for the renderer, outlined in debug mode.
    #[must_use]
    pub fn player_sprite(&self) -> SpriteFrame {
        self.player.sprite_frame(self.ctx.debug())
    }

    /// Effect sprites for the renderer.
    #[must_use]
    pub fn effect_sprites(&self) -> Vec<SpriteFrame> {
        self.ctx.effects().iter().map(CollisionEffect::sprite_frame).collect()
    }

    /// Take all events published since the last drain.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.ctx.drain_events()
    }
}
