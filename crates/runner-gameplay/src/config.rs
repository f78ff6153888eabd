//! Gameplay tunables.
//!
//! Everything here is plain data with `serde` support so the engine can load it
//! from its config file. [`GameConfig::check`] rejects values the simulation
//! cannot run with; the constructors in the core assert the same conditions.

use runner_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Player tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite/collision width
    pub width: f32,
    /// Sprite/collision height
    pub height: f32,
    /// Horizontal speed while a direction is held (units per frame)
    pub max_speed: f32,
    /// Gravity added to vertical velocity every airborne frame
    pub weight: f32,
    /// Upward velocity change of a jump
    pub jump_impulse: f32,
    /// Downward velocity set when a dive starts
    pub dive_speed: f32,
    /// Upward velocity given when a dive hits the ground
    pub dive_bounce: f32,
    /// Sprite animation rate
    pub fps: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 91.5,
            max_speed: 10.0,
            weight: 1.0,
            jump_impulse: 30.0,
            dive_speed: 15.0,
            dive_bounce: 12.0,
            fps: 20.0,
        }
    }
}

/// World geometry and scroll tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible world width
    pub width: f32,
    /// Visible world height
    pub height: f32,
    /// Distance from the bottom edge to the ground line
    pub ground_margin: f32,
    /// Scroll speed at multiplier 1
    pub max_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            ground_margin: 80.0,
            max_speed: 3.0,
        }
    }
}

/// Complete gameplay configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player tunables
    pub player: PlayerConfig,
    /// World tunables
    pub world: WorldConfig,
    /// Start with the debug outline enabled
    pub debug: bool,
}

impl GameConfig {
    /// Check that the configuration can be simulated.
    pub fn check(&self) -> Result<(), ConfigError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.fps", self.player.fps)?;
        non_negative("world.ground_margin", self.world.ground_margin)?;
        non_negative("world.max_speed", self.world.max_speed)?;
        non_negative("player.max_speed", self.player.max_speed)?;
        non_negative("player.weight", self.player.weight)?;
        non_negative("player.jump_impulse", self.player.jump_impulse)?;
        non_negative("player.dive_speed", self.player.dive_speed)?;
        non_negative("player.dive_bounce", self.player.dive_bounce)?;

        if self.player.width > self.world.width
            || self.player.height + self.world.ground_margin > self.world.height
        {
            return Err(ConfigError::PlayerDoesNotFit {
                player_width: self.player.width,
                player_height: self.player.height,
                world_width: self.world.width,
                world_height: self.world.height,
                ground_margin: self.world.ground_margin,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
