//! Player motion integration and collision geometry.
//!
//! Motion is integrated per rendered frame (velocities are in units per frame,
//! not per second). Y grows downward; the ground line is the largest `y` the
//! player's top edge may reach.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{PlayerConfig, WorldConfig};
use crate::input::{Input, Vec2};

/// Axis-aligned bounding box for collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum X coordinate (left)
    pub min_x: f32,
    /// Minimum Y coordinate (top)
    pub min_y: f32,
    /// Maximum X coordinate (right)
    pub max_x: f32,
    /// Maximum Y coordinate (bottom)
    pub max_y: f32,
}

impl AABB {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates an AABB from a top-left corner and a size.
    #[must_use]
    pub fn from_rect(position: Vec2, size: Vec2) -> Self {
        Self {
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.x,
            max_y: position.y + size.y,
        }
    }

    /// Returns the center of the AABB.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.min_x + self.width() * 0.5,
            self.min_y + self.height() * 0.5,
        )
    }

    /// Returns the width of the AABB.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the AABB.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Checks if this AABB overlaps with another. Touching edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// Fixed world geometry for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    width: f32,
    height: f32,
    ground_margin: f32,
}

impl WorldBounds {
    /// Create world bounds.
    ///
    /// # Panics
    ///
    /// Panics on non-positive dimensions or a negative ground margin.
    #[must_use]
    pub fn new(width: f32, height: f32, ground_margin: f32) -> Self {
        assert!(width > 0.0, "world width must be positive, got {width}");
        assert!(height > 0.0, "world height must be positive, got {height}");
        assert!(
            ground_margin >= 0.0 && ground_margin < height,
            "ground margin must be in [0, {height}), got {ground_margin}"
        );
        Self {
            width,
            height,
            ground_margin,
        }
    }

    /// Bounds described by a [`WorldConfig`].
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.width, config.height, config.ground_margin)
    }

    /// World width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// World height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Distance between the ground line and the bottom edge.
    #[must_use]
    pub const fn ground_margin(&self) -> f32 {
        self.ground_margin
    }

    /// Top-edge `y` at which a body of `body_height` stands on the ground.
    #[must_use]
    pub fn ground_y(&self, body_height: f32) -> f32 {
        self.height - body_height - self.ground_margin
    }

    /// Largest top-left `x` a body of `body_width` may occupy.
    #[must_use]
    pub fn max_x(&self, body_width: f32) -> f32 {
        self.width - body_width
    }

    /// Whether a body with top edge `y` is on (or below) the ground line.
    #[must_use]
    pub fn is_on_ground(&self, y: f32, body_height: f32) -> bool {
        y >= self.ground_y(body_height)
    }
}

/// Horizontal and vertical motion state of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Horizontal delta applied this frame
    speed: f32,
    /// Vertical velocity (positive = down)
    vy: f32,
    /// Horizontal speed while a direction is held
    max_speed: f32,
    /// Gravity per airborne frame
    weight: f32,
    /// Jump velocity change
    jump_impulse: f32,
}

impl Motion {
    /// Create resting motion from player tunables.
    #[must_use]
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            speed: 0.0,
            vy: 0.0,
            max_speed: config.max_speed,
            weight: config.weight,
            jump_impulse: config.jump_impulse,
        }
    }

    /// Horizontal delta for this frame. Right wins over left; a locked body
    /// does not move.
    #[must_use]
    pub fn resolve_speed(&self, input: &Input, locked: bool) -> f32 {
        if locked {
            0.0
        } else if input.right() {
            self.max_speed
        } else if input.left() {
            -self.max_speed
        } else {
            0.0
        }
    }

    /// Advance `position` by one frame and clamp it to the world.
    ///
    /// `locked` freezes horizontal movement (hit reaction).
    pub fn integrate(
        &mut self,
        position: &mut Vec2,
        size: Vec2,
        input: &Input,
        locked: bool,
        world: &WorldBounds,
    ) {
        // Horizontal
        self.speed = self.resolve_speed(input, locked);
        position.x = (position.x + self.speed).clamp(0.0, world.max_x(size.x));

        // Vertical
        position.y += self.vy;
        if input.jump() && world.is_on_ground(position.y, size.y) {
            self.vy -= self.jump_impulse;
        }
        if world.is_on_ground(position.y, size.y) {
            self.vy = 0.0;
        } else {
            self.vy += self.weight;
        }

        let ground = world.ground_y(size.y);
        if position.y > ground {
            position.y = ground;
        }

        trace!(
            x = position.x,
            y = position.y,
            speed = self.speed,
            vy = self.vy,
            "motion integrated"
        );
    }

    /// Horizontal delta applied on the last frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Vertical velocity.
    #[must_use]
    pub const fn vy(&self) -> f32 {
        self.vy
    }

    /// Overwrite the vertical velocity.
    pub fn set_vy(&mut self, vy: f32) {
        self.vy = vy;
    }

    /// Add to the vertical velocity.
    pub fn add_vy(&mut self, delta: f32) {
        self.vy += delta;
    }

    /// Horizontal speed while a direction is held.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Gravity per airborne frame.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Jump velocity change.
    #[must_use]
    pub const fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    const SIZE: Vec2 = Vec2::new(100.0, 91.5);

    fn world() -> WorldBounds {
        WorldBounds::new(900.0, 500.0, 80.0)
    }

    fn motion() -> Motion {
        Motion::new(&PlayerConfig::default())
    }

    #[test]
    fn test_aabb_overlap() {
        let a = AABB::new(0.0, 0.0, 10.0, 10.0);
        let b = AABB::new(5.0, 5.0, 15.0, 15.0);
        let c = AABB::new(10.0, 0.0, 20.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_from_rect() {
        let aabb = AABB::from_rect(Vec2::new(420.0, 328.5), Vec2::new(40.0, 40.0));
        assert_eq!(aabb.max_x, 460.0);
        assert_eq!(aabb.center(), Vec2::new(440.0, 348.5));
        assert_eq!(aabb.width(), 40.0);
        assert_eq!(aabb.height(), 40.0);
    }

    #[test]
    fn test_ground_line() {
        let world = world();
        assert_eq!(world.ground_y(SIZE.y), 328.5);
        assert_eq!(world.max_x(SIZE.x), 800.0);
        assert!(world.is_on_ground(328.5, SIZE.y));
        assert!(!world.is_on_ground(300.0, SIZE.y));
    }

    #[test]
    #[should_panic(expected = "world width must be positive")]
    fn test_negative_world_panics() {
        let _ = WorldBounds::new(-1.0, 500.0, 80.0);
    }

    #[test]
    fn test_resolve_speed() {
        let m = motion();
        let right = Input::new().with(Action::MoveRight);
        let left = Input::new().with(Action::MoveLeft);
        assert_eq!(m.resolve_speed(&right, false), 10.0);
        assert_eq!(m.resolve_speed(&left, false), -10.0);
        assert_eq!(m.resolve_speed(&right.with(Action::MoveLeft), false), 10.0);
        assert_eq!(m.resolve_speed(&right, true), 0.0);
        assert_eq!(m.resolve_speed(&Input::new(), false), 0.0);
    }

    #[test]
    fn test_horizontal_clamp() {
        let world = world();
        let mut m = motion();

        let mut pos = Vec2::new(5.0, world.ground_y(SIZE.y));
        m.integrate(&mut pos, SIZE, &Input::new().with(Action::MoveLeft), false, &world);
        assert_eq!(pos.x, 0.0);

        let mut pos = Vec2::new(795.0, world.ground_y(SIZE.y));
        m.integrate(&mut pos, SIZE, &Input::new().with(Action::MoveRight), false, &world);
        assert_eq!(pos.x, 800.0);
    }

    #[test]
    fn test_gravity_when_airborne() {
        let world = world();
        let mut m = motion();
        let mut pos = Vec2::new(0.0, 100.0);

        m.integrate(&mut pos, SIZE, &Input::new(), false, &world);
        assert_eq!(m.vy(), 1.0);
        m.integrate(&mut pos, SIZE, &Input::new(), false, &world);
        assert_eq!(m.vy(), 2.0);
        assert_eq!(pos.y, 101.0);
    }

    #[test]
    fn test_ground_clamp_zeroes_velocity() {
        let world = world();
        let mut m = motion();
        m.set_vy(50.0);
        let mut pos = Vec2::new(0.0, 300.0);

        m.integrate(&mut pos, SIZE, &Input::new(), false, &world);
        assert_eq!(pos.y, world.ground_y(SIZE.y));
        assert_eq!(m.vy(), 0.0);
    }

    #[test]
    fn test_upward_velocity_moves_up() {
        let world = world();
        let mut m = motion();
        m.set_vy(-30.0);
        let mut pos = Vec2::new(0.0, world.ground_y(SIZE.y));

        m.integrate(&mut pos, SIZE, &Input::new(), false, &world);
        assert_eq!(pos.y, world.ground_y(SIZE.y) - 30.0);
        assert_eq!(m.vy(), -29.0);
    }
}
