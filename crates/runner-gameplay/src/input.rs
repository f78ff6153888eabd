//! Input handling for player controls.
//!
//! Raw key state is tracked by [`InputManager`], mapped through rebindable
//! [`KeyBinding`]s to [`Action`]s, and handed to the gameplay core as an
//! immutable per-frame [`Input`] (the set of held actions).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur in the input system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Token does not name any action
    #[error("unknown input token: {0}")]
    UnknownToken(String),
}

/// 2D vector for positions and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale the vector by a scalar.
    #[must_use]
    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Key codes the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space bar
    Space,
}

/// Game actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move left
    MoveLeft,
    /// Move right
    MoveRight,
    /// Jump (also "up")
    Jump,
    /// Crouch / roll / dive
    MoveDown,
}

impl Action {
    /// All actions in declaration order.
    pub const ALL: [Self; 4] = [Self::MoveLeft, Self::MoveRight, Self::Jump, Self::MoveDown];

    const fn bit(self) -> u8 {
        match self {
            Self::MoveLeft => 1 << 0,
            Self::MoveRight => 1 << 1,
            Self::Jump => 1 << 2,
            Self::MoveDown => 1 << 3,
        }
    }

    /// Canonical token name.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::MoveLeft => "left",
            Self::MoveRight => "right",
            Self::Jump => "jump",
            Self::MoveDown => "down",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Action {
    type Err = InputError;

    /// Accepts the canonical tokens as well as the browser key names
    /// (`ArrowLeft`, `ArrowRight`, `ArrowUp`, `ArrowDown`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "ArrowLeft" => Ok(Self::MoveLeft),
            "right" | "ArrowRight" => Ok(Self::MoveRight),
            "jump" | "up" | "ArrowUp" => Ok(Self::Jump),
            "down" | "ArrowDown" => Ok(Self::MoveDown),
            other => Err(InputError::UnknownToken(other.to_string())),
        }
    }
}

/// Set of actions held during one frame.
///
/// The gameplay core only ever reads this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    held: u8,
}

impl Input {
    /// Create an empty input (nothing held).
    #[must_use]
    pub const fn new() -> Self {
        Self { held: 0 }
    }

    /// Input with the given actions held.
    #[must_use]
    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        actions.into_iter().fold(Self::new(), Self::with)
    }

    /// Parse a list of tokens into an input set.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, InputError> {
        tokens.iter().try_fold(Self::new(), |input, token| {
            Ok(input.with(token.as_ref().parse()?))
        })
    }

    /// Returns a copy with `action` held.
    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self {
            held: self.held | action.bit(),
        }
    }

    /// Check if an action is held.
    #[must_use]
    pub const fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Move left held.
    #[must_use]
    pub const fn left(&self) -> bool {
        self.is_held(Action::MoveLeft)
    }

    /// Move right held.
    #[must_use]
    pub const fn right(&self) -> bool {
        self.is_held(Action::MoveRight)
    }

    /// Jump held.
    #[must_use]
    pub const fn jump(&self) -> bool {
        self.is_held(Action::Jump)
    }

    /// Move down held.
    #[must_use]
    pub const fn down(&self) -> bool {
        self.is_held(Action::MoveDown)
    }

    /// Check if any horizontal input is held.
    #[must_use]
    pub const fn has_horizontal(&self) -> bool {
        self.left() || self.right()
    }

    /// Check if nothing is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.held == 0
    }

    /// Iterate the held actions.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.is_held(*a))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, action) in self.actions().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{action}")?;
        }
        f.write_str("]")
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: KeyCode,
    /// Optional secondary key
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Check if a key matches this binding.
    #[must_use]
    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Input manager that tracks raw keys and converts them to game actions.
#[derive(Debug)]
pub struct InputManager {
    /// Keys currently held down
    held_keys: HashSet<KeyCode>,
    /// Action to key bindings
    bindings: HashMap<Action, KeyBinding>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create a new input manager with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            held_keys: HashSet::new(),
            bindings: HashMap::new(),
        };
        manager.set_default_bindings();
        manager
    }

    /// Set default key bindings (arrows first, WASD/Space second).
    pub fn set_default_bindings(&mut self) {
        self.bindings.clear();
        self.bindings.insert(
            Action::MoveLeft,
            KeyBinding::with_secondary(KeyCode::ArrowLeft, KeyCode::A),
        );
        self.bindings.insert(
            Action::MoveRight,
            KeyBinding::with_secondary(KeyCode::ArrowRight, KeyCode::D),
        );
        self.bindings.insert(
            Action::Jump,
            KeyBinding::with_secondary(KeyCode::ArrowUp, KeyCode::Space),
        );
        self.bindings.insert(
            Action::MoveDown,
            KeyBinding::with_secondary(KeyCode::ArrowDown, KeyCode::S),
        );
    }

    /// Rebind an action to a new key.
    pub fn rebind(&mut self, action: Action, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    /// Get the current binding for an action.
    #[must_use]
    pub fn get_binding(&self, action: Action) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Update a key state.
    pub fn update_key(&mut self, key: KeyCode, is_pressed: bool) {
        if is_pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// Release every key (focus lost, level restart).
    pub fn release_all(&mut self) {
        self.held_keys.clear();
    }

    /// Check if a key is currently pressed.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Check if an action is currently active.
    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|binding| self.held_keys.iter().any(|key| binding.matches(*key)))
    }

    /// Process raw key state into the per-frame [`Input`].
    #[must_use]
    pub fn process(&self) -> Input {
        Input::from_actions(
            Action::ALL
                .into_iter()
                .filter(|action| self.is_action_pressed(*action)),
        )
    }
}
