//! Player behaviour states.
//!
//! The set of states is closed, so they are one enum. Each variant provides an
//! `enter` hook (sprite row, frame bounds, optional velocity change) and a
//! `handle_input` hook that decides the next transition. States carry no data;
//! everything mutable lives on [`crate::player::Player`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::animation::AnimationClock;
use crate::config::PlayerConfig;
use crate::input::Input;
use crate::physics::Motion;

/// Scroll multiplier used when the world stands still.
pub const SCROLL_STOP: f32 = 0.0;
/// Scroll multiplier for normal running.
pub const SCROLL_RUN: f32 = 1.0;
/// Scroll multiplier while rolling.
pub const SCROLL_ROLL: f32 = 2.0;

/// Behaviour state of the player. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Idle on the ground
    #[default]
    Sitting,
    /// Running along the ground
    Running,
    /// Rising after a jump
    Jumping,
    /// Descending
    Falling,
    /// Rolling attack
    Rolling,
    /// Downward dive attack
    Diving,
    /// Hit reaction after touching an enemy
    Hit,
}

/// Sprite-sheet row used by a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRow {
    /// Row index (frameY)
    pub row: u32,
    /// Last column index in the row
    pub max_frame: u32,
}

/// Requested transition returned by [`PlayerState::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateChange {
    /// State to enter
    pub state: PlayerState,
    /// Scroll speed multiplier applied on entry
    pub speed_multiplier: f32,
    /// Apply the dive bounce before entering
    pub bounce: bool,
}

impl StateChange {
    /// Plain transition.
    #[must_use]
    pub const fn to(state: PlayerState, speed_multiplier: f32) -> Self {
        Self {
            state,
            speed_multiplier,
            bounce: false,
        }
    }

    /// Transition that first bounces the player upward.
    #[must_use]
    pub const fn bounce_to(state: PlayerState, speed_multiplier: f32) -> Self {
        Self {
            state,
            speed_multiplier,
            bounce: true,
        }
    }
}

/// Facts about the player a state needs to pick its next transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateView {
    /// Player stands on the ground line
    pub on_ground: bool,
    /// Vertical velocity
    pub vy: f32,
    /// Gravity per frame
    pub weight: f32,
    /// The state's animation reached its last frame
    pub animation_done: bool,
}

impl PlayerState {
    /// All states in slot order.
    pub const ALL: [Self; 7] = [
        Self::Sitting,
        Self::Running,
        Self::Jumping,
        Self::Falling,
        Self::Rolling,
        Self::Diving,
        Self::Hit,
    ];

    /// Slot index of this state.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// State stored at slot `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sitting => "SITTING",
            Self::Running => "RUNNING",
            Self::Jumping => "JUMPING",
            Self::Falling => "FALLING",
            Self::Rolling => "ROLLING",
            Self::Diving => "DIVING",
            Self::Hit => "HIT",
        }
    }

    /// Rolling attack is active.
    #[must_use]
    pub const fn is_rolling(self) -> bool {
        matches!(self, Self::Rolling)
    }

    /// Dive attack is active.
    #[must_use]
    pub const fn is_diving(self) -> bool {
        matches!(self, Self::Diving)
    }

    /// Hit reaction is playing.
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Touching an enemy in this state defeats it instead of hurting the
    /// player.
    #[must_use]
    pub const fn is_attacking(self) -> bool {
        self.is_rolling() || self.is_diving()
    }

    /// Horizontal input is ignored.
    #[must_use]
    pub const fn locks_movement(self) -> bool {
        self.is_hit()
    }

    /// Sprite row and frame count for this state.
    #[must_use]
    pub const fn animation(self) -> AnimationRow {
        let (row, max_frame) = match self {
            Self::Sitting => (5, 4),
            Self::Running => (3, 8),
            Self::Jumping => (1, 6),
            Self::Falling => (2, 6),
            Self::Rolling | Self::Diving => (6, 6),
            Self::Hit => (4, 10),
        };
        AnimationRow { row, max_frame }
    }

    /// Entry hook: select the sprite row and apply entry velocity.
    pub fn enter(
        self,
        clock: &mut AnimationClock,
        motion: &mut Motion,
        on_ground: bool,
        config: &PlayerConfig,
    ) {
        let AnimationRow { row, max_frame } = self.animation();
        clock.set_row(row, max_frame);

        match self {
            Self::Jumping if on_ground => motion.add_vy(-config.jump_impulse),
            Self::Diving => motion.set_vy(config.dive_speed),
            _ => {},
        }
    }

    /// Input hook: pick the next state, if any.
    #[must_use]
    pub fn handle_input(self, input: &Input, view: &StateView) -> Option<StateChange> {
        match self {
            Self::Sitting => input
                .has_horizontal()
                .then_some(StateChange::to(Self::Running, SCROLL_RUN)),
            Self::Running => {
                if input.jump() {
                    Some(StateChange::to(Self::Jumping, SCROLL_RUN))
                } else if input.down() {
                    Some(StateChange::to(Self::Rolling, SCROLL_ROLL))
                } else if !input.has_horizontal() && view.on_ground {
                    Some(StateChange::to(Self::Sitting, SCROLL_STOP))
                } else {
                    None
                }
            },
            Self::Jumping => {
                if view.on_ground {
                    Some(StateChange::to(Self::Running, SCROLL_RUN))
                } else if input.down() {
                    Some(StateChange::to(Self::Diving, SCROLL_STOP))
                } else if view.vy > view.weight {
                    Some(StateChange::to(Self::Falling, SCROLL_RUN))
                } else {
                    None
                }
            },
            Self::Falling => view
                .on_ground
                .then_some(StateChange::to(Self::Running, SCROLL_RUN)),
            Self::Rolling => {
                if input.jump() {
                    Some(StateChange::to(Self::Diving, SCROLL_STOP))
                } else if input.down() {
                    None
                } else if input.has_horizontal() {
                    Some(StateChange::to(Self::Running, SCROLL_RUN))
                } else {
                    Some(StateChange::to(Self::Sitting, SCROLL_STOP))
                }
            },
            Self::Diving => view
                .on_ground
                .then_some(StateChange::bounce_to(Self::Running, SCROLL_RUN)),
            Self::Hit => view
                .animation_done
                .then_some(StateChange::to(Self::Falling, SCROLL_RUN)),
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    const GROUNDED: StateView = StateView {
        on_ground: true,
        vy: 0.0,
        weight: 1.0,
        animation_done: false,
    };

    const RISING: StateView = StateView {
        on_ground: false,
        vy: -10.0,
        weight: 1.0,
        animation_done: false,
    };

    fn keys(actions: &[Action]) -> Input {
        Input::from_actions(actions.iter().copied())
    }

    fn next(state: PlayerState, input: &[Action], view: &StateView) -> Option<PlayerState> {
        state.handle_input(&keys(input), view).map(|c| c.state)
    }

    #[test]
    fn test_slot_order() {
        for (i, state) in PlayerState::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
            assert_eq!(PlayerState::from_index(i), Some(*state));
        }
        assert_eq!(PlayerState::Hit.index(), 6);
        assert_eq!(PlayerState::from_index(7), None);
    }

    #[test]
    fn test_capability_queries() {
        assert!(PlayerState::Rolling.is_rolling());
        assert!(PlayerState::Diving.is_diving());
        assert!(PlayerState::Hit.is_hit());
        assert!(PlayerState::Rolling.is_attacking());
        assert!(PlayerState::Diving.is_attacking());
        assert!(!PlayerState::Running.is_attacking());
        assert!(PlayerState::Hit.locks_movement());
        assert!(!PlayerState::Jumping.locks_movement());
    }

    #[test]
    fn test_sitting_transitions() {
        use PlayerState::*;
        assert_eq!(next(Sitting, &[], &GROUNDED), None);
        assert_eq!(next(Sitting, &[Action::MoveDown], &GROUNDED), None);
        assert_eq!(next(Sitting, &[Action::MoveRight], &GROUNDED), Some(Running));
        assert_eq!(next(Sitting, &[Action::MoveLeft], &GROUNDED), Some(Running));
    }

    #[test]
    fn test_running_transitions() {
        use PlayerState::*;
        assert_eq!(next(Running, &[Action::MoveRight], &GROUNDED), None);
        assert_eq!(
            next(Running, &[Action::MoveRight, Action::Jump], &GROUNDED),
            Some(Jumping)
        );
        assert_eq!(next(Running, &[Action::MoveDown], &GROUNDED), Some(Rolling));
        assert_eq!(next(Running, &[], &GROUNDED), Some(Sitting));
        // Airborne with nothing held keeps running
        assert_eq!(next(Running, &[], &RISING), None);
    }

    #[test]
    fn test_running_speed_multipliers() {
        let roll = PlayerState::Running
            .handle_input(&keys(&[Action::MoveDown]), &GROUNDED)
            .expect("roll transition");
        assert_eq!(roll.speed_multiplier, SCROLL_ROLL);

        let sit = PlayerState::Running
            .handle_input(&Input::new(), &GROUNDED)
            .expect("sit transition");
        assert_eq!(sit.speed_multiplier, SCROLL_STOP);
    }

    #[test]
    fn test_jumping_transitions() {
        use PlayerState::*;
        assert_eq!(next(Jumping, &[], &RISING), None);
        assert_eq!(next(Jumping, &[Action::MoveDown], &RISING), Some(Diving));
        assert_eq!(next(Jumping, &[Action::MoveDown], &GROUNDED), Some(Running));

        let descending = StateView { vy: 2.0, ..RISING };
        assert_eq!(next(Jumping, &[], &descending), Some(Falling));
    }

    #[test]
    fn test_falling_transitions() {
        use PlayerState::*;
        assert_eq!(next(Falling, &[Action::MoveRight], &RISING), None);
        assert_eq!(next(Falling, &[], &GROUNDED), Some(Running));
    }

    #[test]
    fn test_rolling_transitions() {
        use PlayerState::*;
        assert_eq!(next(Rolling, &[Action::MoveDown], &GROUNDED), None);
        assert_eq!(
            next(Rolling, &[Action::MoveDown, Action::Jump], &GROUNDED),
            Some(Diving)
        );
        assert_eq!(next(Rolling, &[Action::MoveRight], &GROUNDED), Some(Running));
        assert_eq!(next(Rolling, &[], &GROUNDED), Some(Sitting));
    }

    #[test]
    fn test_diving_lands_with_bounce() {
        assert_eq!(PlayerState::Diving.handle_input(&Input::new(), &RISING), None);

        let change = PlayerState::Diving
            .handle_input(&Input::new(), &GROUNDED)
            .expect("landing transition");
        assert_eq!(change.state, PlayerState::Running);
        assert!(change.bounce);
    }

    #[test]
    fn test_hit_waits_for_animation() {
        use PlayerState::*;
        assert_eq!(next(Hit, &[Action::MoveRight], &GROUNDED), None);

        let done = StateView {
            animation_done: true,
            ..GROUNDED
        };
        assert_eq!(next(Hit, &[], &done), Some(Falling));
    }

    #[test]
    fn test_enter_sets_row_and_velocity() {
        let config = PlayerConfig::default();
        let mut clock = AnimationClock::new(config.fps, 4);
        let mut motion = Motion::new(&config);

        PlayerState::Jumping.enter(&mut clock, &mut motion, true, &config);
        assert_eq!(clock.frame_y(), 1);
        assert_eq!(clock.max_frame(), 6);
        assert_eq!(motion.vy(), -config.jump_impulse);

        // No impulse when already airborne
        motion.set_vy(0.0);
        PlayerState::Jumping.enter(&mut clock, &mut motion, false, &config);
        assert_eq!(motion.vy(), 0.0);

        PlayerState::Diving.enter(&mut clock, &mut motion, false, &config);
        assert_eq!(motion.vy(), config.dive_speed);

        PlayerState::Hit.enter(&mut clock, &mut motion, true, &config);
        assert_eq!(clock.frame_y(), 4);
        assert_eq!(clock.max_frame(), 10);
        assert_eq!(clock.frame_x(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerState::Rolling.to_string(), "ROLLING");
    }
}
