//! # Runner Gameplay
//!
//! Player controller for a side-scrolling runner.
//!
//! This crate provides the frame-by-frame core of the game:
//! - Input actions and key bindings
//! - Player state machine (sit, run, jump, fall, roll, dive, hit)
//! - Motion integration against the world bounds
//! - Player versus enemy collision and scoring
//! - Sprite animation timing
//! - Session context with deferred entity removal
//! - Event bus for reporting what happened each frame
//!
//! Nothing here draws or plays sound; renderers consume [`SpriteFrame`]s and
//! drained [`GameEvent`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod animation;
pub mod collision;
pub mod config;
pub mod effects;
pub mod enemy;
pub mod events;
pub mod input;
pub mod physics;
pub mod player;
pub mod player_state;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::animation::*;
    pub use crate::collision::CollisionReport;
    pub use crate::config::*;
    pub use crate::effects::*;
    pub use crate::enemy::*;
    pub use crate::events::*;
    pub use crate::input::*;
    pub use crate::physics::*;
    pub use crate::player::*;
    pub use crate::player_state::*;
    pub use crate::session::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_session_roundtrip() {
        let mut session = Session::with_seed(&GameConfig::default(), 5);
        let input = Input::from_actions([Action::MoveRight]);
        session.update(&input, 16.0);

        assert_eq!(session.player().state(), PlayerState::Running);
        assert!(!session.drain_events().is_empty());
    }

    #[test]
    fn test_tokens_drive_player() {
        let mut session = Session::with_seed(&GameConfig::default(), 5);
        let input = Input::from_tokens(&["ArrowRight", "ArrowDown"]).unwrap_or_default();
        session.update(&input, 16.0);
        session.update(&input, 16.0);

        assert!(session.player().state().is_rolling());
    }
}
