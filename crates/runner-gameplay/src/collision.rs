//! Player versus enemy contact resolution.
//!
//! One pass over the enemy list: every live enemy overlapping the player is
//! flagged for deletion and leaves an effect behind. Whether the contact
//! scores or hurts depends on the player's state at the start of the pass.
//! Nothing is removed here; the session sweeps flagged entities afterwards.

use tracing::debug;

use crate::effects::CollisionEffect;
use crate::events::GameEvent;
use crate::physics::AABB;
use crate::player_state::PlayerState;
use crate::session::GameContext;

/// What one collision pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies defeated by an attack
    pub kills: u32,
    /// Enemies that hit the player
    pub hits: u32,
}

impl CollisionReport {
    /// No enemy was touched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kills == 0 && self.hits == 0
    }

    /// The player must switch to the hit reaction.
    #[must_use]
    pub const fn player_hit(&self) -> bool {
        self.hits > 0
    }
}

/// Resolve contacts between `player` and every enemy in `ctx`.
///
/// `state` is the player's state when the pass starts; the caller switches
/// to the hit reaction afterwards when [`CollisionReport::player_hit`] is set.
pub fn detect(player: &AABB, state: PlayerState, ctx: &mut GameContext) -> CollisionReport {
    let mut report = CollisionReport::default();
    let attacking = state.is_attacking();
    let mut contacts = Vec::new();

    for enemy in ctx.enemies_mut() {
        if enemy.is_marked_for_deletion() || !enemy.bounds().overlaps(player) {
            continue;
        }
        enemy.mark_for_deletion();
        contacts.push((enemy.id(), enemy.center()));
    }

    for (enemy, center) in contacts {
        let effect = CollisionEffect::new(center, ctx.rng_mut());
        ctx.spawn_effect(effect);

        if attacking {
            report.kills += 1;
            let score = ctx.add_score(1);
            debug!(%enemy, score, "enemy defeated");
            ctx.publish(GameEvent::EnemyDefeated {
                enemy,
                position: center,
                score,
            });
        } else {
            report.hits += 1;
            debug!(%enemy, "player hit");
            ctx.publish(GameEvent::PlayerHit { enemy });
        }
    }

    report
}
