//! Death classification.
//!
//! Pure decision logic: given one [`DeathOccurrence`], decide whether it
//! is a player-vs-player kill worth announcing and recording, a landmine
//! trap kill worth announcing only, or nothing at all. All side effects
//! (chat, event publishing) happen in the dispatcher.

use crate::engine::{Actor, Attacker, DeathOccurrence};

/// Result of classifying a single death.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Confirmed player-vs-player kill. Distance is pre-rounded to two
    /// decimal places; weapon is the short prefab name (empty if unknown).
    PlayerKill {
        victim: Actor,
        killer: Actor,
        distance: f32,
        headshot: bool,
        weapon: String,
    },
    /// Landmine trap kill. Announced but never recorded.
    TrapKill { victim: Actor },
    /// Suicide, NPC involvement, non-landmine trap, or unresolvable
    /// killer. Produces no output whatsoever.
    Ignored,
}

/// Classifies one death occurrence.
///
/// The checks run in a fixed order because the categories overlap: a trap
/// death also carries an initiator, so the trap branch must win first.
pub fn classify(occurrence: &DeathOccurrence) -> Outcome {
    if let Some(Attacker::Trap { short_name }) = &occurrence.last_attacker {
        // Only landmine-class traps are announced; every other trap
        // death is dropped on purpose.
        if short_name.contains("landmine") {
            return Outcome::TrapKill {
                victim: occurrence.victim.clone(),
            };
        }
        return Outcome::Ignored;
    }

    let killer = match &occurrence.initiator {
        Some(k) => k,
        None => return Outcome::Ignored,
    };
    if killer.id == occurrence.victim.id {
        return Outcome::Ignored;
    }
    if occurrence.victim.is_npc || killer.is_npc {
        return Outcome::Ignored;
    }

    Outcome::PlayerKill {
        victim: occurrence.victim.clone(),
        killer: killer.clone(),
        distance: round_distance(occurrence.distance),
        headshot: occurrence.headshot,
        weapon: occurrence.weapon.clone().unwrap_or_default(),
    }
}

/// Rounds a projectile distance to two decimal places, matching the
/// precision shown in chat and sent to the collector.
fn round_distance(distance: f32) -> f32 {
    (distance * 100.0).round() / 100.0
}
