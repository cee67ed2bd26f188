//! Rolled-face effect resolution
//!
//! Maps each final face to a randomized magnitude scaled by the die's side
//! count and applies it to the roller or their opponent. Faces are resolved
//! in positional order; no face depends on another's outcome.

use rand::Rng;

use super::combatant::Combatant;
use super::dice::{FaceKind, RolledDie};

/// Largest magnitude a face can produce on a die with `sides` sides.
///
/// Attack scales fastest (sides / 2), then heal (/ 3), shield (/ 4), and
/// mana (/ 5); every range bottoms out at 1. Blank has no magnitude.
pub fn max_magnitude(face: FaceKind, sides: u32) -> u32 {
    let divisor = match face {
        FaceKind::Attack => 2,
        FaceKind::Heal => 3,
        FaceKind::Shield => 4,
        FaceKind::Mana => 5,
        FaceKind::Blank => return 0,
    };
    (sides / divisor).max(1)
}

/// Outcome of a single resolved face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    face: FaceKind,
    magnitude: u32,
    blocked: u32,
}

impl EffectOutcome {
    pub fn face(&self) -> FaceKind {
        self.face
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    /// Damage absorbed by the opponent's shield (attack faces only)
    pub fn blocked(&self) -> u32 {
        self.blocked
    }

    /// Damage that got through the shield
    pub fn dealt(&self) -> u32 {
        self.magnitude - self.blocked
    }
}

impl std::fmt::Display for EffectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            FaceKind::Attack => {
                write!(f, "Attack! Dealt {} damage.", self.dealt())?;
                if self.blocked > 0 {
                    write!(f, " ({} blocked)", self.blocked)?;
                }
                Ok(())
            }
            FaceKind::Heal => write!(f, "Heal! Restored {} health.", self.magnitude),
            FaceKind::Shield => write!(f, "Shield! Gained {} shield.", self.magnitude),
            FaceKind::Mana => write!(f, "Mana! Gained {} mana.", self.magnitude),
            FaceKind::Blank => write!(f, "Blank roll. Nothing happened."),
        }
    }
}

/// Resolve a final rolled set against the two combatants.
///
/// Attack faces damage the opponent; heal, shield, and mana faces apply to
/// the roller. Returns one outcome record per face, in positional order.
pub fn resolve_rolls(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    rolls: &[RolledDie],
    rng: &mut impl Rng,
) -> Vec<EffectOutcome> {
    rolls
        .iter()
        .map(|rolled| resolve_face(actor, opponent, rolled.face(), rolled.die().sides(), rng))
        .collect()
}

fn resolve_face(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    face: FaceKind,
    sides: u32,
    rng: &mut impl Rng,
) -> EffectOutcome {
    match face {
        FaceKind::Blank => EffectOutcome {
            face,
            magnitude: 0,
            blocked: 0,
        },
        FaceKind::Attack => {
            let magnitude = rng.random_range(1..=max_magnitude(face, sides));
            let blocked = opponent.apply_damage(magnitude);
            EffectOutcome {
                face,
                magnitude,
                blocked,
            }
        }
        FaceKind::Heal => {
            let magnitude = rng.random_range(1..=max_magnitude(face, sides));
            actor.add_health(magnitude);
            EffectOutcome {
                face,
                magnitude,
                blocked: 0,
            }
        }
        FaceKind::Shield => {
            let magnitude = rng.random_range(1..=max_magnitude(face, sides));
            actor.add_shield(magnitude);
            EffectOutcome {
                face,
                magnitude,
                blocked: 0,
            }
        }
        FaceKind::Mana => {
            let magnitude = rng.random_range(1..=max_magnitude(face, sides));
            actor.add_mana(magnitude);
            EffectOutcome {
                face,
                magnitude,
                blocked: 0,
            }
        }
    }
}
