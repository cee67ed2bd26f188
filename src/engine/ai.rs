//! Opponent decision policies
//!
//! Deterministic policies for the automated side: which faces to redraw,
//! which spell to cast, and which dice to bring. Reroll and spell choices
//! are pure functions of the visible state, so the opponent is predictable
//! given identical inputs.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use super::combatant::Combatant;
use super::dice::{Die, DieCatalog, FaceKind, RolledDie};
use super::match_loop::TurnController;
use super::reroll::RerollDecision;
use super::spells::Spell;
use super::EngineError;

/// Heal faces are considered wasted once health is this close to the cap
const HEAL_WASTE_MARGIN: u32 = 10;

/// Spell names in cast-priority order
pub const SPELL_PRIORITY: [&str; 5] = [
    "Fireball",
    "Essence Drain",
    "Shield Wall",
    "Healing Wave",
    "Mana Surge",
];

/// Positions (1-based) the automated side wants to redraw.
///
/// Blanks are always redrawn; heal faces are redrawn once health is within
/// [`HEAL_WASTE_MARGIN`] of the cap, since most of the heal would be lost to
/// the ceiling.
pub fn reroll_positions(faces: &[FaceKind], health: u32, max_health: u32) -> Vec<usize> {
    let near_full = max_health.saturating_sub(health) <= HEAL_WASTE_MARGIN;
    faces
        .iter()
        .enumerate()
        .filter_map(|(i, face)| match face {
            FaceKind::Blank => Some(i + 1),
            FaceKind::Heal if near_full => Some(i + 1),
            _ => None,
        })
        .collect()
}

/// Index of the first affordable spell in priority order, if any
pub fn pick_spell_index(affordable: &[&Spell]) -> Option<usize> {
    SPELL_PRIORITY
        .iter()
        .find_map(|name| affordable.iter().position(|s| s.name == *name))
}

/// Sample a loadout of `count` dice uniformly, with replacement
pub fn random_loadout(catalog: &DieCatalog, count: usize, rng: &mut impl Rng) -> Vec<Die> {
    (0..count)
        .filter_map(|_| catalog.dice().choose(rng).cloned())
        .collect()
}

/// Turn controller for the automated opponent
#[derive(Debug, Default)]
pub struct AiController;

impl TurnController for AiController {
    fn reroll_decision(
        &mut self,
        rolls: &[RolledDie],
        me: &Combatant,
        rerolls_left: u32,
    ) -> Result<RerollDecision, EngineError> {
        let faces: Vec<FaceKind> = rolls.iter().map(|r| r.face()).collect();
        let positions = reroll_positions(&faces, me.health(), me.max_health());
        if positions.is_empty() {
            Ok(RerollDecision::KeepAll)
        } else {
            debug!(?positions, rerolls_left, "opponent rerolling");
            Ok(RerollDecision::Reroll(positions))
        }
    }

    fn choose_spell(
        &mut self,
        affordable: &[&Spell],
        _me: &Combatant,
    ) -> Result<Option<usize>, EngineError> {
        let choice = pick_spell_index(affordable);
        if let Some(i) = choice {
            debug!(spell = affordable[i].name, "opponent casting");
        }
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spells::SpellBook;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use FaceKind::*;

    #[test]
    fn test_blanks_always_rerolled() {
        let positions = reroll_positions(&[Blank, Attack, Blank], 10, 30);
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_heal_kept_when_health_is_low() {
        // max - health > margin: the heal is worth keeping
        let positions = reroll_positions(&[Blank, Attack, Heal], 15, 30);
        assert_eq!(positions, vec![1]);
    }

    #[test]
    fn test_heal_rerolled_near_full_health() {
        let positions = reroll_positions(&[Blank, Attack, Heal], 30, 30);
        assert_eq!(positions, vec![1, 3]);

        let positions = reroll_positions(&[Heal, Heal, Attack], 21, 30);
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_heal_boundary_at_margin() {
        // Exactly 10 below the cap still counts as near-full
        let positions = reroll_positions(&[Heal], 20, 30);
        assert_eq!(positions, vec![1]);

        // Eleven below does not
        let positions = reroll_positions(&[Heal], 19, 30);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_policy_is_pure() {
        let faces = [Blank, Heal, Attack, Shield, Mana];
        let first = reroll_positions(&faces, 25, 30);
        for _ in 0..10 {
            assert_eq!(reroll_positions(&faces, 25, 30), first);
        }
    }

    #[test]
    fn test_no_rerolls_wanted_on_clean_roll() {
        let positions = reroll_positions(&[Attack, Shield, Mana], 10, 30);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_spell_priority_order() {
        let book = SpellBook::standard();

        // All five affordable: Fireball first
        let affordable = book.affordable(4);
        let i = pick_spell_index(&affordable).unwrap();
        assert_eq!(affordable[i].name, "Fireball");

        // At 3 mana Fireball is affordable but Essence Drain is not
        let affordable = book.affordable(3);
        let i = pick_spell_index(&affordable).unwrap();
        assert_eq!(affordable[i].name, "Fireball");

        // At 2 mana only the cheap spells remain; Healing Wave outranks Mana Surge
        let affordable = book.affordable(2);
        let i = pick_spell_index(&affordable).unwrap();
        assert_eq!(affordable[i].name, "Healing Wave");
    }

    #[test]
    fn test_no_spell_when_none_affordable() {
        let book = SpellBook::standard();
        let affordable = book.affordable(1);
        assert_eq!(pick_spell_index(&affordable), None);
    }

    #[test]
    fn test_random_loadout_size_and_membership() {
        let catalog = DieCatalog::standard();
        let mut rng = StdRng::seed_from_u64(30);
        let loadout = random_loadout(&catalog, 3, &mut rng);
        assert_eq!(loadout.len(), 3);
        for die in &loadout {
            assert!(catalog.dice().iter().any(|d| d.name() == die.name()));
        }
    }
}
