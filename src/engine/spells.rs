//! Spell catalog and cast resolution
//!
//! Spells are plain data (a mana cost plus an effect kind); one dispatch
//! function interprets the effect against caster and target.

use rand::Rng;
use serde::Serialize;

use super::combatant::Combatant;

/// What a spell does when cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpellEffect {
    /// Random damage to the opponent
    Damage { min: u32, max: u32 },
    /// Random heal on the caster
    Heal { min: u32, max: u32 },
    /// Random shield on the caster
    Shield { min: u32, max: u32 },
    /// Random mana gain on the caster
    Mana { min: u32, max: u32 },
    /// Random damage to the opponent; the caster heals half the damage dealt
    Drain { min: u32, max: u32 },
}

/// A castable spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spell {
    pub name: &'static str,
    pub cost: u32,
    pub effect: SpellEffect,
}

/// Fixed spell catalog, initialized once and shared by reference
#[derive(Debug, Clone)]
pub struct SpellBook {
    spells: Vec<Spell>,
}

impl SpellBook {
    /// Build the standard five-spell catalog
    pub fn standard() -> Self {
        Self {
            spells: vec![
                Spell {
                    name: "Fireball",
                    cost: 3,
                    effect: SpellEffect::Damage { min: 8, max: 12 },
                },
                Spell {
                    name: "Healing Wave",
                    cost: 2,
                    effect: SpellEffect::Heal { min: 5, max: 10 },
                },
                Spell {
                    name: "Shield Wall",
                    cost: 3,
                    effect: SpellEffect::Shield { min: 5, max: 10 },
                },
                Spell {
                    name: "Mana Surge",
                    cost: 2,
                    effect: SpellEffect::Mana { min: 3, max: 5 },
                },
                Spell {
                    name: "Essence Drain",
                    cost: 4,
                    effect: SpellEffect::Drain { min: 5, max: 8 },
                },
            ],
        }
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.name == name)
    }

    /// Cost of the cheapest spell; the casting phase is skipped below this
    pub fn cheapest_cost(&self) -> u32 {
        self.spells
            .iter()
            .map(|s| s.cost)
            .min()
            .unwrap_or(u32::MAX)
    }

    /// Spells castable at the given mana, in catalog order
    pub fn affordable(&self, mana: u32) -> Vec<&Spell> {
        self.spells.iter().filter(|s| s.cost <= mana).collect()
    }
}

impl Default for SpellBook {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of a resolved cast
#[derive(Debug, Clone)]
pub struct CastOutcome {
    spell: &'static str,
    effect: SpellEffect,
    magnitude: u32,
    blocked: u32,
    drained: u32,
}

impl CastOutcome {
    pub fn spell(&self) -> &'static str {
        self.spell
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub fn blocked(&self) -> u32 {
        self.blocked
    }

    /// Damage that got through the target's shield
    pub fn dealt(&self) -> u32 {
        self.magnitude - self.blocked
    }

    /// Health the caster siphoned back (drain casts only)
    pub fn drained(&self) -> u32 {
        self.drained
    }
}

impl std::fmt::Display for CastOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.effect {
            SpellEffect::Damage { .. } => {
                write!(f, "{}! Dealt {} damage.", self.spell, self.dealt())?;
                if self.blocked > 0 {
                    write!(f, " ({} blocked)", self.blocked)?;
                }
                Ok(())
            }
            SpellEffect::Heal { .. } => {
                write!(f, "{}! Restored {} health.", self.spell, self.magnitude)
            }
            SpellEffect::Shield { .. } => {
                write!(f, "{}! Gained {} shield.", self.spell, self.magnitude)
            }
            SpellEffect::Mana { .. } => {
                write!(f, "{}! Gained {} mana.", self.spell, self.magnitude)
            }
            SpellEffect::Drain { .. } => {
                write!(
                    f,
                    "{}! Dealt {} damage, restored {} health.",
                    self.spell,
                    self.dealt(),
                    self.drained
                )?;
                if self.blocked > 0 {
                    write!(f, " ({} blocked)", self.blocked)?;
                }
                Ok(())
            }
        }
    }
}

/// Cast a spell, deducting its cost and interpreting its effect.
///
/// Affordability is the caller's precondition; the match loop only offers
/// spells the caster can pay for.
pub fn cast(
    spell: &Spell,
    caster: &mut Combatant,
    target: &mut Combatant,
    rng: &mut impl Rng,
) -> CastOutcome {
    caster.spend_mana(spell.cost);
    let (magnitude, blocked, drained) = match spell.effect {
        SpellEffect::Damage { min, max } => {
            let magnitude = rng.random_range(min..=max);
            let blocked = target.apply_damage(magnitude);
            (magnitude, blocked, 0)
        }
        SpellEffect::Heal { min, max } => {
            let magnitude = rng.random_range(min..=max);
            caster.add_health(magnitude);
            (magnitude, 0, 0)
        }
        SpellEffect::Shield { min, max } => {
            let magnitude = rng.random_range(min..=max);
            caster.add_shield(magnitude);
            (magnitude, 0, 0)
        }
        SpellEffect::Mana { min, max } => {
            let magnitude = rng.random_range(min..=max);
            caster.add_mana(magnitude);
            (magnitude, 0, 0)
        }
        SpellEffect::Drain { min, max } => {
            let magnitude = rng.random_range(min..=max);
            let blocked = target.apply_damage(magnitude);
            let drained = (magnitude - blocked) / 2;
            caster.add_health(drained);
            (magnitude, blocked, drained)
        }
    };
    CastOutcome {
        spell: spell.name,
        effect: spell.effect,
        magnitude,
        blocked,
        drained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn caster(mana: u32) -> Combatant {
        Combatant::new("Caster", 30, Vec::new()).with_resources(0, mana)
    }

    #[test]
    fn test_standard_catalog() {
        let book = SpellBook::standard();
        assert_eq!(book.spells().len(), 5);
        assert_eq!(book.cheapest_cost(), 2);
        assert_eq!(book.get("Fireball").unwrap().cost, 3);
        assert!(book.get("Polymorph").is_none());
    }

    #[test]
    fn test_affordable_filtering() {
        let book = SpellBook::standard();
        assert!(book.affordable(0).is_empty());
        assert!(book.affordable(1).is_empty());

        let at_two: Vec<&str> = book.affordable(2).iter().map(|s| s.name).collect();
        assert_eq!(at_two, vec!["Healing Wave", "Mana Surge"]);

        assert_eq!(book.affordable(4).len(), 5);
    }

    #[test]
    fn test_fireball_damages_target() {
        let book = SpellBook::standard();
        let fireball = book.get("Fireball").unwrap();
        let mut caster = caster(3);
        let mut target = Combatant::new("Target", 30, Vec::new());
        let mut rng = StdRng::seed_from_u64(20);

        let outcome = cast(fireball, &mut caster, &mut target, &mut rng);

        assert_eq!(caster.mana(), 0);
        assert!(outcome.magnitude() >= 8 && outcome.magnitude() <= 12);
        assert_eq!(target.health(), 30 - outcome.dealt());
    }

    #[test]
    fn test_healing_wave_heals_caster() {
        let book = SpellBook::standard();
        let heal = book.get("Healing Wave").unwrap();
        let mut caster = caster(2);
        caster.apply_damage(15);
        let mut target = Combatant::new("Target", 30, Vec::new());
        let mut rng = StdRng::seed_from_u64(21);

        let outcome = cast(heal, &mut caster, &mut target, &mut rng);

        assert!(outcome.magnitude() >= 5 && outcome.magnitude() <= 10);
        assert_eq!(caster.health(), 15 + outcome.magnitude());
        assert_eq!(target.health(), 30);
    }

    #[test]
    fn test_essence_drain_heals_half_dealt() {
        let book = SpellBook::standard();
        let drain = book.get("Essence Drain").unwrap();
        let mut rng = StdRng::seed_from_u64(22);

        let mut caster = caster(4);
        caster.apply_damage(20);
        let mut target = Combatant::new("Target", 30, Vec::new()).with_resources(2, 0);

        let outcome = cast(drain, &mut caster, &mut target, &mut rng);

        assert!(outcome.magnitude() >= 5 && outcome.magnitude() <= 8);
        assert_eq!(outcome.blocked(), 2);
        assert_eq!(outcome.dealt(), outcome.magnitude() - 2);
        assert_eq!(outcome.drained(), outcome.dealt() / 2);
        assert_eq!(caster.health(), 10 + outcome.drained());
        assert_eq!(target.shield(), 0);
        assert_eq!(target.health(), 30 - outcome.dealt());
    }

    #[test]
    fn test_cast_descriptions() {
        let outcome = CastOutcome {
            spell: "Fireball",
            effect: SpellEffect::Damage { min: 8, max: 12 },
            magnitude: 9,
            blocked: 0,
            drained: 0,
        };
        assert_eq!(outcome.to_string(), "Fireball! Dealt 9 damage.");

        let outcome = CastOutcome {
            spell: "Essence Drain",
            effect: SpellEffect::Drain { min: 5, max: 8 },
            magnitude: 6,
            blocked: 2,
            drained: 2,
        };
        assert_eq!(
            outcome.to_string(),
            "Essence Drain! Dealt 4 damage, restored 2 health. (2 blocked)"
        );
    }
}
