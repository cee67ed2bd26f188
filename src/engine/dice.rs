//! Dice with semantic faces
//!
//! Every die is a fixed, ordered face set; rolling draws one face uniformly.
//! The catalog holds the named dice combatants pick their loadouts from.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::EngineError;

/// One face of a die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceKind {
    /// Damages the opponent
    Attack,
    /// Restores the roller's health
    Heal,
    /// Adds to the roller's shield
    Shield,
    /// Adds to the roller's mana
    Mana,
    /// No effect
    Blank,
}

impl std::fmt::Display for FaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FaceKind::Attack => "Attack",
            FaceKind::Heal => "Heal",
            FaceKind::Shield => "Shield",
            FaceKind::Mana => "Mana",
            FaceKind::Blank => "Blank",
        };
        write!(f, "{}", s)
    }
}

/// A die with a fixed face set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Die {
    name: &'static str,
    sides: u32,
    faces: Vec<FaceKind>,
}

impl Die {
    /// Create a die, validating the declared side count against its faces
    pub fn new(name: &'static str, sides: u32, faces: Vec<FaceKind>) -> Result<Self, EngineError> {
        if sides == 0 {
            return Err(EngineError::Config(format!(
                "die {} must have at least 1 side",
                name
            )));
        }
        if faces.len() as u32 != sides {
            return Err(EngineError::Config(format!(
                "die {} declares {} sides but has {} faces",
                name,
                sides,
                faces.len()
            )));
        }
        Ok(Self { name, sides, faces })
    }

    /// Create a die whose side count is derived from its face list
    pub fn from_faces(name: &'static str, faces: Vec<FaceKind>) -> Self {
        debug_assert!(!faces.is_empty(), "a die needs at least one face");
        Self {
            name,
            sides: faces.len() as u32,
            faces,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn faces(&self) -> &[FaceKind] {
        &self.faces
    }

    /// Roll the die, drawing one face uniformly at random
    pub fn roll(&self, rng: &mut impl Rng) -> FaceKind {
        *self.faces.choose(rng).expect("die has at least one face")
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (d{})", self.name, self.sides)
    }
}

/// A die together with its current rolled face.
///
/// The die at a position is fixed for the whole negotiation; rerolling only
/// redraws the face from that same die's face set.
#[derive(Debug, Clone)]
pub struct RolledDie {
    die: Die,
    face: FaceKind,
}

impl RolledDie {
    /// Roll a die into its initial face
    pub fn new(die: &Die, rng: &mut impl Rng) -> Self {
        Self {
            die: die.clone(),
            face: die.roll(rng),
        }
    }

    pub fn die(&self) -> &Die {
        &self.die
    }

    pub fn face(&self) -> FaceKind {
        self.face
    }

    /// Redraw the face from this position's own die
    pub fn reroll(&mut self, rng: &mut impl Rng) {
        self.face = self.die.roll(rng);
    }
}

/// Roll every die in an inventory, preserving inventory order
pub fn roll_inventory(dice: &[Die], rng: &mut impl Rng) -> Vec<RolledDie> {
    dice.iter().map(|d| RolledDie::new(d, rng)).collect()
}

/// Fixed catalog of dice available at setup
#[derive(Debug, Clone)]
pub struct DieCatalog {
    dice: Vec<Die>,
}

impl DieCatalog {
    /// Build the standard six-die catalog
    pub fn standard() -> Self {
        use FaceKind::*;
        let dice = vec![
            Die::from_faces("Ember", face_mix(&[(Attack, 2), (Mana, 1), (Blank, 1)])),
            Die::from_faces(
                "Battle",
                face_mix(&[(Attack, 3), (Shield, 1), (Heal, 1), (Blank, 1)]),
            ),
            Die::from_faces(
                "Warden",
                face_mix(&[(Attack, 2), (Shield, 3), (Heal, 1), (Mana, 1), (Blank, 1)]),
            ),
            Die::from_faces(
                "Arcane",
                face_mix(&[(Attack, 3), (Mana, 3), (Heal, 1), (Shield, 1), (Blank, 2)]),
            ),
            Die::from_faces(
                "Berserker",
                face_mix(&[(Attack, 6), (Heal, 2), (Shield, 2), (Mana, 1), (Blank, 1)]),
            ),
            Die::from_faces(
                "Titan",
                face_mix(&[(Attack, 8), (Heal, 3), (Shield, 3), (Mana, 3), (Blank, 3)]),
            ),
        ];
        Self { dice }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }
}

impl Default for DieCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn face_mix(groups: &[(FaceKind, usize)]) -> Vec<FaceKind> {
    groups
        .iter()
        .flat_map(|&(face, count)| std::iter::repeat(face).take(count))
        .collect()
}
