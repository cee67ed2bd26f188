//! Combatant state
//!
//! Health, shield, and mana for one side of the match. All mutation goes
//! through clamped operations; health never leaves `[0, max_health]`, and
//! shield and mana never go negative.

use super::dice::Die;

/// One side of the match
#[derive(Debug, Clone)]
pub struct Combatant {
    name: String,
    health: u32,
    max_health: u32,
    shield: u32,
    mana: u32,
    dice: Vec<Die>,
}

impl Combatant {
    /// Create a combatant at full health with an empty resource pool
    pub fn new(name: impl Into<String>, max_health: u32, dice: Vec<Die>) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            shield: 0,
            mana: 0,
            dice,
        }
    }

    /// Set starting shield and mana (match setup only)
    pub fn with_resources(mut self, shield: u32, mana: u32) -> Self {
        self.shield = shield;
        self.mana = mana;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    /// The dice this side brings to every turn
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply damage; shield absorbs first, the remainder reduces health
    /// floored at zero. Returns the blocked amount.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let blocked = self.shield.min(amount);
        self.shield -= blocked;
        self.health = self.health.saturating_sub(amount - blocked);
        blocked
    }

    /// Restore health, capped at `max_health`
    pub fn add_health(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn add_shield(&mut self, amount: u32) {
        self.shield = self.shield.saturating_add(amount);
    }

    pub fn add_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount);
    }

    /// Spend mana on a cast. Affordability is the caller's precondition.
    pub fn spend_mana(&mut self, amount: u32) {
        debug_assert!(self.mana >= amount, "cast accepted without enough mana");
        self.mana = self.mana.saturating_sub(amount);
    }
}
