//! Dice-duel combat engine
//!
//! Implements the match rules:
//! - Dice with semantic faces (attack, heal, shield, mana, blank)
//! - Combatant state with shield-absorbed damage
//! - Bounded reroll negotiation
//! - Mana-gated spell casting
//! - Turn alternation until one side falls

mod ai;
mod combatant;
mod dice;
mod effects;
mod match_log;
mod match_loop;
mod reroll;
mod spells;

pub use ai::{pick_spell_index, random_loadout, reroll_positions, AiController, SPELL_PRIORITY};
pub use combatant::Combatant;
pub use dice::{roll_inventory, Die, DieCatalog, FaceKind, RolledDie};
pub use effects::{max_magnitude, resolve_rolls, EffectOutcome};
pub use match_log::{LogEntry, LogKind, MatchLog};
pub use match_loop::{MatchEngine, MatchOutcome, Side, TurnController};
pub use reroll::{negotiate, RerollDecision, RerollOutcome, DEFAULT_REROLL_LIMIT};
pub use spells::{cast, CastOutcome, Spell, SpellBook, SpellEffect};

use thiserror::Error;

/// Errors surfaced by the combat engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid construction-time data (die definitions, match parameters)
    #[error("configuration error: {0}")]
    Config(String),
    /// The input source failed while a decision was being read
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}
