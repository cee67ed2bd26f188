//! dicemage - turn-based dice-duel combat
//!
//! Two combatants each bring three dice. A turn rolls them, negotiates a
//! bounded number of rerolls, applies the final faces (damage, heal, shield,
//! mana), and optionally spends mana on a spell; sides alternate until one
//! side's health reaches zero.

pub mod cli;
pub mod config;
pub mod engine;
