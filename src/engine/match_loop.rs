//! Match orchestration
//!
//! Alternates full turns between the two sides until one side's health
//! reaches zero or the player quits. A full turn is: roll the inventory,
//! negotiate rerolls, resolve face effects, then an optional casting phase.

use rand::rngs::StdRng;
use tracing::{debug, info};

use super::combatant::Combatant;
use super::dice::{roll_inventory, RolledDie};
use super::effects::{resolve_rolls, EffectOutcome};
use super::match_log::{LogKind, MatchLog};
use super::reroll::{negotiate, RerollDecision, RerollOutcome};
use super::spells::{cast, CastOutcome, Spell, SpellBook};
use super::EngineError;

/// One side of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Terminal result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// One side ran out of health
    Victory { winner: Side, turns: u32 },
    /// The player quit mid-negotiation
    Aborted,
}

/// Decision and observation seam for one side of the match.
///
/// Decision methods drive the engine; observation methods only render state
/// and never feed back into it, so their default implementations do nothing.
pub trait TurnController {
    /// A new turn is starting for this side
    fn begin_turn(&mut self, _turn: u32, _me: &Combatant, _foe: &Combatant) {}

    /// The rolled set changed (initial roll or after a reroll)
    fn show_roll(&mut self, _rolls: &[RolledDie], _rerolls_left: u32) {}

    /// Decide what to do with the current rolled set
    fn reroll_decision(
        &mut self,
        rolls: &[RolledDie],
        me: &Combatant,
        rerolls_left: u32,
    ) -> Result<RerollDecision, EngineError>;

    /// The final set resolved into these effects
    fn show_effects(&mut self, _outcomes: &[EffectOutcome], _me: &Combatant, _foe: &Combatant) {}

    /// Pick a spell by index into the affordable list, or skip with `None`
    fn choose_spell(
        &mut self,
        affordable: &[&Spell],
        me: &Combatant,
    ) -> Result<Option<usize>, EngineError>;

    /// A cast resolved
    fn show_cast(&mut self, _outcome: &CastOutcome) {}
}

/// Orchestrates one full match between two combatants
pub struct MatchEngine<'a> {
    player: Combatant,
    opponent: Combatant,
    book: &'a SpellBook,
    reroll_limit: u32,
    rng: StdRng,
    log: MatchLog,
    turn: u32,
}

impl<'a> MatchEngine<'a> {
    pub fn new(
        player: Combatant,
        opponent: Combatant,
        book: &'a SpellBook,
        reroll_limit: u32,
        rng: StdRng,
    ) -> Self {
        Self {
            player,
            opponent,
            book,
            reroll_limit,
            rng,
            log: MatchLog::new(),
            turn: 0,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    /// Completed turn cycles (for reporting)
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Run the match to completion
    pub fn run(
        &mut self,
        player_ctl: &mut dyn TurnController,
        opponent_ctl: &mut dyn TurnController,
    ) -> Result<MatchOutcome, EngineError> {
        self.log.record(
            0,
            LogKind::Match,
            format!("{} vs {}", self.player.name(), self.opponent.name()),
        );
        loop {
            self.turn += 1;
            debug!(turn = self.turn, "starting turn cycle");
            if let Some(outcome) = self.take_turn(Side::Player, player_ctl)? {
                return Ok(self.finish(outcome));
            }
            if let Some(outcome) = self.take_turn(Side::Opponent, opponent_ctl)? {
                return Ok(self.finish(outcome));
            }
        }
    }

    fn finish(&mut self, outcome: MatchOutcome) -> MatchOutcome {
        match outcome {
            MatchOutcome::Victory { winner, turns } => {
                let name = match winner {
                    Side::Player => self.player.name(),
                    Side::Opponent => self.opponent.name(),
                };
                info!(winner = name, turns, "match over");
                self.log.record(
                    self.turn,
                    LogKind::Match,
                    format!("{} wins after {} turns", name, turns),
                );
            }
            MatchOutcome::Aborted => {
                info!("match aborted");
                self.log.record(self.turn, LogKind::Match, "match aborted");
            }
        }
        outcome
    }

    /// Run one side's full turn. Returns the terminal outcome if the match
    /// ended during it.
    fn take_turn(
        &mut self,
        side: Side,
        ctl: &mut dyn TurnController,
    ) -> Result<Option<MatchOutcome>, EngineError> {
        let turn = self.turn;
        let Self {
            player,
            opponent,
            book,
            reroll_limit,
            rng,
            log,
            ..
        } = self;
        let (actor, foe) = match side {
            Side::Player => (player, opponent),
            Side::Opponent => (opponent, player),
        };

        ctl.begin_turn(turn, actor, foe);

        let mut rolls = roll_inventory(actor.dice(), rng);
        log.record(
            turn,
            LogKind::Roll,
            format!("{} rolled {}", actor.name(), describe_rolls(&rolls)),
        );
        ctl.show_roll(&rolls, *reroll_limit);

        if negotiate(&mut rolls, ctl, actor, *reroll_limit, rng)? == RerollOutcome::Aborted {
            return Ok(Some(MatchOutcome::Aborted));
        }
        log.record(
            turn,
            LogKind::Reroll,
            format!("{} kept {}", actor.name(), describe_rolls(&rolls)),
        );

        let outcomes = resolve_rolls(actor, foe, &rolls, rng);
        for outcome in &outcomes {
            log.record(turn, LogKind::Effect, format!("{}: {}", actor.name(), outcome));
        }
        ctl.show_effects(&outcomes, actor, foe);

        if foe.is_defeated() {
            return Ok(Some(MatchOutcome::Victory { winner: side, turns: turn }));
        }

        // Casting phase: entered only with enough mana for the cheapest spell
        if actor.mana() >= book.cheapest_cost() {
            let affordable = book.affordable(actor.mana());
            loop {
                match ctl.choose_spell(&affordable, actor)? {
                    None => break,
                    Some(i) => {
                        // Out-of-range selections re-request the decision
                        let Some(spell) = affordable.get(i).copied() else {
                            continue;
                        };
                        let outcome = cast(spell, actor, foe, rng);
                        log.record(
                            turn,
                            LogKind::Cast,
                            format!("{}: {}", actor.name(), outcome),
                        );
                        ctl.show_cast(&outcome);
                        break;
                    }
                }
            }
            if foe.is_defeated() {
                return Ok(Some(MatchOutcome::Victory { winner: side, turns: turn }));
            }
        }

        Ok(None)
    }
}

fn describe_rolls(rolls: &[RolledDie]) -> String {
    let faces: Vec<String> = rolls.iter().map(|r| r.face().to_string()).collect();
    format!("[{}]", faces.join(", "))
}
