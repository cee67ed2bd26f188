//! Reroll negotiation
//!
//! Bounded loop where the acting side may redraw some or all rolled faces
//! before effects apply. Die identity at each position never changes; only
//! the face value is redrawn from that same die's face set.

use rand::Rng;
use tracing::debug;

use super::combatant::Combatant;
use super::dice::RolledDie;
use super::match_loop::TurnController;
use super::EngineError;

/// Rerolls available per turn unless configured otherwise
pub const DEFAULT_REROLL_LIMIT: u32 = 3;

/// One decision in the negotiation loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RerollDecision {
    /// Keep the current faces and end negotiation
    KeepAll,
    /// Redraw the faces at these 1-based positions
    Reroll(Vec<usize>),
    /// Abandon the match entirely
    Quit,
}

/// How negotiation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerollOutcome {
    /// The rolled set is final; effects may be applied
    Settled,
    /// The controller quit; the match is over
    Aborted,
}

/// Drive the negotiation loop until the set settles, the controller quits,
/// or the reroll budget runs out.
///
/// Positions outside `1..=rolls.len()` invalidate the whole decision: it is
/// re-requested and no reroll is consumed. Duplicate positions collapse into
/// one redraw. An empty reroll set ends negotiation early.
pub fn negotiate(
    rolls: &mut [RolledDie],
    ctl: &mut dyn TurnController,
    me: &Combatant,
    limit: u32,
    rng: &mut impl Rng,
) -> Result<RerollOutcome, EngineError> {
    let mut remaining = limit;
    while remaining > 0 {
        match ctl.reroll_decision(rolls, me, remaining)? {
            RerollDecision::KeepAll => return Ok(RerollOutcome::Settled),
            RerollDecision::Quit => return Ok(RerollOutcome::Aborted),
            RerollDecision::Reroll(positions) => {
                if positions.is_empty() {
                    return Ok(RerollOutcome::Settled);
                }
                if positions.iter().any(|&p| p == 0 || p > rolls.len()) {
                    debug!(?positions, "rejected out-of-range reroll positions");
                    continue;
                }
                let mut redrawn = vec![false; rolls.len()];
                for &position in &positions {
                    if !redrawn[position - 1] {
                        rolls[position - 1].reroll(rng);
                        redrawn[position - 1] = true;
                    }
                }
                remaining -= 1;
                ctl.show_roll(rolls, remaining);
            }
        }
    }
    Ok(RerollOutcome::Settled)
}
