//! Console front-end
//!
//! Menus, prompts, and colored rendering around the engine. The human side
//! of the match implements the engine's controller seam here; engine state
//! never depends on anything printed by this module.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::debug;

use crate::engine::{
    AiController, CastOutcome, Combatant, Die, DieCatalog, EffectOutcome, EngineError, FaceKind,
    RerollDecision, RolledDie, Spell, TurnController,
};

/// Quit token accepted at the reroll prompt
const QUIT_TOKEN: &str = "q";

/// Human-directed controller reading line-based input
pub struct HumanController<R> {
    input: R,
}

impl HumanController<io::StdinLock<'static>> {
    /// Controller reading from standard input
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> HumanController<R> {
    /// Controller reading from any buffered source (used by tests)
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn prompt(&mut self, text: &str) -> Result<String, EngineError> {
        print!("{} ", text.yellow());
        io::stdout().flush()?;
        read_trimmed_line(&mut self.input)
    }
}

impl<R: BufRead> TurnController for HumanController<R> {
    fn begin_turn(&mut self, turn: u32, me: &Combatant, foe: &Combatant) {
        print_turn_banner(turn, me, foe);
    }

    fn show_roll(&mut self, rolls: &[RolledDie], rerolls_left: u32) {
        print_roll(rolls, rerolls_left);
    }

    fn reroll_decision(
        &mut self,
        rolls: &[RolledDie],
        _me: &Combatant,
        rerolls_left: u32,
    ) -> Result<RerollDecision, EngineError> {
        loop {
            let line = self.prompt(&format!(
                "Reroll which dice (e.g. 1,3)? Enter = keep, {} = quit [{} left]:",
                QUIT_TOKEN, rerolls_left
            ))?;
            if line.is_empty() {
                return Ok(RerollDecision::KeepAll);
            }
            if line.eq_ignore_ascii_case(QUIT_TOKEN) {
                return Ok(RerollDecision::Quit);
            }
            match parse_positions(&line, rolls.len()) {
                Ok(positions) => return Ok(RerollDecision::Reroll(positions)),
                Err(reason) => println!("{}", reason.red()),
            }
        }
    }

    fn show_effects(&mut self, outcomes: &[EffectOutcome], me: &Combatant, foe: &Combatant) {
        print_effects(outcomes, me, foe);
    }

    fn choose_spell(
        &mut self,
        affordable: &[&Spell],
        me: &Combatant,
    ) -> Result<Option<usize>, EngineError> {
        println!(
            "{}",
            format!("Casting phase ({} mana):", me.mana()).blue()
        );
        for (i, spell) in affordable.iter().enumerate() {
            println!("  {}) {} ({} mana)", i + 1, spell.name, spell.cost);
        }
        println!("  0) Skip");
        loop {
            let line = self.prompt("Cast which spell?")?;
            if line.is_empty() {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= affordable.len() => return Ok(Some(n - 1)),
                Ok(_) => println!("{}", "No such spell.".red()),
                Err(_) => println!("{}", "Enter a number.".red()),
            }
        }
    }

    fn show_cast(&mut self, outcome: &CastOutcome) {
        println!("{}", outcome.to_string().magenta());
    }
}

/// Opponent policy with human-readable rendering, for spectated auto matches
#[derive(Debug, Default)]
pub struct SpectatedAi {
    inner: AiController,
}

impl SpectatedAi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TurnController for SpectatedAi {
    fn begin_turn(&mut self, turn: u32, me: &Combatant, foe: &Combatant) {
        print_turn_banner(turn, me, foe);
    }

    fn show_roll(&mut self, rolls: &[RolledDie], rerolls_left: u32) {
        print_roll(rolls, rerolls_left);
    }

    fn reroll_decision(
        &mut self,
        rolls: &[RolledDie],
        me: &Combatant,
        rerolls_left: u32,
    ) -> Result<RerollDecision, EngineError> {
        self.inner.reroll_decision(rolls, me, rerolls_left)
    }

    fn show_effects(&mut self, outcomes: &[EffectOutcome], me: &Combatant, foe: &Combatant) {
        print_effects(outcomes, me, foe);
    }

    fn choose_spell(
        &mut self,
        affordable: &[&Spell],
        me: &Combatant,
    ) -> Result<Option<usize>, EngineError> {
        self.inner.choose_spell(affordable, me)
    }

    fn show_cast(&mut self, outcome: &CastOutcome) {
        println!("{}", outcome.to_string().magenta());
    }
}

/// Interactively pick a loadout of `count` dice from the catalog
pub fn choose_loadout<R: BufRead>(
    input: &mut R,
    catalog: &DieCatalog,
    count: usize,
) -> Result<Vec<Die>, EngineError> {
    println!("{}", "Pick your dice:".blue().bold());
    for (i, die) in catalog.dice().iter().enumerate() {
        println!("  {}) {}", i + 1, describe_die(die));
    }
    let mut loadout = Vec::with_capacity(count);
    while loadout.len() < count {
        print!(
            "{} ",
            format!("Die {} of {}:", loadout.len() + 1, count).yellow()
        );
        io::stdout().flush()?;
        let line = read_trimmed_line(input)?;
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= catalog.len() => {
                let die = catalog.dice()[n - 1].clone();
                debug!(die = die.name(), "loadout pick");
                println!("  picked {}", die);
                loadout.push(die);
            }
            _ => println!(
                "{}",
                format!("Pick a number between 1 and {}.", catalog.len()).red()
            ),
        }
    }
    Ok(loadout)
}

/// Opening banner
pub fn greet() {
    println!("{}", "Welcome to dicemage!".yellow().bold());
}

/// Final banner
pub fn announce_winner(name: &str, turns: u32) {
    println!();
    println!(
        "{}",
        format!("=== {} wins after {} turns! ===", name, turns)
            .magenta()
            .bold()
    );
}

fn print_turn_banner(turn: u32, me: &Combatant, foe: &Combatant) {
    println!();
    println!(
        "{}",
        format!("--- Turn {}: {} ---", turn, me.name()).blue().bold()
    );
    println!("{}", status_line(me));
    println!("{}", status_line(foe));
}

fn print_roll(rolls: &[RolledDie], rerolls_left: u32) {
    println!(
        "{}",
        format!("Roll: {} | {} rerolls left", render_rolls(rolls), rerolls_left).blue()
    );
}

fn print_effects(outcomes: &[EffectOutcome], me: &Combatant, foe: &Combatant) {
    for outcome in outcomes {
        println!("{}", render_effect(outcome));
    }
    println!(
        "{}",
        format!("{} | {}", short_status(me), short_status(foe)).magenta()
    );
}

fn render_rolls(rolls: &[RolledDie]) -> String {
    rolls
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}:{} ({})", i + 1, r.face(), r.die().name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_effect(outcome: &EffectOutcome) -> String {
    let text = outcome.to_string();
    match outcome.face() {
        FaceKind::Attack => text.red().to_string(),
        FaceKind::Heal => text.green().to_string(),
        FaceKind::Shield => text.cyan().to_string(),
        FaceKind::Mana => text.blue().to_string(),
        FaceKind::Blank => text.yellow().to_string(),
    }
}

fn status_line(c: &Combatant) -> String {
    format!(
        "{:10} HP {}/{}  Shield {}  Mana {}",
        c.name(),
        c.health(),
        c.max_health(),
        c.shield(),
        c.mana()
    )
}

fn short_status(c: &Combatant) -> String {
    format!("{} {}hp/{}sh/{}mp", c.name(), c.health(), c.shield(), c.mana())
}

fn describe_die(die: &Die) -> String {
    let count = |kind: FaceKind| die.faces().iter().filter(|f| **f == kind).count();
    format!(
        "{}: {} attack, {} heal, {} shield, {} mana, {} blank",
        die,
        count(FaceKind::Attack),
        count(FaceKind::Heal),
        count(FaceKind::Shield),
        count(FaceKind::Mana),
        count(FaceKind::Blank)
    )
}

/// Read one line, erroring on end of input so prompt loops cannot spin
fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<String, EngineError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(EngineError::Input(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(line.trim().to_string())
}

/// Parse a comma-separated list of 1-based die positions
fn parse_positions(line: &str, dice_count: usize) -> Result<Vec<usize>, String> {
    let mut positions = Vec::new();
    for token in line.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<usize>() {
            Ok(p) if p >= 1 && p <= dice_count => positions.push(p),
            Ok(p) => return Err(format!("Die {} does not exist; pick 1-{}.", p, dice_count)),
            Err(_) => return Err(format!("'{}' is not a die position.", token)),
        }
    }
    if positions.is_empty() {
        return Err("No positions given.".to_string());
    }
    Ok(positions)
}
