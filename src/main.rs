//! dicemage - dice-duel combat game

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicemage::cli::{self, HumanController, SpectatedAi};
use dicemage::config::GameConfig;
use dicemage::engine::{
    random_loadout, AiController, Combatant, DieCatalog, MatchEngine, MatchOutcome, Side,
    SpellBook,
};

/// Dice-duel combat in the terminal
#[derive(Parser, Debug)]
#[command(name = "dicemage", version, about = "Dice-duel combat in the terminal")]
struct Args {
    /// Seed for a deterministic match
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the match transcript as JSON to this file
    #[arg(long)]
    log_out: Option<PathBuf>,

    /// Let the opponent policy drive both sides
    #[arg(long)]
    auto: bool,

    /// Player name
    #[arg(long, default_value = "Hero")]
    name: String,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicemage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = GameConfig::load(args.config.as_deref())?;

    let rng = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded rng");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    run_match(&args, &config, rng)
}

fn run_match(args: &Args, config: &GameConfig, mut rng: StdRng) -> Result<ExitCode> {
    let catalog = DieCatalog::standard();
    let book = SpellBook::standard();

    cli::greet();

    let player_dice = if args.auto {
        random_loadout(&catalog, config.dice_per_side, &mut rng)
    } else {
        let mut stdin = std::io::stdin().lock();
        cli::choose_loadout(&mut stdin, &catalog, config.dice_per_side)?
    };
    let opponent_dice = random_loadout(&catalog, config.dice_per_side, &mut rng);

    let player = Combatant::new(args.name.clone(), config.max_health, player_dice)
        .with_resources(config.starting_shield, config.starting_mana);
    let opponent = Combatant::new("Grimling", config.max_health, opponent_dice)
        .with_resources(config.starting_shield, config.starting_mana);

    let mut engine = MatchEngine::new(player, opponent, &book, config.reroll_limit, rng);

    let outcome = if args.auto {
        let mut spectated = SpectatedAi::new();
        let mut ai = AiController;
        engine.run(&mut spectated, &mut ai)?
    } else {
        let mut human = HumanController::stdin();
        let mut ai = AiController;
        engine.run(&mut human, &mut ai)?
    };

    if let Some(path) = &args.log_out {
        engine.log().save(path)?;
        info!(path = %path.display(), "match transcript written");
    }

    match outcome {
        MatchOutcome::Victory { winner, turns } => {
            let name = match winner {
                Side::Player => engine.player().name(),
                Side::Opponent => engine.opponent().name(),
            };
            cli::announce_winner(name, turns);
            Ok(ExitCode::SUCCESS)
        }
        MatchOutcome::Aborted => {
            println!("Match abandoned.");
            Ok(ExitCode::FAILURE)
        }
    }
}
