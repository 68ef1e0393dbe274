use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use unobot::{
    Bot, Game, GameConfig, create_bot_from_spec, describe_action, intent, render_state,
    winner_points,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play one round of Uno between four players.")]
struct Args {
    /// Show the table and the chosen action on every step
    #[arg(long, action = ArgAction::SetTrue)]
    visualize: bool,

    /// Seed for shuffling and for bot RNGs
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Play with the 7-0 rule
    #[arg(long = "seven-zero", action = ArgAction::SetTrue)]
    seven_zero: bool,

    /// Stop after the specified number of actions
    #[arg(long = "max-turns")]
    max_turns: Option<usize>,

    /// Log engine transitions at debug level
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player specs, four in seat order: human[:name], random[:seed], easy,
    /// hard[:seed], sevenzero. Defaults to one human and three hard bots.
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut bot_specs = args.bots;
    if bot_specs.is_empty() {
        bot_specs = vec![
            String::from("human"),
            String::from("hard"),
            String::from("hard"),
            String::from("hard"),
        ];
    }
    if bot_specs.len() != 4 {
        return Err(format!("expected 4 players, received {}", bot_specs.len()).into());
    }

    let mut game = Game::new(GameConfig {
        seed: args.seed,
        seven_zero: args.seven_zero,
    })?;
    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(bot_specs.len());
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, args.seed)?);
    }

    println!("Starting Uno simulation: {}\n", bot_specs.join(", "));
    let config = game.config();
    info!(seed = config.seed, seven_zero = config.seven_zero, "simulation started");
    let mut turns = 0usize;
    while !game.is_finished() {
        if let Some(limit) = args.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player();
        let view = game.state_view(current)?;
        let Some(action) = intent(bots[current].as_mut(), &view, game.turn_phase()) else {
            break;
        };
        if args.visualize {
            println!("{}", render_state(&view));
            println!("Player {current}: {}\n", describe_action(&view, &action));
        }
        game.apply_action(current, action)?;
        turns += 1;
    }

    match game.winner() {
        Some(winner) => {
            let points = winner_points(game.engine(), winner);
            println!(
                "Game finished after {turns} actions. Winner: Player {winner} ({points} points)."
            );
        }
        None if game.is_finished() => println!("Round stopped: no card left to draw."),
        None => println!("Simulation stopped before completion."),
    }
    Ok(())
}
