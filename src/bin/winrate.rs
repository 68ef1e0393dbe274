use std::collections::HashMap;
use std::error::Error;
use std::process;
use std::time::Instant;

use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unobot::{Bot, Game, create_bot_from_spec, intent, label_for_spec, winner_points};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(name = "winrate", about = "Run many Uno rounds and report per-bot win rates.")]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Play with the 7-0 rule
    #[arg(long = "seven-zero", action = ArgAction::SetTrue)]
    seven_zero: bool,

    /// Safety cap on actions per game; games exceeding this are aborted (not counted as a win)
    #[arg(long = "max-turns", default_value_t = 5000)]
    max_turns: usize,

    /// Log engine transitions at debug level
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player bot specs, four in total: e.g. hard hard easy random
    bots: Vec<String>,
}

#[derive(Default)]
struct Tally {
    wins: usize,
    seats: usize,
    points: u64,
    decision_ns: u128,
    decisions: usize,
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
    if args.bots.len() != 4 {
        return Err(format!(
            "please provide exactly 4 bot specs (e.g. hard hard easy random), received {}",
            args.bots.len()
        )
        .into());
    }
    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    let mut exhausted_games = 0usize;
    let mut aborted_games = 0usize;
    let labels_for_spec: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..args.bots.len()).collect();
        let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let deck_seed = mix_seed(args.seed, game_idx as u64, 0x5EED_15);
        let mut game = Game::builder()
            .with_seed(deck_seed)
            .with_seven_zero(args.seven_zero)
            .build()?;

        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(indices.len());
        let mut labels: Vec<String> = Vec::with_capacity(indices.len());
        for (seat, src_idx) in indices.iter().enumerate() {
            let bot_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(&args.bots[*src_idx], seat, bot_seed)?);
            labels.push(labels_for_spec[*src_idx].clone());
        }
        for label in &labels {
            tallies.entry(label.clone()).or_default().seats += 1;
        }

        let mut turns = 0usize;
        while !game.is_finished() && turns < args.max_turns {
            let current = game.current_player();
            let view = game.state_view(current)?;
            let t0 = Instant::now();
            let Some(action) = intent(bots[current].as_mut(), &view, game.turn_phase()) else {
                break;
            };
            let tally = tallies.entry(labels[current].clone()).or_default();
            tally.decision_ns += t0.elapsed().as_nanos();
            tally.decisions += 1;
            game.apply_action(current, action)?;
            turns += 1;
        }

        match game.winner() {
            Some(winner) => {
                let tally = tallies.entry(labels[winner].clone()).or_default();
                tally.wins += 1;
                tally.points += u64::from(winner_points(game.engine(), winner));
            }
            None if game.is_finished() => exhausted_games += 1,
            None => aborted_games += 1,
        }
    }
    info!(games = args.games, exhausted_games, aborted_games, "batch finished");

    let mut results: Vec<(&String, &Tally)> = tallies.iter().collect();
    results.sort_by(|a, b| {
        rate(b.1)
            .partial_cmp(&rate(a.1))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    println!("Win rates (per-seat) with scoring:");
    for (label, tally) in &results {
        let avg_points = if tally.seats > 0 {
            tally.points as f64 / tally.seats as f64
        } else {
            0.0
        };
        println!(
            "  {label:<10}  {}/{}  ({:.2}%)   avg pts: {:>7.2}   total pts: {}",
            tally.wins,
            tally.seats,
            rate(tally) * 100.0,
            avg_points,
            tally.points
        );
    }
    if exhausted_games > 0 {
        println!("\nNote: {exhausted_games} game(s) stopped with an exhausted deck.");
    }
    if aborted_games > 0 {
        println!("Note: {aborted_games} game(s) hit the action cap.");
    }

    println!("\nDecision time (per bot label):");
    for (label, tally) in &results {
        let total_ms = tally.decision_ns as f64 / 1.0e6;
        let avg_ms = if tally.decisions > 0 {
            total_ms / tally.decisions as f64
        } else {
            0.0
        };
        println!(
            "  {label:<10}  decisions: {:<8}  total: {total_ms:.3} ms  avg: {avg_ms:.4} ms",
            tally.decisions
        );
    }
    Ok(())
}

fn rate(tally: &Tally) -> f64 {
    if tally.seats > 0 {
        tally.wins as f64 / tally.seats as f64
    } else {
        0.0
    }
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // xorshift-style mix
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
