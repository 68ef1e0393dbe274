use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Bot;
use crate::ai::Strategy;
use crate::bots::{EasyBot, HardBot, HumanBot, RandomBot, SevenZeroBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Seed for the bot at `index` when the spec does not carry its own.
fn seat_seed(seed: u64, index: usize) -> u64 {
    seed ^ ((index as u64 + 1) * 0x9E37_79B9)
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - easy
/// - hard[:seed]
/// - sevenzero
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let label = label_for_spec(spec);
    let custom_seed = || {
        spec.split_once(':')
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .unwrap_or_else(|| seat_seed(seed, index))
    };
    match label.as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed())))),
        other => match other.parse::<Strategy>()? {
            Strategy::Easy => Ok(Box::new(EasyBot::new())),
            Strategy::Hard => Ok(Box::new(HardBot::new(StdRng::seed_from_u64(custom_seed())))),
            Strategy::SevenZero => Ok(Box::new(SevenZeroBot::new())),
        },
    }
}
