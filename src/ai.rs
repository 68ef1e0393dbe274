//! Entry points for choosing a move on behalf of the acting seat.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bot::Decision;
use crate::bots::{easy, hard, seven_zero};
use crate::card::Card;
use crate::state::TableView;

pub use crate::bots::rules::{best_swap_target, calc_best_color, need_to_challenge};

/// The card-selection strategies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Easy,
    Hard,
    /// For tables playing the 7-0 rule.
    SevenZero,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Easy => "easy",
            Strategy::Hard => "hard",
            Strategy::SevenZero => "sevenzero",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Strategy::Easy),
            "hard" => Ok(Strategy::Hard),
            "sevenzero" | "seven-zero" | "7-0" => Ok(Strategy::SevenZero),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Picks the card to play for the seat in `view`, or a draw.
///
/// `drawn` is the card just drawn voluntarily; when set, only that card is
/// considered. Only the hard strategy consumes `rng`.
pub fn select_card_to_play<R: Rng>(
    strategy: Strategy,
    view: &TableView,
    drawn: Option<Card>,
    rng: &mut R,
) -> Decision {
    match strategy {
        Strategy::Easy => easy::best_card(view, drawn),
        Strategy::Hard => hard::best_card(view, drawn, rng),
        Strategy::SevenZero => seven_zero::best_card(view, drawn),
    }
}
