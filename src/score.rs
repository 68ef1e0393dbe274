//! Scoring utilities for Uno simulations.
//!
//! The winner of a round scores the value of every card left in the other
//! hands: wilds 50, action cards 20, numbers their face value. Non-winning
//! players and exhausted rounds score nothing.

use crate::action::PlayerId;
use crate::uno::Uno;

/// Compute the winner's points for a finished round.
///
/// Assumes `winner` is a valid seat. If the round was not won, the caller
/// should skip calling this.
pub fn winner_points(uno: &Uno, winner: PlayerId) -> u32 {
    uno.players()
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != winner)
        .map(|(_, player)| player.hand_score())
        .sum()
}
