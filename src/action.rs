use serde::{Deserialize, Serialize};

use crate::card::{Color, SEATS};

/// Zero-based seat index. Seat 0 is the local player in the classic layout.
pub type PlayerId = usize;

/// Order in which seats take turns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    /// Clockwise.
    Left,
    /// Counter-clockwise.
    Right,
}

impl Direction {
    /// Seat offset added (mod 4) to reach the next seat.
    #[inline]
    pub fn step(self) -> usize {
        match self {
            Direction::Left => 1,
            Direction::Right => SEATS - 1,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Intent submitted by the acting seat.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play a hand card. Wild cards require a declared color.
    Play {
        hand_index: usize,
        color: Option<Color>,
    },
    /// Draw one card from the draw pile.
    Draw,
    /// Play the card that was just drawn.
    PlayDrawn { color: Option<Color> },
    /// Keep the card that was just drawn and pass.
    KeepDrawn,
    /// Answer to a wild +4: `true` contests its legality.
    Challenge(bool),
    /// Target of a hand swap after a 7 under the 7-0 rule.
    SwapWith(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_steps_wrap_around_the_table() {
        assert_eq!((3 + Direction::Left.step()) % SEATS, 0);
        assert_eq!((0 + Direction::Right.step()) % SEATS, 3);
        assert_eq!(Direction::Left.flipped(), Direction::Right);
    }
}
