use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, MAX_HOLD_CARDS};

/// Real-time information about one seat.
///
/// `strong_color` is the color this player last declared with a wild card,
/// kept until they play a colored card of that color. `weak_color` is the
/// legal color at the moment they chose to draw, kept until they play a card
/// of that color. Opponents read both to guess what the hidden hand holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) hand: Vec<Card>,
    pub(crate) recent: Option<Card>,
    pub(crate) strong_color: Option<Color>,
    pub(crate) weak_color: Option<Color>,
}

impl Player {
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Card played in this player's last action, or `None` if they drew.
    pub fn recent(&self) -> Option<Card> {
        self.recent
    }

    pub fn strong_color(&self) -> Option<Color> {
        self.strong_color
    }

    pub fn weak_color(&self) -> Option<Color> {
        self.weak_color
    }

    pub fn is_full(&self) -> bool {
        self.hand.len() >= MAX_HOLD_CARDS
    }

    /// Wilds are worth 50, action cards 20, number cards their face value.
    pub fn hand_score(&self) -> u32 {
        self.hand.iter().map(Card::score).sum()
    }

    /// Inserts the card at its sorted display position and returns that index.
    pub(crate) fn receive(&mut self, card: Card) -> usize {
        let index = self.hand.partition_point(|held| *held < card);
        self.hand.insert(index, card);
        index
    }

    /// Records a played card and updates the color signals.
    pub(crate) fn record_play(&mut self, card: Card, effective: Color) {
        self.recent = Some(card);
        if card.is_wild() {
            self.strong_color = Some(effective);
        } else if self.strong_color == card.color {
            self.strong_color = None;
        }
        if self.weak_color == Some(effective) {
            self.weak_color = None;
        }
    }
}
