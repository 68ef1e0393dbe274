use serde::{Deserialize, Serialize};

use crate::action::{Direction, PlayerId};
use crate::card::{Card, Color, PlayedCard, SEATS};
use crate::error::GameError;

/// Public portion of a seat that every opponent may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub hand_size: usize,
    /// Card played in the seat's last action, `None` after a draw.
    pub recent: Option<Card>,
    pub strong_color: Option<Color>,
    pub weak_color: Option<Color>,
}

/// Status of the round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    /// Neither the draw pile nor the buried discards had a card left.
    Exhausted,
}

/// What the orchestrator is waiting for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingAction,
    /// The acting seat drew a legal card and may play it right away.
    AwaitingDrawnCard { card: Card },
    /// A wild +4 was played; `challenger` may contest it.
    AwaitingChallenge { challenger: PlayerId },
    /// A 7 was played under the 7-0 rule.
    AwaitingSwapTarget,
    GameOver,
}

/// Snapshot of the table from one seat's point of view. Strategies are pure
/// functions of this value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub top: PlayedCard,
    /// The discard directly below `top`, if any.
    pub below_top: Option<PlayedCard>,
    pub draw_pile_count: usize,
    pub used_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl TableView {
    pub fn player(&self, id: PlayerId) -> Result<&PlayerPublicState, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    /// Effective color of the top discard.
    #[inline]
    pub fn last_color(&self) -> Color {
        self.top.color
    }

    #[inline]
    pub fn next_of(&self, seat: PlayerId) -> PlayerId {
        (seat + self.direction.step()) % SEATS
    }

    #[inline]
    pub fn prev_of(&self, seat: PlayerId) -> PlayerId {
        (seat + SEATS - self.direction.step()) % SEATS
    }

    #[inline]
    pub fn oppo_of(&self, seat: PlayerId) -> PlayerId {
        (seat + 2) % SEATS
    }

    /// True iff `card` may be offered on the current top discard.
    pub fn is_legal_to_play(&self, card: &Card) -> bool {
        card.is_wild()
            || card.color == Some(self.top.color)
            || card.content == self.top.card.content
    }
}
