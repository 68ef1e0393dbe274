use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Action, PlayerId};
use crate::bots::rules::{best_swap_target, need_to_challenge};
use crate::card::{Card, Color};
use crate::error::GameError;
use crate::game::Game;
use crate::state::{GameStatus, TableView, TurnPhase};

/// Outcome of a card-selection strategy.
///
/// `index` is the hand position to play, or `None` to draw instead. `color`
/// is the color to declare when the chosen card is wild; for other cards it
/// is the player's best color and only informational.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub index: Option<usize>,
    pub color: Color,
}

impl Decision {
    pub fn draw(color: Color) -> Self {
        Self { index: None, color }
    }

    pub fn play(index: usize, color: Color) -> Self {
        Self {
            index: Some(index),
            color,
        }
    }
}

/// Interface for Uno players, artificial or human.
///
/// `drawn` is set right after a voluntary draw; only that card may be played
/// then.
pub trait Bot {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision;

    /// Whether to contest the wild +4 that was just played on this seat.
    fn challenge(&mut self, view: &TableView) -> bool {
        need_to_challenge(view)
    }

    /// Seat to swap hands with after playing a 7 under the 7-0 rule.
    fn swap_target(&mut self, view: &TableView) -> PlayerId {
        best_swap_target(view)
    }
}

/// Asks `bot` what to do in `phase` and phrases the answer as an [`Action`].
/// Returns `None` once the round is over.
pub fn intent(bot: &mut dyn Bot, view: &TableView, phase: TurnPhase) -> Option<Action> {
    let declared = |index: usize, color: Color| {
        view.hand
            .get(index)
            .filter(|card| card.is_wild())
            .map(|_| color)
    };
    let action = match phase {
        TurnPhase::AwaitingAction => {
            let decision = bot.choose_play(view, None);
            match decision.index {
                Some(hand_index) => Action::Play {
                    hand_index,
                    color: declared(hand_index, decision.color),
                },
                None => Action::Draw,
            }
        }
        TurnPhase::AwaitingDrawnCard { card } => {
            let decision = bot.choose_play(view, Some(card));
            match decision.index {
                Some(index) if view.hand.get(index) == Some(&card) => Action::PlayDrawn {
                    color: declared(index, decision.color),
                },
                _ => Action::KeepDrawn,
            }
        }
        TurnPhase::AwaitingChallenge { .. } => Action::Challenge(bot.challenge(view)),
        TurnPhase::AwaitingSwapTarget => Action::SwapWith(bot.swap_target(view)),
        TurnPhase::GameOver => return None,
    };
    Some(action)
}

/// Plays `game` with one bot per seat until the round ends or `max_actions`
/// intents have been applied. Returns the final status.
pub fn drive(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    max_actions: usize,
) -> Result<GameStatus, GameError> {
    if bots.len() != crate::card::SEATS {
        return Err(GameError::InvalidConfiguration("exactly four bots are required"));
    }
    for _ in 0..max_actions {
        if game.is_finished() {
            break;
        }
        let current = game.current_player();
        let view = game.state_view(current)?;
        let Some(action) = intent(bots[current].as_mut(), &view, game.turn_phase()) else {
            break;
        };
        debug!(player = current, ?action, "bot intent");
        game.apply_action(current, action)?;
    }
    Ok(game.status())
}
