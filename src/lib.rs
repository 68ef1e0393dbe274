//! Four-seat Uno rules engine with heuristic AI players and a turn
//! orchestrator for simulations.

pub mod action;
pub mod ai;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod player;
pub mod score;
pub mod state;
pub mod uno;
pub mod visualize;

pub use crate::action::{Action, Direction, PlayerId};
pub use crate::ai::{Strategy, select_card_to_play};
pub use crate::bot::{Bot, Decision, drive, intent};
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{EasyBot, HardBot, HumanBot, RandomBot, SevenZeroBot};
pub use crate::card::{Card, Color, Content, MAX_HOLD_CARDS, PlayedCard, full_deck};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::player::Player;
pub use crate::score::winner_points;
pub use crate::state::{GameStatus, PlayerPublicState, TableView, TurnPhase};
pub use crate::uno::Uno;
pub use crate::visualize::{VisualOptions, describe_action, render_state};
