use tracing::{debug, info, warn};

use crate::action::{Action, PlayerId};
use crate::card::{Card, Color, Content, SEATS};
use crate::error::{GameError, InvalidAction};
use crate::state::{GameStatus, TableView, TurnPhase};
use crate::uno::Uno;

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Cards a wild +4 forces on the next seat.
const DRAW4_PENALTY: usize = 4;
/// Cards a failed challenge costs the challenger.
const FAILED_CHALLENGE_PENALTY: usize = 6;
const DRAW2_PENALTY: usize = 2;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    /// Play the 7-0 house rule: a 0 passes every hand along, a 7 swaps hands.
    pub seven_zero: bool,
}

impl GameConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            seven_zero: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Builder that enables deterministic deck injection for testing.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_seven_zero(mut self, enabled: bool) -> Self {
        self.config.seven_zero = enabled;
        self
    }

    /// Deal from `deck` in order instead of a shuffled deck. The front of
    /// `deck` is dealt first; it must hold each of the 108 cards once.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn orchestrator: validates intents, applies them to the engine and
/// carries out what each played card demands of the following seats.
pub struct Game {
    uno: Uno,
    config: GameConfig,
    status: GameStatus,
    phase: TurnPhase,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let uno = match deck {
            Some(deck) => Uno::with_deck(deck, config.seed)?,
            None => Uno::new(config.seed),
        };
        info!(
            seed = config.seed,
            seven_zero = config.seven_zero,
            start = %uno.top(),
            "round started"
        );
        Ok(Self {
            uno,
            config,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingAction,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    /// Seat expected to act next, whatever the phase.
    pub fn current_player(&self) -> PlayerId {
        self.uno.now()
    }

    /// Read access to the rules engine.
    pub fn engine(&self) -> &Uno {
        &self.uno
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<TableView, GameError> {
        self.uno.view(perspective)
    }

    /// Round over, either won or stopped by an exhausted deck.
    pub fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        let me = self.uno.player(player)?;
        if player != self.uno.now() {
            return Err(GameError::NotPlayersTurn);
        }

        let mut actions = Vec::new();
        match self.phase {
            TurnPhase::AwaitingAction => {
                for (hand_index, card) in me.hand().iter().enumerate() {
                    if !self.uno.is_legal_to_play(card) {
                        continue;
                    }
                    for color in declarable(card) {
                        actions.push(Action::Play { hand_index, color });
                    }
                }
                actions.push(Action::Draw);
            }
            TurnPhase::AwaitingDrawnCard { card } => {
                for color in declarable(&card) {
                    actions.push(Action::PlayDrawn { color });
                }
                actions.push(Action::KeepDrawn);
            }
            TurnPhase::AwaitingChallenge { .. } => {
                actions.push(Action::Challenge(true));
                actions.push(Action::Challenge(false));
            }
            TurnPhase::AwaitingSwapTarget => {
                actions.extend(
                    (0..SEATS)
                        .filter(|seat| *seat != player)
                        .map(Action::SwapWith),
                );
            }
            TurnPhase::GameOver => {}
        }
        Ok(actions)
    }

    /// Applies `action` for `player` and returns the phase that follows.
    ///
    /// An exhausted deck ends the round: the status becomes
    /// [`GameStatus::Exhausted`] and the call still succeeds.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<TurnPhase, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.uno.player(player)?;
        if player != self.uno.now() {
            return Err(GameError::NotPlayersTurn);
        }

        match self.step(player, action) {
            Ok(()) => {}
            Err(GameError::DeckExhausted) => {
                warn!(player, "round stopped, no card left to draw");
                self.status = GameStatus::Exhausted;
                self.phase = TurnPhase::GameOver;
            }
            Err(err) => return Err(err),
        }
        Ok(self.phase)
    }

    fn step(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        match (self.phase, action) {
            (TurnPhase::AwaitingAction, Action::Play { hand_index, color }) => {
                let card = *self
                    .uno
                    .player(player)?
                    .hand()
                    .get(hand_index)
                    .ok_or(InvalidAction::HandIndex(hand_index))?;
                if !self.uno.is_legal_to_play(&card) {
                    return Err(InvalidAction::IllegalCard(card).into());
                }
                self.play_card(player, hand_index, color)
            }
            (TurnPhase::AwaitingAction, Action::Draw) => {
                match self.uno.draw(player)? {
                    Some(card) if self.uno.is_legal_to_play(&card) => {
                        self.phase = TurnPhase::AwaitingDrawnCard { card };
                    }
                    _ => self.pass_turn(),
                }
                Ok(())
            }
            (TurnPhase::AwaitingDrawnCard { card }, Action::PlayDrawn { color }) => {
                let hand_index = self
                    .uno
                    .player(player)?
                    .hand()
                    .iter()
                    .position(|held| *held == card)
                    .ok_or(InvalidAction::NotExpected("drawn card left the hand"))?;
                self.play_card(player, hand_index, color)
            }
            (TurnPhase::AwaitingDrawnCard { .. }, Action::KeepDrawn) => {
                self.pass_turn();
                Ok(())
            }
            (TurnPhase::AwaitingChallenge { challenger }, Action::Challenge(challenge)) => {
                self.resolve_challenge(challenger, challenge)
            }
            (TurnPhase::AwaitingSwapTarget, Action::SwapWith(target)) => {
                self.uno.swap(player, target)?;
                self.pass_turn();
                Ok(())
            }
            (TurnPhase::AwaitingAction, _) => {
                Err(InvalidAction::NotExpected("expected a play or a draw").into())
            }
            (TurnPhase::AwaitingDrawnCard { .. }, _) => {
                Err(InvalidAction::NotExpected("expected to play or keep the drawn card").into())
            }
            (TurnPhase::AwaitingChallenge { .. }, _) => {
                Err(InvalidAction::NotExpected("expected a challenge decision").into())
            }
            (TurnPhase::AwaitingSwapTarget, _) => {
                Err(InvalidAction::NotExpected("expected a swap target").into())
            }
            (TurnPhase::GameOver, _) => Err(GameError::GameOver),
        }
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        color: Option<Color>,
    ) -> Result<(), GameError> {
        let played = self.uno.play(player, hand_index, color)?;
        if self.uno.player(player)?.hand_size() == 0 {
            info!(winner = player, last = %played, "round finished");
            self.status = GameStatus::Finished { winner: player };
            self.phase = TurnPhase::GameOver;
            return Ok(());
        }

        self.phase = TurnPhase::AwaitingAction;
        match played.content() {
            Content::Draw2 => {
                let victim = self.uno.switch_now();
                self.penalty(victim, DRAW2_PENALTY)?;
                self.uno.switch_now();
            }
            Content::Skip => {
                self.uno.switch_now();
                self.uno.switch_now();
            }
            Content::Rev => {
                self.uno.switch_direction();
                self.uno.switch_now();
            }
            Content::WildDraw4 => {
                let challenger = self.uno.switch_now();
                self.phase = TurnPhase::AwaitingChallenge { challenger };
            }
            Content::Number(0) if self.config.seven_zero => {
                self.uno.cycle();
                self.uno.switch_now();
            }
            Content::Number(7) if self.config.seven_zero => {
                self.phase = TurnPhase::AwaitingSwapTarget;
            }
            Content::Number(_) | Content::Wild => {
                self.uno.switch_now();
            }
        }
        Ok(())
    }

    fn resolve_challenge(
        &mut self,
        challenger: PlayerId,
        challenge: bool,
    ) -> Result<(), GameError> {
        // The wild +4 player sits right before the challenger.
        let offender = self.uno.prev();
        if !challenge {
            self.penalty(challenger, DRAW4_PENALTY)?;
            self.pass_turn();
            return Ok(());
        }
        if self.uno.draw4_was_legal(offender)? {
            debug!(challenger, offender, "challenge failed");
            self.penalty(challenger, FAILED_CHALLENGE_PENALTY)?;
            self.pass_turn();
        } else {
            debug!(challenger, offender, "challenge succeeded");
            self.penalty(offender, DRAW4_PENALTY)?;
            self.phase = TurnPhase::AwaitingAction;
        }
        Ok(())
    }

    /// Forced draws stop early once the hand is full.
    fn penalty(&mut self, who: PlayerId, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            if self.uno.draw_penalty(who)?.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn pass_turn(&mut self) {
        self.uno.switch_now();
        self.phase = TurnPhase::AwaitingAction;
    }
}

/// Declared-color options for playing `card`: one per color for wild cards.
fn declarable(card: &Card) -> Vec<Option<Color>> {
    if card.is_wild() {
        Color::ALL.into_iter().map(Some).collect()
    } else {
        vec![None]
    }
}
