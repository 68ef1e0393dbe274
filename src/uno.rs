use std::array::from_fn;
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::action::{Direction, PlayerId};
use crate::card::{
    Card, Color, Content, DECK_SIZE, INITIAL_HAND_SIZE, PlayedCard, SEATS, full_deck,
};
use crate::error::{GameError, InvalidAction};
use crate::player::Player;
use crate::state::{PlayerPublicState, TableView};

/// Rules engine for one table of four seats.
///
/// Owns every card of the deck. Cards only move between the draw pile, the
/// hands and the discard pile (`buried` plus `top`); none are created or
/// dropped after construction. The engine never advances turns by itself:
/// skips, reverses and penalties are applied by the caller after inspecting
/// the card returned from [`Uno::play`].
pub struct Uno {
    players: [Player; SEATS],
    draw_pile: VecDeque<Card>,
    /// Played cards below the top discard, oldest first.
    buried: Vec<PlayedCard>,
    top: PlayedCard,
    direction: Direction,
    now: PlayerId,
    rng: StdRng,
}

struct Layout {
    players: [Player; SEATS],
    draw_pile: VecDeque<Card>,
    top: PlayedCard,
}

impl Uno {
    /// Creates an engine and deals the first round from a shuffled deck.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = full_deck();
        deck.shuffle(&mut rng);
        let layout = Self::lay_out(deck, &mut rng);
        Self::from_layout(layout, rng)
    }

    /// Creates an engine whose first round is dealt from `deck` in order.
    /// The front of `deck` is the top of the draw pile.
    pub fn with_deck(deck: Vec<Card>, seed: u64) -> Result<Self, GameError> {
        validate_deck(&deck)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = Self::lay_out(deck, &mut rng);
        Ok(Self::from_layout(layout, rng))
    }

    fn from_layout(layout: Layout, rng: StdRng) -> Self {
        Self {
            players: layout.players,
            draw_pile: layout.draw_pile,
            buried: Vec::new(),
            top: layout.top,
            direction: Direction::Left,
            now: 0,
            rng,
        }
    }

    /// Starts a new round: reshuffles all 108 cards, deals seven to each
    /// seat and turns up the start card.
    pub fn start(&mut self) {
        let mut deck = full_deck();
        deck.shuffle(&mut self.rng);
        self.restart_with(deck);
    }

    /// Starts a new round from a caller-supplied deck order.
    pub fn start_with_deck(&mut self, deck: Vec<Card>) -> Result<(), GameError> {
        validate_deck(&deck)?;
        self.restart_with(deck);
        Ok(())
    }

    fn restart_with(&mut self, deck: Vec<Card>) {
        let layout = Self::lay_out(deck, &mut self.rng);
        self.players = layout.players;
        self.draw_pile = layout.draw_pile;
        self.buried.clear();
        self.top = layout.top;
        self.direction = Direction::Left;
        self.now = 0;
    }

    fn lay_out(deck: Vec<Card>, rng: &mut StdRng) -> Layout {
        let mut draw_pile: VecDeque<Card> = deck.into();
        let mut players: [Player; SEATS] = from_fn(|_| Player::default());
        for _ in 0..INITIAL_HAND_SIZE {
            for player in players.iter_mut() {
                if let Some(card) = draw_pile.pop_front() {
                    player.receive(card);
                }
            }
        }

        // A wild +4 never opens the round: tuck it back somewhere below the
        // top of the draw pile and turn up the next card.
        let top = loop {
            let Some(card) = draw_pile.pop_front() else {
                unreachable!("a validated deck always has cards left after dealing");
            };
            match card.content {
                Content::WildDraw4 => {
                    let at = rng.gen_range(1..=draw_pile.len());
                    draw_pile.insert(at, card);
                }
                Content::Wild => {
                    let color = Color::ALL[rng.gen_range(0..Color::ALL.len())];
                    break PlayedCard { card, color };
                }
                _ => {
                    let Some(color) = card.color else {
                        unreachable!("non-wild cards always carry a color");
                    };
                    break PlayedCard { card, color };
                }
            }
        };
        debug!(start = %top, deck = draw_pile.len(), "dealt new round");
        Layout {
            players,
            draw_pile,
            top,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Flips the turn order. Returns the new direction.
    pub fn switch_direction(&mut self) -> Direction {
        self.direction = self.direction.flipped();
        debug!(direction = ?self.direction, "direction switched");
        self.direction
    }

    /// Seat currently in action.
    pub fn now(&self) -> PlayerId {
        self.now
    }

    pub fn set_now(&mut self, who: PlayerId) -> Result<(), GameError> {
        self.check_seat(who)?;
        self.now = who;
        Ok(())
    }

    /// Moves the turn to the next seat and returns it.
    pub fn switch_now(&mut self) -> PlayerId {
        self.now = self.next();
        self.now
    }

    pub fn next(&self) -> PlayerId {
        (self.now + self.direction.step()) % SEATS
    }

    pub fn prev(&self) -> PlayerId {
        (self.now + SEATS - self.direction.step()) % SEATS
    }

    pub fn oppo(&self) -> PlayerId {
        (self.now + 2) % SEATS
    }

    pub fn player(&self, who: PlayerId) -> Result<&Player, GameError> {
        self.players.get(who).ok_or(GameError::InvalidPlayer(who))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Cards left in the draw pile.
    pub fn deck_count(&self) -> usize {
        self.draw_pile.len()
    }

    /// Discards below the top card, all of which can be recycled.
    pub fn used_count(&self) -> usize {
        self.buried.len()
    }

    pub fn top(&self) -> PlayedCard {
        self.top
    }

    /// The discard directly below the top card.
    pub fn below_top(&self) -> Option<PlayedCard> {
        self.buried.last().copied()
    }

    /// Every card played since the last recycle, oldest first, ending with
    /// the top discard.
    pub fn recent(&self) -> impl Iterator<Item = &PlayedCard> + '_ {
        self.buried.iter().chain(std::iter::once(&self.top))
    }

    /// Every card on the table wherever it lies. Always 108 distinct cards.
    pub fn census(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend(self.draw_pile.iter().copied());
        for player in &self.players {
            cards.extend(player.hand.iter().copied());
        }
        cards.extend(self.recent().map(|played| played.card));
        cards
    }

    /// Legal iff wild, or same color or same content as the top discard.
    /// Wild +4 honesty is not checked here; it is settled by a challenge.
    pub fn is_legal_to_play(&self, card: &Card) -> bool {
        card.is_wild()
            || card.color == Some(self.top.color)
            || card.content == self.top.card.content
    }

    /// Voluntary draw: the seat could not or would not follow the top color,
    /// so that color becomes its weak color.
    ///
    /// Returns `Ok(None)` when the seat already holds the maximum number of
    /// cards, and [`GameError::DeckExhausted`] when nothing can be drawn.
    pub fn draw(&mut self, who: PlayerId) -> Result<Option<Card>, GameError> {
        let drawn = self.draw_card(who)?;
        if drawn.is_some() {
            self.players[who].weak_color = Some(self.top.color);
        }
        Ok(drawn)
    }

    /// Draw imposed by a +2, a wild +4 or a lost challenge. Same as
    /// [`Uno::draw`] but leaves the weak color alone.
    pub fn draw_penalty(&mut self, who: PlayerId) -> Result<Option<Card>, GameError> {
        self.draw_card(who)
    }

    fn draw_card(&mut self, who: PlayerId) -> Result<Option<Card>, GameError> {
        self.check_seat(who)?;
        if self.draw_pile.is_empty() {
            self.recycle();
        }
        if self.draw_pile.is_empty() {
            warn!(player = who, "draw pile exhausted");
            return Err(GameError::DeckExhausted);
        }
        if self.players[who].is_full() {
            debug!(player = who, "hand is full, nothing drawn");
            return Ok(None);
        }
        let Some(card) = self.draw_pile.pop_front() else {
            return Err(GameError::DeckExhausted);
        };
        let player = &mut self.players[who];
        player.receive(card);
        player.recent = None;
        debug!(player = who, card = %card, left = self.draw_pile.len(), "drew");
        Ok(Some(card))
    }

    /// Moves every discard except the top back under the draw pile, shuffled.
    /// Declared wild colors are forgotten on the way.
    fn recycle(&mut self) {
        if self.buried.is_empty() {
            return;
        }
        let mut cards: Vec<Card> = self.buried.drain(..).map(|played| played.card).collect();
        cards.shuffle(&mut self.rng);
        debug!(count = cards.len(), "recycled discards into draw pile");
        self.draw_pile.extend(cards);
    }

    /// Plays `who`'s card at `index`. The caller has already checked
    /// [`Uno::is_legal_to_play`]. Wild cards need a declared color; other
    /// cards must not carry one.
    pub fn play(
        &mut self,
        who: PlayerId,
        index: usize,
        color: Option<Color>,
    ) -> Result<PlayedCard, GameError> {
        self.check_seat(who)?;
        let card = *self.players[who]
            .hand
            .get(index)
            .ok_or(InvalidAction::HandIndex(index))?;
        let effective = match (card.is_wild(), card.color, color) {
            (true, _, Some(declared)) => declared,
            (true, _, None) => return Err(InvalidAction::MissingWildColor.into()),
            (false, _, Some(_)) => return Err(InvalidAction::UnexpectedWildColor.into()),
            (false, Some(own), None) => own,
            (false, None, None) => unreachable!("non-wild cards always carry a color"),
        };

        let player = &mut self.players[who];
        player.hand.remove(index);
        player.record_play(card, effective);
        let played = PlayedCard {
            card,
            color: effective,
        };
        let previous = std::mem::replace(&mut self.top, played);
        self.buried.push(previous);
        debug!(player = who, card = %played, left = player.hand.len(), "played");
        Ok(played)
    }

    /// Scores each color over `whom`'s hand: zeros 1, other numbers 2,
    /// action cards 3. Ties and all-wild hands resolve to red.
    pub fn best_color_for(&self, whom: PlayerId) -> Result<Color, GameError> {
        let player = self.player(whom)?;
        let mut score = [0u32; 4];
        for card in &player.hand {
            let Some(color) = card.color else { continue };
            score[color.index()] += match card.content {
                Content::Number(0) => 1,
                Content::Number(_) => 2,
                Content::Draw2 | Content::Skip | Content::Rev => 3,
                Content::Wild | Content::WildDraw4 => 0,
            };
        }
        Ok(argmax_color(&score))
    }

    /// Whether the wild +4 on top was played honestly, i.e. its player holds
    /// no card of the color that was legal before it.
    pub fn draw4_was_legal(&self, who: PlayerId) -> Result<bool, GameError> {
        let player = self.player(who)?;
        let Some(before) = self.below_top() else {
            return Ok(true);
        };
        Ok(!player.hand.iter().any(|card| card.color == Some(before.color)))
    }

    /// Swaps two seats' hands (7-0 rule). Color signals stay with the seat.
    pub fn swap(&mut self, a: PlayerId, b: PlayerId) -> Result<(), GameError> {
        self.check_seat(a)?;
        self.check_seat(b)?;
        if a == b {
            return Err(InvalidAction::SwapWithSelf.into());
        }
        let hand_a = std::mem::take(&mut self.players[a].hand);
        let hand_b = std::mem::replace(&mut self.players[b].hand, hand_a);
        self.players[a].hand = hand_b;
        debug!(a, b, "swapped hands");
        Ok(())
    }

    /// Passes every hand to the next seat in the current direction (7-0 rule).
    pub fn cycle(&mut self) {
        let step = self.direction.step();
        let hands: Vec<Vec<Card>> = self
            .players
            .iter_mut()
            .map(|player| std::mem::take(&mut player.hand))
            .collect();
        for (seat, hand) in hands.into_iter().enumerate() {
            self.players[(seat + step) % SEATS].hand = hand;
        }
        debug!(direction = ?self.direction, "cycled hands");
    }

    /// Public snapshot from `perspective`'s seat.
    pub fn view(&self, perspective: PlayerId) -> Result<TableView, GameError> {
        let me = self.player(perspective)?;
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(id, player)| PlayerPublicState {
                id,
                hand_size: player.hand.len(),
                recent: player.recent,
                strong_color: player.strong_color,
                weak_color: player.weak_color,
            })
            .collect();
        Ok(TableView {
            self_player: perspective,
            current_player: self.now,
            direction: self.direction,
            top: self.top,
            below_top: self.below_top(),
            draw_pile_count: self.draw_pile.len(),
            used_count: self.buried.len(),
            players,
            hand: me.hand.clone(),
        })
    }

    fn check_seat(&self, who: PlayerId) -> Result<(), GameError> {
        if who < SEATS {
            Ok(())
        } else {
            Err(GameError::InvalidPlayer(who))
        }
    }
}

/// Highest-scoring color, scanning red, blue, green, yellow and keeping the
/// earlier color on ties.
pub(crate) fn argmax_color(score: &[u32; 4]) -> Color {
    let mut best = Color::Red;
    for color in Color::ALL {
        if score[color.index()] > score[best.index()] {
            best = color;
        }
    }
    best
}

fn validate_deck(deck: &[Card]) -> Result<(), GameError> {
    let mut given = deck.to_vec();
    given.sort();
    let mut expected = full_deck();
    expected.sort();
    if given != expected {
        return Err(GameError::InvalidConfiguration(
            "deck must contain each of the 108 cards exactly once",
        ));
    }
    Ok(())
}
