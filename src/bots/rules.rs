//! Shared machinery for the rule-based strategies.
//!
//! Every strategy scans the hand once into [`Candidates`], picks the
//! situation it is in, and walks that situation's ordered rule table. The
//! first rule that yields a [`Choice`] wins; when none does the player draws.

use rand::Rng;
use tracing::trace;

use crate::action::PlayerId;
use crate::bot::Decision;
use crate::card::{Card, Color, Content, MAX_HOLD_CARDS};
use crate::state::{PlayerPublicState, TableView};
use crate::uno::argmax_color;

/// Best color over the acting hand: zeros and reverses 2, skips and +2s 5,
/// other numbers 4. Ties and all-wild hands resolve to red.
pub fn calc_best_color(hand: &[Card]) -> Color {
    let mut score = [0u32; 4];
    for card in hand {
        let Some(color) = card.color else { continue };
        score[color.index()] += match card.content {
            Content::Rev | Content::Number(0) => 2,
            Content::Skip | Content::Draw2 => 5,
            Content::Number(_) => 4,
            Content::Wild | Content::WildDraw4 => 0,
        };
    }
    argmax_color(&score)
}

/// Whether the seat in `view` should contest the wild +4 on top.
///
/// Always challenges at one card (protecting an UNO) and at
/// `MAX_HOLD_CARDS - 4` or more (a failed challenge costs at most the cards
/// that still fit). Otherwise challenges only when the +4 left the legal
/// color unchanged.
pub fn need_to_challenge(view: &TableView) -> bool {
    let size = view.hand.len();
    if size == 1 || size >= MAX_HOLD_CARDS - 4 {
        return true;
    }
    view.below_top
        .map(|before| before.color == view.top.color)
        .unwrap_or(false)
}

/// Seat to swap hands with after a 7. Starts from the previous seat and
/// moves to the opposite, then the next seat when that one holds fewer cards
/// without being weak in the current color, or is strong in it while the
/// current target is not.
pub fn best_swap_target(view: &TableView) -> PlayerId {
    let me = view.self_player;
    let last = Some(view.last_color());
    let prefer = |candidate: &PlayerPublicState, target: &PlayerPublicState| {
        (candidate.hand_size < target.hand_size && candidate.weak_color != last)
            || (candidate.strong_color == last && target.strong_color != last)
    };

    let mut who = view.prev_of(me);
    for candidate in [view.oppo_of(me), view.next_of(me)] {
        if prefer(&view.players[candidate], &view.players[who]) {
            who = candidate;
        }
    }
    who
}

/// Uniform pick among the colors not in `forbidden`, unless `preferred`
/// is already allowed.
pub(crate) fn pick_color<R: Rng>(
    rng: &mut R,
    preferred: Color,
    forbidden: &[Option<Color>],
) -> Color {
    let is_forbidden = |color: Color| forbidden.contains(&Some(color));
    if !is_forbidden(preferred) {
        return preferred;
    }
    let allowed: Vec<Color> = Color::ALL.into_iter().filter(|c| !is_forbidden(*c)).collect();
    if allowed.is_empty() {
        return preferred;
    }
    allowed[rng.gen_range(0..allowed.len())]
}

/// Playable cards of the hand, one representative index per kind.
///
/// For numbers, reverses, skips, +2s, zeros and sevens the representative is
/// the last legal one in the best color, or the first legal one otherwise.
/// `num_in` keeps the first legal number card of each color.
#[derive(Clone, Debug, Default)]
pub(crate) struct Candidates {
    pub num: Option<usize>,
    pub plain_num: Option<usize>,
    pub num_in: [Option<usize>; 4],
    pub zero: Option<usize>,
    pub seven: Option<usize>,
    pub rev: Option<usize>,
    pub skip: Option<usize>,
    pub draw2: Option<usize>,
    pub wild: Option<usize>,
    pub wd4: Option<usize>,
    pub all_wild: bool,
}

impl Candidates {
    pub fn scan(view: &TableView, drawn: Option<Card>, best: Color) -> Self {
        let mut found = Self {
            all_wild: true,
            ..Self::default()
        };
        let prefer = |slot: &mut Option<usize>, index: usize, card: &Card| {
            if slot.is_none() || card.color == Some(best) {
                *slot = Some(index);
            }
        };
        for (index, card) in view.hand.iter().enumerate() {
            found.all_wild &= card.is_wild();
            let legal = drawn.is_none_or(|drawn| *card == drawn) && view.is_legal_to_play(card);
            if !legal {
                continue;
            }
            match card.content {
                Content::Draw2 => prefer(&mut found.draw2, index, card),
                Content::Skip => prefer(&mut found.skip, index, card),
                Content::Rev => prefer(&mut found.rev, index, card),
                Content::Wild => found.wild = Some(index),
                Content::WildDraw4 => found.wd4 = Some(index),
                Content::Number(n) => {
                    prefer(&mut found.num, index, card);
                    match n {
                        0 => prefer(&mut found.zero, index, card),
                        7 => prefer(&mut found.seven, index, card),
                        _ => prefer(&mut found.plain_num, index, card),
                    }
                    if let Some(color) = card.color {
                        found.num_in[color.index()].get_or_insert(index);
                    }
                }
            }
        }
        found
    }
}

/// Public signals of one opponent, with a signed hand size for comparisons.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Seat {
    pub size: i32,
    pub strong: Option<Color>,
    pub weak: Option<Color>,
    pub recent: Option<Card>,
}

impl Seat {
    fn of(player: &PlayerPublicState) -> Self {
        Self {
            size: player.hand_size as i32,
            strong: player.strong_color,
            weak: player.weak_color,
            recent: player.recent,
        }
    }
}

/// Everything a rule may look at.
pub(crate) struct Context<'a> {
    pub hand: &'a [Card],
    pub found: Candidates,
    pub best: Color,
    /// Color to declare when a rule plays a wild card defensively.
    pub safe: Color,
    pub last: Color,
    pub size: i32,
    pub next: Seat,
    pub oppo: Seat,
    pub prev: Seat,
}

impl<'a> Context<'a> {
    pub fn new(view: &'a TableView, drawn: Option<Card>) -> Self {
        let best = calc_best_color(&view.hand);
        let me = view.self_player;
        Self {
            hand: &view.hand,
            found: Candidates::scan(view, drawn, best),
            best,
            safe: best,
            last: view.last_color(),
            size: view.hand.len() as i32,
            next: Seat::of(&view.players[view.next_of(me)]),
            oppo: Seat::of(&view.players[view.oppo_of(me)]),
            prev: Seat::of(&view.players[view.prev_of(me)]),
        }
    }

    /// Color of the hand card at `index`.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.hand.get(index).and_then(|card| card.color)
    }

    pub fn num_in(&self, color: Color) -> Option<usize> {
        self.found.num_in[color.index()]
    }

    /// First number card, scanning red to yellow, whose color passes `ok`.
    pub fn num_where(&self, ok: impl Fn(Color) -> bool) -> Option<Choice> {
        Color::ALL
            .into_iter()
            .filter(|color| ok(*color))
            .find_map(|color| self.num_in(color))
            .map(Choice::keep)
    }
}

/// A rule's pick: a hand index and, for wild cards, an override of the
/// declared color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Choice {
    pub index: usize,
    pub declare: Option<Color>,
}

impl Choice {
    pub fn keep(index: usize) -> Self {
        Self {
            index,
            declare: None,
        }
    }

    pub fn declaring(index: usize, color: Color) -> Self {
        Self {
            index,
            declare: Some(color),
        }
    }
}

pub(crate) type Pick = fn(&Context<'_>) -> Option<Choice>;

pub(crate) struct Rule {
    pub name: &'static str,
    pub pick: Pick,
}

macro_rules! rule {
    ($name:expr, |$ctx:ident| $body:expr) => {
        $crate::bots::rules::Rule {
            name: $name,
            pick: |$ctx: &$crate::bots::rules::Context<'_>| $body,
        }
    };
}
pub(crate) use rule;

/// Walks `rules` in order and returns the first match.
pub(crate) fn first_match(table: &str, rules: &[Rule], ctx: &Context<'_>) -> Option<Choice> {
    rules.iter().find_map(|rule| {
        let choice = (rule.pick)(ctx)?;
        trace!(table, rule = rule.name, index = choice.index, "rule matched");
        Some(choice)
    })
}

/// A one-card hand plays that card when legal and draws otherwise.
pub(crate) fn last_card(view: &TableView) -> Option<Decision> {
    let [card] = view.hand.as_slice() else {
        return None;
    };
    let color = card.color.unwrap_or_else(|| calc_best_color(&view.hand));
    Some(if view.is_legal_to_play(card) {
        Decision::play(0, color)
    } else {
        Decision::draw(color)
    })
}

/// Turns a rule-table outcome into a decision.
pub(crate) fn decide(ctx: &Context<'_>, choice: Option<Choice>) -> Decision {
    match choice {
        Some(choice) => Decision::play(choice.index, choice.declare.unwrap_or(ctx.best)),
        None => Decision::draw(ctx.best),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::card::PlayedCard;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(id: u8, color: Option<Color>, content: Content) -> Card {
        Card::new(id, color, content)
    }

    fn view(hand: Vec<Card>, top: PlayedCard, below: Option<PlayedCard>) -> TableView {
        let players = (0..4)
            .map(|id| PlayerPublicState {
                id,
                hand_size: if id == 0 { hand.len() } else { 7 },
                recent: None,
                strong_color: None,
                weak_color: None,
            })
            .collect();
        TableView {
            self_player: 0,
            current_player: 0,
            direction: Direction::Left,
            top,
            below_top: below,
            draw_pile_count: 50,
            used_count: 0,
            players,
            hand,
        }
    }

    #[test]
    fn best_color_weights_actions_above_numbers() {
        let hand = vec![
            card(1, Some(Color::Red), Content::Number(3)),
            card(2, Some(Color::Blue), Content::Skip),
            card(3, Some(Color::Green), Content::Rev),
            card(4, Some(Color::Green), Content::Number(0)),
        ];
        // red 4, blue 5, green 2 + 2
        assert_eq!(calc_best_color(&hand), Color::Blue);
        assert_eq!(calc_best_color(&[card(5, None, Content::Wild)]), Color::Red);
    }

    #[test]
    fn pick_color_avoids_forbidden_set() {
        let mut rng = StdRng::seed_from_u64(9);
        let forbidden = [Some(Color::Red), Some(Color::Blue), Some(Color::Green)];
        for _ in 0..20 {
            assert_eq!(pick_color(&mut rng, Color::Red, &forbidden), Color::Yellow);
        }
        assert_eq!(pick_color(&mut rng, Color::Blue, &[None]), Color::Blue);
    }

    #[test]
    fn scan_prefers_best_color_and_respects_drawn_card() {
        let hand = vec![
            card(1, Some(Color::Red), Content::Number(5)),
            card(2, Some(Color::Blue), Content::Number(5)),
            card(3, Some(Color::Blue), Content::Number(2)),
            card(4, None, Content::Wild),
        ];
        let top = PlayedCard {
            card: card(9, Some(Color::Blue), Content::Number(8)),
            color: Color::Blue,
        };
        let v = view(hand.clone(), top, None);
        let found = Candidates::scan(&v, None, Color::Red);
        assert_eq!(found.num, Some(1));
        assert_eq!(found.num_in[Color::Blue.index()], Some(1));
        assert_eq!(found.num_in[Color::Red.index()], None);
        assert_eq!(found.wild, Some(3));
        assert!(!found.all_wild);

        let only_drawn = Candidates::scan(&v, Some(hand[2]), Color::Red);
        assert_eq!(only_drawn.num, Some(2));
        assert_eq!(only_drawn.wild, None);
    }

    #[test]
    fn challenge_heuristic() {
        let top = PlayedCard {
            card: card(100, None, Content::WildDraw4),
            color: Color::Red,
        };
        let red_three = PlayedCard {
            card: card(5, Some(Color::Red), Content::Number(3)),
            color: Color::Red,
        };
        let blue_three = PlayedCard {
            card: card(6, Some(Color::Blue), Content::Number(3)),
            color: Color::Blue,
        };
        let five: Vec<Card> = (10..15)
            .map(|id| card(id, Some(Color::Green), Content::Number(1)))
            .collect();
        assert!(need_to_challenge(&view(five.clone(), top, Some(red_three))));
        assert!(!need_to_challenge(&view(five, top, Some(blue_three))));
        let one = vec![card(10, Some(Color::Green), Content::Number(1))];
        assert!(need_to_challenge(&view(one, top, Some(blue_three))));
        let eleven: Vec<Card> = (10..21)
            .map(|id| card(id, Some(Color::Green), Content::Number(1)))
            .collect();
        assert!(need_to_challenge(&view(eleven, top, Some(blue_three))));
    }

    #[test]
    fn swap_target_defaults_to_previous_seat() {
        let top = PlayedCard {
            card: card(7, Some(Color::Red), Content::Number(7)),
            color: Color::Red,
        };
        let mut v = view(vec![card(1, Some(Color::Red), Content::Number(2))], top, None);
        assert_eq!(best_swap_target(&v), 3);

        // opposite seat holds fewer cards and is not weak in red
        v.players[2].hand_size = 3;
        assert_eq!(best_swap_target(&v), 2);

        // next seat is strong in red while the opposite seat is not
        v.players[1].strong_color = Some(Color::Red);
        assert_eq!(best_swap_target(&v), 1);

        // a seat weak in red is never chosen for size alone
        v.players[1].strong_color = None;
        v.players[2].weak_color = Some(Color::Red);
        assert_eq!(best_swap_target(&v), 3);
    }
}
