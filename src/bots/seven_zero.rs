use crate::bot::{Bot, Decision};
use crate::bots::rules::{Choice, Context, Rule, decide, first_match, last_card, rule};
use crate::card::Card;
use crate::state::TableView;

/// Strategy for tables playing the 7-0 rule.
///
/// Sevens and zeros move whole hands around, so they are the first answer
/// when an opponent is at one card: steal that hand, or pass ours on.
pub struct SevenZeroBot;

impl SevenZeroBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SevenZeroBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for SevenZeroBot {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision {
        best_card(view, drawn)
    }
}

/// Whether playing the card at `index` is worth the hand exchange it
/// triggers. With two cards left the card we keep must not be able to follow
/// the one we play, or the player receiving it wins on the spot.
fn keeps_other(c: &Context<'_>, index: usize) -> bool {
    if c.size > 2 {
        return true;
    }
    let (Some(this), Some(other)) = (c.hand.get(index), c.hand.get(1 - index)) else {
        return false;
    };
    other.content != this.content && !other.is_wild() && other.color != this.color
}

fn next_at_uno() -> [Rule; 9] {
    [
        rule!("seven to steal", |c| {
            c.found.seven.filter(|i| keeps_other(c, *i)).map(Choice::keep)
        }),
        rule!("zero to pass hands on", |c| {
            c.found.zero.filter(|i| keeps_other(c, *i)).map(Choice::keep)
        }),
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("reverse", |c| c.found.rev.map(Choice::keep)),
        rule!("wild +4 to change color", |c| {
            c.found.wd4.filter(|_| c.last != c.best).map(Choice::keep)
        }),
        rule!("wild to change color", |c| {
            c.found.wild.filter(|_| c.last != c.best).map(Choice::keep)
        }),
        rule!("number away from strong color", |c| {
            c.found
                .plain_num
                .filter(|i| c.color_at(*i) != c.next.strong)
                .map(Choice::keep)
        }),
        rule!("wild to save a seven or zero", |c| {
            c.found
                .wild
                .filter(|_| c.found.seven.is_some() || c.found.zero.is_some())
                .map(Choice::keep)
        }),
    ]
}

fn prev_at_uno() -> [Rule; 7] {
    [
        rule!("zero to steal", |c| c.found.zero.map(Choice::keep)),
        rule!("seven to steal", |c| c.found.seven.map(Choice::keep)),
        rule!("number", |c| c.found.plain_num.map(Choice::keep)),
        rule!("skip away from strong color", |c| {
            c.found
                .skip
                .filter(|i| c.color_at(*i) != c.prev.strong)
                .map(Choice::keep)
        }),
        rule!("draw two away from strong color", |c| {
            c.found
                .draw2
                .filter(|i| c.color_at(*i) != c.prev.strong)
                .map(Choice::keep)
        }),
        rule!("wild", |c| {
            c.found
                .wild
                .filter(|_| Some(c.best) != c.prev.strong)
                .map(Choice::keep)
        }),
        rule!("wild +4", |c| {
            c.found
                .wd4
                .filter(|_| Some(c.best) != c.prev.strong)
                .map(Choice::keep)
        }),
    ]
}

fn oppo_at_uno() -> [Rule; 8] {
    [
        rule!("seven to steal", |c| c.found.seven.map(Choice::keep)),
        rule!("zero", |c| c.found.zero.map(Choice::keep)),
        rule!("number", |c| c.found.plain_num.map(Choice::keep)),
        rule!("reverse toward the bigger hand", |c| {
            c.found.rev.filter(|_| c.prev.size > c.next.size).map(Choice::keep)
        }),
        rule!("skip away from strong color", |c| {
            c.found
                .skip
                .filter(|i| c.color_at(*i) != c.oppo.strong)
                .map(Choice::keep)
        }),
        rule!("draw two away from strong color", |c| {
            c.found
                .draw2
                .filter(|i| c.color_at(*i) != c.oppo.strong)
                .map(Choice::keep)
        }),
        // checked against the previous seat's strong color
        rule!("wild", |c| {
            c.found
                .wild
                .filter(|_| Some(c.best) != c.prev.strong)
                .map(Choice::keep)
        }),
        rule!("wild +4", |c| {
            c.found
                .wd4
                .filter(|_| Some(c.best) != c.prev.strong)
                .map(Choice::keep)
        }),
    ]
}

fn normal() -> [Rule; 11] {
    [
        rule!("zero to hand strong color on", |c| {
            c.found
                .zero
                .filter(|i| c.prev.strong.is_some() && c.color_at(*i) == c.prev.strong)
                .map(Choice::keep)
        }),
        rule!("seven to take a strong color", |c| {
            c.found
                .seven
                .filter(|i| {
                    let color = c.color_at(*i);
                    [c.prev.strong, c.oppo.strong, c.next.strong]
                        .into_iter()
                        .any(|strong| strong.is_some() && strong == color)
                })
                .map(Choice::keep)
        }),
        rule!("reverse toward the bigger hand", |c| {
            c.found.rev.filter(|_| c.prev.size > c.next.size).map(Choice::keep)
        }),
        rule!("number", |c| c.found.plain_num.map(Choice::keep)),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("reverse", |c| c.found.rev.map(Choice::keep)),
        rule!("zero", |c| {
            c.found.zero.filter(|i| keeps_other(c, *i)).map(Choice::keep)
        }),
        rule!("seven", |c| c.found.seven.map(Choice::keep)),
        rule!("wild", |c| c.found.wild.map(Choice::keep)),
        rule!("wild +4", |c| c.found.wd4.map(Choice::keep)),
    ]
}

/// 7-0 card selection for the seat in `view`.
pub fn best_card(view: &TableView, drawn: Option<Card>) -> Decision {
    if let Some(decision) = last_card(view) {
        return decision;
    }
    let ctx = Context::new(view, drawn);
    let choice = if ctx.next.size == 1 {
        first_match("seven-zero/next-uno", &next_at_uno(), &ctx)
    } else if ctx.prev.size == 1 {
        first_match("seven-zero/prev-uno", &prev_at_uno(), &ctx)
    } else if ctx.oppo.size == 1 {
        first_match("seven-zero/oppo-uno", &oppo_at_uno(), &ctx)
    } else {
        first_match("seven-zero/normal", &normal(), &ctx)
    };
    decide(&ctx, choice)
}
