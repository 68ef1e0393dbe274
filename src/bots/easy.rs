use crate::bot::{Bot, Decision};
use crate::bots::rules::{Choice, Context, Rule, decide, first_match, last_card, rule};
use crate::card::Card;
use crate::state::TableView;

/// Easy strategy: looks only at the hand sizes of the neighbours.
///
/// - When the next seat is at one card, play the most restricting card
///   available (+2, skip, reverse, then a color change).
/// - Otherwise dump number cards first and keep action and wild cards for
///   later, reversing only when the previous seat holds more cards than the
///   next one.
pub struct EasyBot;

impl EasyBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EasyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for EasyBot {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision {
        best_card(view, drawn)
    }
}

fn next_at_uno() -> [Rule; 6] {
    [
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("reverse", |c| c.found.rev.map(Choice::keep)),
        rule!("wild +4 to change color", |c| {
            c.found.wd4.filter(|_| c.last != c.best).map(Choice::keep)
        }),
        rule!("wild to change color", |c| {
            c.found.wild.filter(|_| c.last != c.best).map(Choice::keep)
        }),
        rule!("number", |c| c.found.num.map(Choice::keep)),
    ]
}

fn normal() -> [Rule; 7] {
    [
        rule!("reverse toward the bigger hand", |c| {
            c.found.rev.filter(|_| c.prev.size > c.next.size).map(Choice::keep)
        }),
        rule!("number", |c| c.found.num.map(Choice::keep)),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("reverse", |c| {
            c.found.rev.filter(|_| c.prev.size > 1).map(Choice::keep)
        }),
        rule!("wild", |c| c.found.wild.map(Choice::keep)),
        rule!("wild +4", |c| c.found.wd4.map(Choice::keep)),
    ]
}

/// Easy card selection for the seat in `view`.
pub fn best_card(view: &TableView, drawn: Option<Card>) -> Decision {
    if let Some(decision) = last_card(view) {
        return decision;
    }
    let ctx = Context::new(view, drawn);
    let choice = if ctx.next.size == 1 {
        first_match("easy/next-uno", &next_at_uno(), &ctx)
    } else {
        first_match("easy/normal", &normal(), &ctx)
    };
    decide(&ctx, choice)
}
