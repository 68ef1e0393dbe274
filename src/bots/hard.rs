use rand::Rng;

use crate::bot::{Bot, Decision};
use crate::bots::rules::{
    Choice, Context, Rule, Seat, decide, first_match, last_card, pick_color, rule,
};
use crate::card::{Card, Color, MAX_HOLD_CARDS};
use crate::state::TableView;

/// Hard strategy: reads every opponent's hand size and color signals.
///
/// When an opponent is at one card it computes a safe color (one that seat is
/// unlikely to follow) and steers the legal color there, using wild cards
/// only when no colored card does the job. Otherwise it saves limiting cards
/// for dangerous moments and balances hand sizes with reverses.
pub struct HardBot<R: Rng> {
    rng: R,
}

impl<R: Rng> HardBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for HardBot<R> {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision {
        best_card(view, drawn, &mut self.rng)
    }
}

/// Hard card selection for the seat in `view`. `rng` only breaks ties when
/// every preferred defensive color is one an opponent is strong in.
pub fn best_card<R: Rng>(view: &TableView, drawn: Option<Card>, rng: &mut R) -> Decision {
    if let Some(decision) = last_card(view) {
        return decision;
    }
    let mut ctx = Context::new(view, drawn);
    let last = Some(ctx.last);
    let (oppo, prev) = (ctx.oppo, ctx.prev);

    let choice = if ctx.next.size == 1 {
        let forbidden = [
            ctx.next.strong,
            oppo.strong.filter(|_| oppo.size == 1),
            prev.strong.filter(|_| prev.size == 1),
        ];
        ctx.safe = safe_color(rng, &ctx.next, ctx.best, &forbidden);
        if last == ctx.next.strong {
            first_match("hard/next-uno/unchanged", &next_uno_unchanged(), &ctx)
        } else if ctx.next.strong.is_some() {
            first_match("hard/next-uno/changed", &next_uno_changed(), &ctx)
        } else {
            first_match("hard/next-uno", &next_uno_plain(), &ctx)
        }
    } else if prev.size == 1 {
        let forbidden = [prev.strong, oppo.strong.filter(|_| oppo.size == 1)];
        ctx.safe = safe_color(rng, &prev, ctx.best, &forbidden);
        if last == prev.strong {
            first_match("hard/prev-uno/unchanged", &prev_uno_unchanged(), &ctx)
        } else if prev.strong.is_some() {
            first_match("hard/prev-uno/changed", &prev_uno_changed(), &ctx)
        } else {
            first_match("hard/prev-uno", &prev_uno_plain(), &ctx)
        }
    } else if oppo.size == 1 {
        ctx.safe = safe_color(rng, &oppo, ctx.best, &[oppo.strong]);
        if last == oppo.strong {
            first_match("hard/oppo-uno/unchanged", &oppo_uno_unchanged(), &ctx)
        } else if oppo.strong.is_some() {
            first_match("hard/oppo-uno/changed", &oppo_uno_changed(), &ctx)
        } else {
            first_match("hard/oppo-uno", &oppo_uno_plain(), &ctx)
        }
    } else if ctx.found.all_wild {
        return all_wild(&ctx, rng);
    } else if last == ctx.next.weak && ctx.size > 2 {
        first_match("hard/next-weak", &next_weak(), &ctx)
    } else {
        first_match("hard/normal", &normal(), &ctx)
    };
    decide(&ctx, choice)
}

/// Color that the dangerous `seat` is least likely to follow: its weak color
/// when known and it declared nothing else, our best color otherwise. Falls
/// back to a random color outside `forbidden`.
fn safe_color<R: Rng>(rng: &mut R, seat: &Seat, best: Color, forbidden: &[Option<Color>]) -> Color {
    let declared_other = seat.strong.is_some() && seat.strong != Some(best);
    let preferred = match seat.weak {
        Some(weak) if !declared_other => weak,
        _ => best,
    };
    pick_color(rng, preferred, forbidden)
}

/// No opponent other than the next seat may be handed its strong color
/// while sitting at one card.
fn calm_for_others(c: &Context<'_>, color: Color) -> bool {
    (c.prev.size > 1 || c.prev.strong != Some(color))
        && (c.oppo.size > 1 || c.oppo.strong != Some(color))
}

fn differs_from(c: &Context<'_>, index: usize, strong: Option<Color>) -> bool {
    c.color_at(index) != strong
}

fn next_uno_unchanged() -> [Rule; 7] {
    [
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("number away from strong colors", |c| {
            c.num_where(|color| calm_for_others(c, color) && c.next.strong != Some(color))
        }),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("wild +4 to safe color", |c| {
            c.found.wd4.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild to safe color", |c| {
            c.found.wild.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("reverse for help", |c| c.found.rev.map(Choice::keep)),
    ]
}

fn next_uno_changed() -> [Rule; 5] {
    [
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("number away from strong colors", |c| {
            c.num_where(|color| calm_for_others(c, color) && c.next.strong != Some(color))
        }),
        rule!("reverse", |c| {
            c.found
                .rev
                .filter(|i| c.prev.size >= 4 && differs_from(c, *i, c.next.strong))
                .map(Choice::keep)
        }),
        rule!("skip", |c| {
            c.found
                .skip
                .filter(|i| differs_from(c, *i, c.next.strong))
                .map(Choice::keep)
        }),
    ]
}

fn next_uno_plain() -> [Rule; 8] {
    [
        rule!("draw two", |c| c.found.draw2.map(Choice::keep)),
        rule!("skip", |c| c.found.skip.map(Choice::keep)),
        rule!("wild +4 while off color", |c| {
            c.found
                .wd4
                .filter(|_| c.num_in(c.last).is_none())
                .map(|i| {
                    if c.oppo.size == 1 || c.prev.size == 1 {
                        Choice::declaring(i, c.safe)
                    } else {
                        Choice::keep(i)
                    }
                })
        }),
        rule!("reverse for help", |c| c.found.rev.map(Choice::keep)),
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("wild to safe color", |c| {
            c.found
                .wild
                .filter(|_| c.last != c.safe)
                .map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild +4 to safe color", |c| {
            c.found
                .wd4
                .filter(|_| c.last != c.safe)
                .map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("number away from strong colors", |c| {
            if c.last == c.safe {
                return None;
            }
            c.num_where(|color| calm_for_others(c, color))
        }),
    ]
}

fn prev_uno_unchanged() -> [Rule; 5] {
    [
        rule!("skip in another color", |c| {
            c.found
                .skip
                .filter(|i| differs_from(c, *i, c.prev.strong))
                .map(Choice::keep)
        }),
        rule!("wild to safe color", |c| {
            c.found.wild.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild +4 to safe color", |c| {
            c.found.wd4.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("number in best color", |c| c.num_in(c.best).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
    ]
}

fn prev_uno_changed() -> [Rule; 2] {
    [
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("number away from strong colors", |c| {
            c.num_where(|color| {
                (c.oppo.size > 1 || c.oppo.strong != Some(color)) && c.prev.strong != Some(color)
            })
        }),
    ]
}

fn prev_uno_plain() -> [Rule; 5] {
    [
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("wild to safe color", |c| {
            c.found
                .wild
                .filter(|_| c.last != c.safe)
                .map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild +4 to safe color", |c| {
            c.found
                .wd4
                .filter(|_| c.last != c.safe)
                .map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("number in best color", |c| c.num_in(c.best).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
    ]
}

fn oppo_uno_unchanged() -> [Rule; 11] {
    [
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("number in best color", |c| {
            c.num_in(c.best)
                .filter(|_| c.oppo.strong != Some(c.best))
                .map(Choice::keep)
        }),
        rule!("number away from strong color", |c| {
            c.num_where(|color| c.oppo.strong != Some(color))
        }),
        rule!("reverse in another color", |c| {
            c.found
                .rev
                .filter(|i| differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
        rule!("skip in another color", |c| {
            c.found
                .skip
                .filter(|i| differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
        rule!("draw two in another color", |c| {
            c.found
                .draw2
                .filter(|i| differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
        rule!("wild to safe color", |c| {
            c.found.wild.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild +4 to safe color", |c| {
            c.found.wd4.map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("reverse for help", |c| {
            c.found
                .rev
                .filter(|_| c.prev.size - c.next.size >= 3)
                .map(Choice::keep)
        }),
        rule!("number in best color", |c| c.num_in(c.best).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
    ]
}

fn oppo_uno_changed() -> [Rule; 6] {
    [
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("number in best color", |c| {
            c.num_in(c.best)
                .filter(|_| c.oppo.strong != Some(c.best))
                .map(Choice::keep)
        }),
        rule!("number away from strong color", |c| {
            c.num_where(|color| c.oppo.strong != Some(color))
        }),
        rule!("reverse in another color", |c| {
            c.found
                .rev
                .filter(|i| differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
        rule!("skip in another color", |c| {
            c.found
                .skip
                .filter(|i| c.next.size <= 4 && differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
        rule!("draw two in another color", |c| {
            c.found
                .draw2
                .filter(|i| c.next.size <= 4 && differs_from(c, *i, c.oppo.strong))
                .map(Choice::keep)
        }),
    ]
}

fn oppo_uno_plain() -> [Rule; 5] {
    [
        rule!("reverse toward the bigger hand", |c| {
            c.found
                .rev
                .filter(|_| c.prev.size - c.next.size >= 3)
                .map(Choice::keep)
        }),
        rule!("number in safe color", |c| c.num_in(c.safe).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
        rule!("wild to safe color", |c| {
            c.found
                .wild
                .filter(|_| c.last != c.safe)
                .map(|i| Choice::declaring(i, c.safe))
        }),
        rule!("wild +4 to safe color", |c| {
            c.found
                .wd4
                .filter(|_| c.last != c.safe && c.next.size <= 4)
                .map(|i| Choice::declaring(i, c.safe))
        }),
    ]
}

/// Only wild cards left: declare an opponent's weak color so nobody can
/// answer with a +2, and lead with the +4 when the next seat is close to
/// winning.
fn all_wild<R: Rng>(ctx: &Context<'_>, rng: &mut R) -> Decision {
    let color = match ctx.prev.weak.or(ctx.oppo.weak).or(ctx.next.weak) {
        Some(weak) => weak,
        None => pick_color(
            rng,
            ctx.best,
            &[ctx.prev.strong, ctx.oppo.strong, ctx.next.strong],
        ),
    };
    let index = if ctx.next.size <= 4 {
        ctx.found.wd4.or(ctx.found.wild)
    } else {
        ctx.found.wild.or(ctx.found.wd4)
    };
    Decision { index, color }
}

fn next_weak() -> [Rule; 7] {
    [
        rule!("reverse toward the bigger hand", |c| {
            c.found
                .rev
                .filter(|_| c.prev.size - c.next.size >= 3)
                .map(Choice::keep)
        }),
        rule!("number in next seat's weak color", |c| {
            c.next.weak.and_then(|weak| c.num_in(weak)).map(Choice::keep)
        }),
        rule!("number in best color", |c| c.num_in(c.best).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
        rule!("reverse", |c| {
            c.found
                .rev
                .filter(|_| c.prev.size >= 4 || c.prev.recent.is_none())
                .map(Choice::keep)
        }),
        rule!("skip in best color", |c| {
            c.found
                .skip
                .filter(|i| c.oppo.size >= 3 && c.color_at(*i) == Some(c.best))
                .map(Choice::keep)
        }),
        rule!("draw two in best color", |c| {
            c.found
                .draw2
                .filter(|i| c.oppo.size >= 3 && c.color_at(*i) == Some(c.best))
                .map(Choice::keep)
        }),
    ]
}

fn normal() -> [Rule; 13] {
    [
        rule!("draw two on a small next hand", |c| {
            c.found
                .draw2
                .filter(|_| c.next.size <= 4 && c.next.size - c.oppo.size <= 1)
                .map(Choice::keep)
        }),
        rule!("skip on a small next hand", |c| {
            c.found
                .skip
                .filter(|_| c.next.size <= 4 && c.next.size - c.oppo.size <= 1)
                .map(Choice::keep)
        }),
        rule!("reverse to balance hands", |c| {
            c.found
                .rev
                .filter(|_| c.prev.size - c.next.size >= 3 || c.prev.recent.is_none())
                .map(Choice::keep)
        }),
        rule!("number in best color", |c| c.num_in(c.best).map(Choice::keep)),
        rule!("any number", |c| c.num_where(|_| true)),
        rule!("reverse", |c| {
            c.found.rev.filter(|_| c.prev.size >= 4).map(Choice::keep)
        }),
        rule!("skip in best color", |c| {
            c.found
                .skip
                .filter(|i| c.oppo.size >= 3 && c.color_at(*i) == Some(c.best))
                .map(Choice::keep)
        }),
        rule!("draw two in best color", |c| {
            c.found
                .draw2
                .filter(|i| c.oppo.size >= 3 && c.color_at(*i) == Some(c.best))
                .map(Choice::keep)
        }),
        rule!("wild on a small next hand", |c| {
            c.found.wild.filter(|_| c.next.size <= 4).map(Choice::keep)
        }),
        rule!("wild +4 on a small next hand", |c| {
            c.found.wd4.filter(|_| c.next.size <= 4).map(Choice::keep)
        }),
        rule!("wild to start an UNO dash", |c| {
            c.found
                .wild
                .filter(|_| c.size == 2 && c.prev.size <= 3)
                .map(Choice::keep)
        }),
        rule!("wild +4 to start an UNO dash", |c| {
            c.found
                .wd4
                .filter(|_| c.size == 2 && c.prev.size <= 3)
                .map(Choice::keep)
        }),
        rule!("full hand", |c| {
            if c.size != MAX_HOLD_CARDS as i32 {
                return None;
            }
            c.found
                .skip
                .or(c.found.draw2)
                .or(c.found.rev)
                .or(c.found.wild)
                .or(c.found.wd4)
                .map(Choice::keep)
        }),
    ]
}
