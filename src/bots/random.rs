use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::PlayerId;
use crate::bot::{Bot, Decision};
use crate::card::{Card, Color, SEATS};
use crate::state::TableView;

/// Baseline bot: plays a uniformly chosen legal card, or draws when there is
/// none, and declares a random color.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision {
        let playable: Vec<usize> = view
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                drawn.is_none_or(|drawn| **card == drawn) && view.is_legal_to_play(card)
            })
            .map(|(index, _)| index)
            .collect();
        let color = Color::ALL[self.rng.gen_range(0..Color::ALL.len())];
        match playable.choose(&mut self.rng) {
            Some(index) => Decision::play(*index, color),
            None => Decision::draw(color),
        }
    }

    fn challenge(&mut self, _view: &TableView) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn swap_target(&mut self, view: &TableView) -> PlayerId {
        let others: Vec<PlayerId> = (0..SEATS).filter(|seat| *seat != view.self_player).collect();
        others
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| view.next_of(view.self_player))
    }
}
