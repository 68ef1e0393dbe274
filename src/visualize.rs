use std::fmt::Write;

use crate::action::{Action, Direction};
use crate::card::Color;
use crate::state::TableView;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Print each opponent's strong and weak colors.
    pub show_color_signals: bool,
    pub show_recent_cards: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_color_signals: true,
            show_recent_cards: true,
        }
    }
}

pub fn render_state(view: &TableView) -> String {
    render_state_with_options(view, VisualOptions::default())
}

pub fn render_state_with_options(view: &TableView, options: VisualOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Current player: {}{}",
        view.current_player,
        if view.current_player == view.self_player {
            " (You)"
        } else {
            ""
        }
    );
    let direction = match view.direction {
        Direction::Left => "clockwise",
        Direction::Right => "counter-clockwise",
    };
    let _ = writeln!(out, "Direction: {direction}");
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Used: {}",
        view.draw_pile_count, view.used_count
    );
    let _ = writeln!(out, "Top: {}", view.top);
    let _ = writeln!(out, "Players:");
    for player in &view.players {
        let label_you = if player.id == view.self_player {
            " (You)"
        } else {
            ""
        };
        let uno = if player.hand_size == 1 { "  UNO!" } else { "" };
        let _ = writeln!(
            out,
            "  Player {}{} - {} card(s){}",
            player.id, label_you, player.hand_size, uno
        );
        if options.show_recent_cards {
            let recent = player
                .recent
                .map(|card| card.to_string())
                .unwrap_or_else(|| String::from("(drew)"));
            let _ = writeln!(out, "    Recent: {recent}");
        }
        if options.show_color_signals
            && (player.strong_color.is_some() || player.weak_color.is_some())
        {
            let _ = writeln!(
                out,
                "    Strong: {}  Weak: {}",
                color_or_dash(player.strong_color),
                color_or_dash(player.weak_color)
            );
        }
    }
    if view.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries: Vec<String> = view
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let mark = if view.is_legal_to_play(card) { "*" } else { "" };
                format!("{idx}:{card}{mark}")
            })
            .collect();
        let _ = writeln!(out, "Hand: {}", entries.join("  "));
    }
    out
}

pub fn describe_action(view: &TableView, action: &Action) -> String {
    match action {
        Action::Play { hand_index, color } => {
            let card = view
                .hand
                .get(*hand_index)
                .map(|card| card.to_string())
                .unwrap_or_else(|| String::from("--"));
            match color {
                Some(color) => format!("Play hand[{hand_index}] {card} as {color}"),
                None => format!("Play hand[{hand_index}] {card}"),
            }
        }
        Action::Draw => String::from("Draw a card"),
        Action::PlayDrawn { color: Some(color) } => format!("Play the drawn card as {color}"),
        Action::PlayDrawn { color: None } => String::from("Play the drawn card"),
        Action::KeepDrawn => String::from("Keep the drawn card"),
        Action::Challenge(true) => String::from("Challenge the wild +4"),
        Action::Challenge(false) => String::from("Accept the wild +4"),
        Action::SwapWith(seat) => format!("Swap hands with Player {seat}"),
    }
}

fn color_or_dash(color: Option<Color>) -> &'static str {
    color.map(Color::name).unwrap_or("--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let game = GameBuilder::new().with_seed(21).build().expect("game");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Player 0 (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Top:"));
        let actions = game.legal_actions(0).expect("actions available");
        if let Some(play) = actions
            .iter()
            .find(|action| matches!(action, Action::Play { .. }))
        {
            assert!(describe_action(&view, play).starts_with("Play hand["));
        }
        assert_eq!(describe_action(&view, &Action::Draw), "Draw a card");
        assert!(describe_action(&view, &Action::SwapWith(2)).contains("Player 2"));
    }
}
