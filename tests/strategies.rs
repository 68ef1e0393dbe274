use rand::SeedableRng;
use rand::rngs::StdRng;

use unobot::ai::{best_swap_target, need_to_challenge};
use unobot::{
    Card, Color, Content, Decision, Direction, PlayedCard, PlayerPublicState, Strategy,
    TableView, select_card_to_play,
};

const STRATEGIES: [Strategy; 3] = [Strategy::Easy, Strategy::Hard, Strategy::SevenZero];

fn card(id: u8, color: Option<Color>, content: Content) -> Card {
    Card::new(id, color, content)
}

fn played(card: Card, color: Color) -> PlayedCard {
    PlayedCard { card, color }
}

/// View from seat 0, direction left: next is seat 1, opposite seat 2 and
/// previous seat 3. Every opponent holds seven cards.
fn base_view(hand: Vec<Card>, top: PlayedCard) -> TableView {
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
        below_top: None,
        draw_pile_count: 60,
        used_count: 10,
        players,
        hand,
    }
}

fn choose(strategy: Strategy, view: &TableView) -> Decision {
    let mut rng = StdRng::seed_from_u64(31);
    select_card_to_play(strategy, view, None, &mut rng)
}

fn red5() -> PlayedCard {
    played(card(90, Some(Color::Red), Content::Number(5)), Color::Red)
}

#[test]
fn single_card_is_played_when_legal() {
    for strategy in STRATEGIES {
        let legal = base_view(vec![card(1, Some(Color::Red), Content::Number(2))], red5());
        assert_eq!(choose(strategy, &legal).index, Some(0), "{strategy}");
        let illegal = base_view(vec![card(1, Some(Color::Blue), Content::Number(2))], red5());
        assert_eq!(choose(strategy, &illegal).index, None, "{strategy}");
    }
}

#[test]
fn easy_matches_content_before_using_a_wild() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(5)),
        card(2, None, Content::Wild),
    ];
    let top = played(card(90, Some(Color::Blue), Content::Number(5)), Color::Blue);
    let decision = choose(Strategy::Easy, &base_view(hand, top));
    assert_eq!(decision.index, Some(0));
}

#[test]
fn easy_limits_next_seat_at_one_card() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Draw2),
        card(3, Some(Color::Green), Content::Number(8)),
    ];
    let mut view = base_view(hand, red5());
    assert_eq!(choose(Strategy::Easy, &view).index, Some(0));
    view.players[1].hand_size = 1;
    assert_eq!(choose(Strategy::Easy, &view).index, Some(1));
}

#[test]
fn strategies_draw_without_a_legal_card() {
    let hand = vec![
        card(1, Some(Color::Blue), Content::Number(3)),
        card(2, Some(Color::Green), Content::Skip),
    ];
    for strategy in STRATEGIES {
        let decision = choose(strategy, &base_view(hand.clone(), red5()));
        assert_eq!(decision.index, None, "{strategy}");
    }
}

#[test]
fn drawn_card_is_the_only_candidate() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Number(8)),
        card(3, Some(Color::Green), Content::Number(8)),
    ];
    let view = base_view(hand.clone(), red5());
    let mut rng = StdRng::seed_from_u64(1);
    for strategy in STRATEGIES {
        let decision = select_card_to_play(strategy, &view, Some(hand[1]), &mut rng);
        assert_eq!(decision.index, Some(1), "{strategy}");
        let decision = select_card_to_play(strategy, &view, Some(hand[2]), &mut rng);
        assert_eq!(decision.index, None, "{strategy}");
    }
}

#[test]
fn hard_keeps_next_seat_off_its_strong_color() {
    // next seat declared red with its last wild and sits at one card
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Skip),
        card(3, Some(Color::Green), Content::Number(9)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    view.players[1].strong_color = Some(Color::Red);
    let decision = choose(Strategy::Hard, &view);
    assert_eq!(decision.index, Some(1));
}

#[test]
fn hard_declares_a_weak_color_with_an_all_wild_hand() {
    let hand = vec![card(1, None, Content::Wild), card(2, None, Content::WildDraw4)];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 3;
    view.players[3].weak_color = Some(Color::Green);
    let decision = choose(Strategy::Hard, &view);
    assert_eq!(decision.index, Some(1));
    assert_eq!(decision.color, Color::Green);

    view.players[1].hand_size = 9;
    let decision = choose(Strategy::Hard, &view);
    assert_eq!(decision.index, Some(0));
}

#[test]
fn hard_never_declares_a_forbidden_color() {
    // previous seat is weak in yellow, but the opposite seat at one card is
    // strong in it, so the declared color is drawn from the other three
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Blue), Content::Number(4)),
        card(3, Some(Color::Blue), Content::Number(6)),
    ];
    let top = played(card(90, Some(Color::Yellow), Content::Number(5)), Color::Yellow);
    let mut view = base_view(hand, top);
    view.players[3].hand_size = 1;
    view.players[3].weak_color = Some(Color::Yellow);
    view.players[2].hand_size = 1;
    view.players[2].strong_color = Some(Color::Yellow);
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = select_card_to_play(Strategy::Hard, &view, None, &mut rng);
        assert_eq!(decision.index, Some(0));
        assert_ne!(decision.color, Color::Yellow);
    }
}

#[test]
fn hard_plays_draw_two_on_a_small_next_hand() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Draw2),
        card(3, Some(Color::Yellow), Content::Number(1)),
    ];
    let mut view = base_view(hand, red5());
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
    view.players[1].hand_size = 3;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(1));
}

#[test]
fn seven_zero_steals_with_a_seven() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Number(7)),
        card(3, Some(Color::Green), Content::Number(4)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(1));
}

#[test]
fn seven_zero_keeps_a_seven_that_would_hand_over_a_win() {
    // the card left behind could follow the seven, so the seven waits
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Number(7)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(0));
}

#[test]
fn challenge_when_draw4_kept_the_color() {
    let wd4 = played(card(100, None, Content::WildDraw4), Color::Red);
    let five: Vec<Card> = (10..15)
        .map(|id| card(id, Some(Color::Yellow), Content::Number(2)))
        .collect();
    let mut view = base_view(five, wd4);
    view.below_top = Some(played(card(40, Some(Color::Red), Content::Number(3)), Color::Red));
    assert!(need_to_challenge(&view));

    view.below_top = Some(played(card(41, Some(Color::Blue), Content::Number(3)), Color::Blue));
    assert!(!need_to_challenge(&view));

    view.hand.truncate(1);
    assert!(need_to_challenge(&view));
}

#[test]
fn swap_target_is_one_of_the_opponents() {
    let mut view = base_view(vec![card(1, Some(Color::Red), Content::Number(7))], red5());
    assert_eq!(best_swap_target(&view), 3);
    view.players[1].hand_size = 2;
    assert_eq!(best_swap_target(&view), 1);
}

#[test]
fn hard_reverses_rather_than_feed_a_declared_color() {
    // next seat declared blue and sits at one card while red is showing
    let hand = vec![
        card(1, Some(Color::Red), Content::Skip),
        card(2, Some(Color::Red), Content::Rev),
        card(3, Some(Color::Blue), Content::Number(5)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    view.players[1].strong_color = Some(Color::Blue);
    assert_eq!(choose(Strategy::Hard, &view).index, Some(1));

    // nobody behind us to help, so the skip goes instead
    view.players[3].hand_size = 3;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
}

#[test]
fn hard_next_at_uno_without_declared_color() {
    let hand = vec![
        card(1, None, Content::WildDraw4),
        card(2, Some(Color::Blue), Content::Number(5)),
        card(3, Some(Color::Green), Content::Number(8)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    // no red number to follow with, so the +4 is thrown in our best color
    let decision = choose(Strategy::Hard, &view);
    assert_eq!(decision, Decision::play(0, Color::Blue));

    let hand = vec![
        card(1, None, Content::WildDraw4),
        card(2, Some(Color::Red), Content::Number(3)),
        card(3, Some(Color::Blue), Content::Number(5)),
    ];
    let mut view = base_view(hand, red5());
    view.players[1].hand_size = 1;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(1));
    // a known weak color of the next seat steers the number
    view.players[1].weak_color = Some(Color::Blue);
    assert_eq!(choose(Strategy::Hard, &view).index, Some(2));
}

#[test]
fn hard_changes_color_away_from_previous_seat() {
    // previous seat declared red, red is showing, and it holds one card
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Red), Content::Number(3)),
        card(3, Some(Color::Red), Content::Skip),
    ];
    let mut view = base_view(hand, red5());
    view.players[3].hand_size = 1;
    view.players[3].strong_color = Some(Color::Red);
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = select_card_to_play(Strategy::Hard, &view, None, &mut rng);
        assert_eq!(decision.index, Some(0));
        assert_ne!(decision.color, Color::Red);
    }
}

#[test]
fn hard_avoids_previous_seat_declared_color_once_changed() {
    let hand = vec![
        card(1, Some(Color::Blue), Content::Number(5)),
        card(2, Some(Color::Green), Content::Number(5)),
        card(3, Some(Color::Blue), Content::Number(1)),
    ];
    let mut view = base_view(hand, red5());
    view.players[3].hand_size = 1;
    view.players[3].strong_color = Some(Color::Blue);
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = select_card_to_play(Strategy::Hard, &view, None, &mut rng);
        assert_eq!(decision.index, Some(1));
    }
}

#[test]
fn hard_reverses_in_another_color_before_using_a_wild() {
    // opposite seat declared red and red is still showing
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Blue), Content::Rev),
        card(3, Some(Color::Red), Content::Number(3)),
    ];
    let top = played(card(90, Some(Color::Red), Content::Rev), Color::Red);
    let mut view = base_view(hand, top);
    view.players[2].hand_size = 1;
    view.players[2].strong_color = Some(Color::Red);
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = select_card_to_play(Strategy::Hard, &view, None, &mut rng);
        assert_eq!(decision.index, Some(1));
    }
}

#[test]
fn hard_skips_for_opposite_seat_only_on_a_small_next_hand() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Skip),
        card(2, Some(Color::Green), Content::Number(9)),
        card(3, Some(Color::Yellow), Content::Number(1)),
    ];
    let mut view = base_view(hand, red5());
    view.players[2].hand_size = 1;
    view.players[2].strong_color = Some(Color::Blue);
    assert_eq!(choose(Strategy::Hard, &view).index, None);
    view.players[1].hand_size = 3;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
}

#[test]
fn hard_reverses_toward_a_bigger_previous_hand() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Rev),
        card(2, Some(Color::Red), Content::Number(3)),
    ];
    let mut view = base_view(hand, red5());
    view.players[2].hand_size = 1;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(1));
    view.players[3].hand_size = 8;
    view.players[1].hand_size = 4;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
}

#[test]
fn hard_follows_next_seat_weak_color() {
    let hand = vec![
        card(1, Some(Color::Blue), Content::Number(5)),
        card(2, Some(Color::Blue), Content::Skip),
        card(3, Some(Color::Blue), Content::Draw2),
        card(4, Some(Color::Red), Content::Number(3)),
    ];
    let mut view = base_view(hand, red5());
    // best color is blue
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
    // next seat drew on red, so keep red showing
    view.players[1].weak_color = Some(Color::Red);
    assert_eq!(choose(Strategy::Hard, &view).index, Some(3));
}

#[test]
fn hard_saves_wilds_until_needed() {
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Blue), Content::Number(2)),
        card(3, Some(Color::Green), Content::Number(3)),
    ];
    let mut view = base_view(hand, red5());
    assert_eq!(choose(Strategy::Hard, &view).index, None);
    view.players[1].hand_size = 3;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));

    // two cards left: the wild starts the run for the last card
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Blue), Content::Number(2)),
    ];
    let mut view = base_view(hand, red5());
    view.players[3].hand_size = 3;
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));
}

#[test]
fn hard_plays_anything_with_a_full_hand() {
    let mut hand = vec![card(1, Some(Color::Red), Content::Skip)];
    hand.extend((10..24).map(|id| card(id, Some(Color::Blue), Content::Number(2))));
    let mut view = base_view(hand, red5());
    assert_eq!(view.hand.len(), 15);
    assert_eq!(choose(Strategy::Hard, &view).index, Some(0));

    view.hand.pop();
    view.players[0].hand_size = 14;
    assert_eq!(choose(Strategy::Hard, &view).index, None);
}

#[test]
fn seven_zero_steals_the_previous_hand_with_a_zero_first() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Number(0)),
        card(3, Some(Color::Red), Content::Number(7)),
    ];
    let mut view = base_view(hand, red5());
    view.players[3].hand_size = 1;
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(1));
}

#[test]
fn seven_zero_opposite_at_uno() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(3)),
        card(2, Some(Color::Red), Content::Number(7)),
    ];
    let mut view = base_view(hand, red5());
    view.players[2].hand_size = 1;
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(1));

    // the wild is held back when the previous seat declared our best color
    let hand = vec![
        card(1, None, Content::Wild),
        card(2, Some(Color::Blue), Content::Number(2)),
    ];
    let mut view = base_view(hand, red5());
    view.players[2].hand_size = 1;
    view.players[3].strong_color = Some(Color::Blue);
    assert_eq!(choose(Strategy::SevenZero, &view).index, None);
    view.players[3].strong_color = None;
    view.players[2].strong_color = Some(Color::Blue);
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(0));
}

#[test]
fn seven_zero_takes_a_declared_color_with_a_seven() {
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(7)),
        card(2, Some(Color::Red), Content::Number(3)),
        card(3, Some(Color::Green), Content::Number(2)),
    ];
    let mut view = base_view(hand, red5());
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(1));
    view.players[2].strong_color = Some(Color::Red);
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(0));
}

#[test]
fn seven_zero_keeps_a_zero_that_would_pass_on_a_follow_up() {
    let top = played(card(90, Some(Color::Green), Content::Number(0)), Color::Green);
    // the red 9 left behind could follow our red 0
    let hand = vec![
        card(1, Some(Color::Red), Content::Number(0)),
        card(2, Some(Color::Red), Content::Number(9)),
    ];
    let view = base_view(hand, top);
    assert_eq!(choose(Strategy::SevenZero, &view).index, None);

    let hand = vec![
        card(1, Some(Color::Red), Content::Number(0)),
        card(2, Some(Color::Blue), Content::Number(9)),
    ];
    let view = base_view(hand, top);
    assert_eq!(choose(Strategy::SevenZero, &view).index, Some(0));
}
