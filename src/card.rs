use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 108;
pub const INITIAL_HAND_SIZE: usize = 7;
pub const MAX_HOLD_CARDS: usize = 15;
pub const SEATS: usize = 4;

/// One of the four suit colors. Wild cards carry no color until played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Position used for per-color score tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Face of an Uno card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Number card between 0 and 9.
    Number(u8),
    Draw2,
    Skip,
    Rev,
    Wild,
    WildDraw4,
}

impl Content {
    /// Ordinal used for the hand-sorting key.
    #[inline]
    pub fn ordinal(self) -> u16 {
        match self {
            Content::Number(n) => n as u16,
            Content::Draw2 => 10,
            Content::Skip => 11,
            Content::Rev => 12,
            Content::Wild => 13,
            Content::WildDraw4 => 14,
        }
    }
}

/// A physical card. `id` distinguishes the two copies of otherwise equal
/// cards, so equality is identity within one deck.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: u8,
    pub color: Option<Color>,
    pub content: Content,
}

impl Card {
    pub fn new(id: u8, color: Option<Color>, content: Content) -> Self {
        Self { id, color, content }
    }

    /// Sorting key: color first, then face. Wilds sort before colored cards.
    #[inline]
    pub fn order(&self) -> u16 {
        let color = self.color.map(|c| c.index() as u16 + 1).unwrap_or(0);
        (color << 8) | self.content.ordinal()
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self.content, Content::Wild | Content::WildDraw4)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.content == Content::Number(0)
    }

    #[inline]
    pub fn is_action(&self) -> bool {
        matches!(self.content, Content::Draw2 | Content::Skip | Content::Rev)
    }

    /// Official scoring value of the card left in a loser's hand.
    pub fn score(&self) -> u32 {
        match self.content {
            Content::Wild | Content::WildDraw4 => 50,
            Content::Draw2 | Content::Skip | Content::Rev => 20,
            Content::Number(n) => n as u32,
        }
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order()
            .cmp(&other.order())
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = match self.content {
            Content::Number(n) => n.to_string(),
            Content::Draw2 => String::from("+2"),
            Content::Skip => String::from("Skip"),
            Content::Rev => String::from("Reverse"),
            Content::Wild => return f.write_str("Wild"),
            Content::WildDraw4 => return f.write_str("Wild +4"),
        };
        match self.color {
            Some(color) => write!(f, "{color} {face}"),
            None => f.write_str(&face),
        }
    }
}

/// A card on the discard pile together with the color it stands for.
/// For colored cards `color` is the card's own color; for wild cards it is
/// the color declared when the card was played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub color: Color,
}

impl PlayedCard {
    #[inline]
    pub fn content(&self) -> Content {
        self.card.content
    }
}

impl fmt::Display for PlayedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.card.is_wild() {
            write!(f, "{} ({})", self.card, self.color)
        } else {
            write!(f, "{}", self.card)
        }
    }
}

/// Builds the 108-card deck in deterministic order (unshuffled). Ids run
/// from 0 to 107 in construction order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0u8;
    let mut push = |deck: &mut Vec<Card>, color: Option<Color>, content: Content| {
        deck.push(Card::new(next_id, color, content));
        next_id += 1;
    };
    for color in Color::ALL {
        push(&mut deck, Some(color), Content::Number(0));
        for _ in 0..2 {
            for n in 1..=9 {
                push(&mut deck, Some(color), Content::Number(n));
            }
            for content in [Content::Draw2, Content::Skip, Content::Rev] {
                push(&mut deck, Some(color), content);
            }
        }
    }
    for _ in 0..4 {
        push(&mut deck, None, Content::Wild);
    }
    for _ in 0..4 {
        push(&mut deck, None, Content::WildDraw4);
    }
    deck
}
