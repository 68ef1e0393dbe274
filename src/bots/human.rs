use std::io::{self, BufRead, Write};
use std::process;

use crate::action::PlayerId;
use crate::bot::{Bot, Decision};
use crate::bots::rules::calc_best_color;
use crate::card::{Card, Color, SEATS};
use crate::state::TableView;
use crate::visualize::render_state;

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, question: &str) -> String {
        loop {
            print!("{question} ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            match read_answer(&mut io::stdin().lock()) {
                Ok(Answer::Text(text)) => return text,
                Ok(Answer::Quit) => {
                    println!("Exiting game at {}'s request.", self.name);
                    process::exit(0);
                }
                Ok(Answer::Closed) => {
                    println!("Input closed, exiting game for {}.", self.name);
                    process::exit(0);
                }
                Err(_) => eprintln!("failed to read input"),
            }
        }
    }

    fn ask_color(&self) -> Color {
        loop {
            let answer = self.prompt("Declare a color [r/b/g/y]:");
            let color = match answer.as_str() {
                "r" | "red" => Color::Red,
                "b" | "blue" => Color::Blue,
                "g" | "green" => Color::Green,
                "y" | "yellow" => Color::Yellow,
                _ => {
                    println!("Unknown color: '{answer}'.");
                    continue;
                }
            };
            return color;
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn choose_play(&mut self, view: &TableView, drawn: Option<Card>) -> Decision {
        println!("\n=== {}'s turn (player {}) ===", self.name, view.self_player);
        println!("{}", render_state(view));
        let fallback = calc_best_color(&view.hand);
        loop {
            let question = match drawn {
                Some(card) => format!("You drew {card}. Play it? [y/n]:"),
                None => String::from("Card index to play, 'd' to draw:"),
            };
            let answer = self.prompt(&question);
            let index = match (drawn, answer.as_str()) {
                (None, "d" | "draw") | (Some(_), "n" | "no") => return Decision::draw(fallback),
                (Some(card), "y" | "yes") => view.hand.iter().position(|held| *held == card),
                (None, text) => text.parse::<usize>().ok(),
                _ => None,
            };
            let Some(index) = index else {
                println!("Invalid input: '{answer}'.");
                continue;
            };
            match view.hand.get(index) {
                Some(card) if view.is_legal_to_play(card) => {
                    let color = if card.is_wild() {
                        self.ask_color()
                    } else {
                        fallback
                    };
                    return Decision::play(index, color);
                }
                Some(card) => println!("{card} cannot be played on {}.", view.top),
                None => println!("Index out of range."),
            }
        }
    }

    fn challenge(&mut self, view: &TableView) -> bool {
        println!("{} was played on you.", view.top);
        let answer = self.prompt("Challenge it? [y/n]:");
        answer.starts_with('y')
    }

    fn swap_target(&mut self, view: &TableView) -> PlayerId {
        loop {
            let answer = self.prompt("Swap hands with which player?");
            match answer.parse::<PlayerId>() {
                Ok(seat) if seat < SEATS && seat != view.self_player => return seat,
                _ => println!("Pick another player's seat."),
            }
        }
    }
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Text(String),
    Quit,
    /// End of input: nobody is left to answer.
    Closed,
}

fn read_answer(reader: &mut impl BufRead) -> io::Result<Answer> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(Answer::Closed);
    }
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(Answer::Quit);
    }
    Ok(Answer::Text(trimmed.to_ascii_lowercase()))
}
