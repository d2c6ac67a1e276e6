use std::{
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write},
};

use crate::game::{Command, Outcome};

/// everything the game reports while it runs
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Event {
    /// whose turn it is and where they stand. emitted before every prompt/decision.
    Status {
        name: String,
        score: u32,
        turn_total: u32,
    },
    /// a computer player picked an action
    Decided(String, Command),
    Rolled(u8),
    /// the player rolled a 1 and lost their turn total
    Busted(String),
    Held {
        name: String,
        banked: u32,
        score: u32,
    },
    /// the rejected token, as typed
    InvalidInput(String),
    TimeUp,
    GameOver(Outcome),
}

pub type EventLog = Vec<Event>;

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Event::Status {
                name,
                score,
                turn_total,
            } => write!(
                f,
                "{}'s turn:\nCurrent score: {}, Turn score: {}",
                name, score, turn_total
            ),
            Event::Decided(name, Command::Roll) => write!(f, "{} decides to roll.", name),
            Event::Decided(name, Command::Hold) => write!(f, "{} decides to hold.", name),
            Event::Rolled(value) => write!(f, "Rolled a {}", value),
            Event::Busted(name) => write!(f, "{} rolled a 1. Turn over!", name),
            Event::Held {
                name,
                banked,
                score,
            } => write!(f, "{} banks {} points and now has {}.", name, banked, score),
            Event::InvalidInput(token) => write!(
                f,
                "Invalid input `{}`. Please enter 'r' to roll or 'h' to hold.",
                token
            ),
            Event::TimeUp => write!(f, "Time's up! Game over."),
            Event::GameOver(Outcome::Winner { name, score }) => {
                write!(f, "Game over! {} wins with {} points!", name, score)
            }
            Event::GameOver(Outcome::Tie) => write!(f, "Game over! It's a tie!"),
        }
    }
}

/// where interactive players' commands come from
pub trait Input {
    /// show the prompt and read one line. `None` means the input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// where the game's status lines go
pub trait Output {
    fn emit(&mut self, event: Event);
}

impl Output for EventLog {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// stdin/stdout console
pub struct Terminal;

impl Input for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut buffer = String::new();
        match io::stdin().lock().read_line(&mut buffer)? {
            0 => Ok(None),
            _ => Ok(Some(buffer)),
        }
    }
}

impl Output for Terminal {
    fn emit(&mut self, event: Event) {
        println!("{}", event);
    }
}
