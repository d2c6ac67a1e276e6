use std::io;

use thiserror::Error;

use crate::{
    console::{Event, Input, Output},
    dice::{Dice, Roll},
    parser::{CommandError, parse_command},
    player::{Player, PlayerKind},
};

pub const WINNING_SCORE: u32 = 100;

const PROMPT: &str = "Enter 'r' to roll or 'h' to hold: ";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    Roll,
    Hold,
}

/// what a single step of a turn means for whose turn it is
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TurnOutcome {
    Continues,
    Switches,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Outcome {
    Winner { name: String, score: u32 },
    Tie,
}

impl Outcome {
    fn won_by(player: &Player) -> Self {
        Outcome::Winner {
            name: player.name().to_string(),
            score: player.score(),
        }
    }
}

pub struct Game<D: Roll = Dice> {
    players: [Player; 2],
    dice: D,
    /// index into `players`
    current: usize,
    target: u32,
}

impl Game {
    pub fn new(first: Player, second: Player) -> Self {
        Self::with_dice(first, second, Dice::new())
    }
}

impl<D> Game<D>
where
    D: Roll,
{
    pub fn with_dice(first: Player, second: Player, dice: D) -> Self {
        Self {
            players: [first, second],
            dice,
            current: 0,
            target: WINNING_SCORE,
        }
    }

    /// play to a score other than 100
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    #[allow(dead_code)]
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[allow(dead_code)]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// hand the dice to the other player
    pub fn switch_player(&mut self) {
        self.current = 1 - self.current;
        log::info!("{}'s turn", self.players[self.current].name());
    }

    pub fn is_game_over(&self) -> bool {
        self.players.iter().any(|player| player.score() >= self.target)
    }

    /// the first player to have reached the target. only one score changes
    /// per turn, so at most one player can qualify.
    pub fn get_winner(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.score() >= self.target)
    }

    /// higher score wins, equal scores tie
    pub fn standing(&self) -> Outcome {
        let [first, second] = &self.players;
        match first.score().cmp(&second.score()) {
            std::cmp::Ordering::Greater => Outcome::won_by(first),
            std::cmp::Ordering::Less => Outcome::won_by(second),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// play one turn for computers (a single decision) or a whole turn for
    /// humans (prompting until they hold or bust)
    pub fn play_turn(
        &mut self,
        input: &mut impl Input,
        output: &mut impl Output,
    ) -> Result<(), GameError> {
        output.emit(self.current_player().status());

        match self.current_player().kind() {
            PlayerKind::Computer => {
                let player = &mut self.players[self.current];
                if player.make_decision(&mut self.dice, self.target, output)
                    == TurnOutcome::Switches
                {
                    self.switch_player();
                }
                Ok(())
            }
            PlayerKind::Human => self.human_turn(input, output),
        }
    }

    fn human_turn(
        &mut self,
        input: &mut impl Input,
        output: &mut impl Output,
    ) -> Result<(), GameError> {
        loop {
            let line = input.read_line(PROMPT)?.ok_or(GameError::InputClosed)?;

            let player = &mut self.players[self.current];
            match parse_command(&line) {
                Ok(Command::Roll) => {
                    let value = player.roll(&mut self.dice);
                    log::debug!("{} rolled {}", player.name(), value);
                    output.emit(Event::Rolled(value));

                    match player.add_roll(value) {
                        TurnOutcome::Continues => output.emit(player.status()),
                        TurnOutcome::Switches => {
                            output.emit(Event::Busted(player.name().to_string()));
                            self.switch_player();
                            return Ok(());
                        }
                    }
                }
                Ok(Command::Hold) => {
                    let banked = player.hold();
                    output.emit(player.held(banked));
                    self.switch_player();
                    return Ok(());
                }
                Err(CommandError::Unrecognized(token)) => {
                    output.emit(Event::InvalidInput(token))
                }
            }
        }
    }

    /// the untimed game: play turns until someone reaches the target
    pub fn play(
        &mut self,
        input: &mut impl Input,
        output: &mut impl Output,
    ) -> Result<Outcome, GameError> {
        while !self.is_game_over() {
            self.play_turn(input, output)?;
        }

        let outcome = match self.get_winner() {
            Some(winner) => Outcome::won_by(winner),
            None => self.standing(),
        };
        log::info!("game over: {:?}", outcome);
        output.emit(Event::GameOver(outcome.clone()));
        Ok(outcome)
    }
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("input closed before the game finished")]
    InputClosed,

    #[error("console error: {0}")]
    Io(#[from] io::Error),
}
