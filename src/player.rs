use std::str::FromStr;

use thiserror::Error;

use crate::{
    console::{Event, Output},
    dice::Roll,
    game::{Command, TurnOutcome},
};

/// computer players never risk more than this in a single turn
pub const HOLD_CAP: u32 = 25;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayerKind {
    /// prompted for every roll/hold
    Human,
    /// decides on its own using the hold threshold
    Computer,
}

impl FromStr for PlayerKind {
    type Err = PlayerError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "computer" => Ok(PlayerKind::Computer),
            _ => Err(PlayerError::UnknownType(tag.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct Player {
    name: String,
    score: u32,
    turn_total: u32,
    kind: PlayerKind,
}

impl Player {
    pub fn new(kind: PlayerKind, name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 0,
            turn_total: 0,
            kind,
        }
    }

    /// for testing purposes. starts the player partway through a game.
    #[cfg(test)]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// for testing purposes. starts the player partway through a turn.
    #[cfg(test)]
    pub fn with_turn_total(mut self, turn_total: u32) -> Self {
        self.turn_total = turn_total;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[allow(dead_code)]
    pub fn turn_total(&self) -> u32 {
        self.turn_total
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn status(&self) -> Event {
        Event::Status {
            name: self.name.clone(),
            score: self.score,
            turn_total: self.turn_total,
        }
    }

    pub fn roll(&self, dice: &mut impl Roll) -> u8 {
        dice.roll()
    }

    /// bank the turn total. returns how much was banked.
    pub fn hold(&mut self) -> u32 {
        let banked = self.turn_total;
        self.score += banked;
        self.turn_total = 0;
        banked
    }

    /// a roll of 1 throws away the turn total and ends the turn,
    /// anything else is added to it.
    pub fn add_roll(&mut self, value: u8) -> TurnOutcome {
        if value == 1 {
            self.turn_total = 0;
            TurnOutcome::Switches
        } else {
            self.turn_total += value as u32;
            TurnOutcome::Continues
        }
    }

    /// the computer's policy. keeps rolling until the turn total reaches
    /// the hold threshold: HOLD_CAP, or whatever is left to reach the
    /// target if that's smaller.
    pub fn should_roll(&self, target: u32) -> bool {
        let hold_threshold = HOLD_CAP.min(target.saturating_sub(self.score));
        self.turn_total < hold_threshold
    }

    /// take one automated step of a turn
    pub fn make_decision(
        &mut self,
        dice: &mut impl Roll,
        target: u32,
        output: &mut impl Output,
    ) -> TurnOutcome {
        if self.should_roll(target) {
            output.emit(Event::Decided(self.name.clone(), Command::Roll));
            let value = self.roll(dice);
            log::debug!("{} rolled {}", self.name, value);
            output.emit(Event::Rolled(value));

            let outcome = self.add_roll(value);
            if outcome == TurnOutcome::Switches {
                output.emit(Event::Busted(self.name.clone()));
            }
            outcome
        } else {
            output.emit(Event::Decided(self.name.clone(), Command::Hold));
            let banked = self.hold();
            output.emit(self.held(banked));
            TurnOutcome::Switches
        }
    }

    pub fn held(&self, banked: u32) -> Event {
        Event::Held {
            name: self.name.clone(),
            banked,
            score: self.score,
        }
    }
}

/// builds a player from a type tag such as `"human"` or `"computer"`
pub fn create_player(type_tag: &str, name: &str) -> Result<Player, PlayerError> {
    Ok(Player::new(type_tag.parse()?, name))
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlayerError {
    /// the string is the tag that wasn't recognized
    #[error("`{0}` is not a player type (expected `human` or `computer`)")]
    UnknownType(String),
}

#[cfg(test)]
mod test {
    use crate::{
        console::{Event, EventLog},
        dice::test::Loaded,
        game::{Command, TurnOutcome, WINNING_SCORE},
    };

    use super::{Player, PlayerError, PlayerKind, create_player};

    #[test]
    fn factory() {
        let human = create_player("human", "Player 1").unwrap();
        assert_eq!(human.kind(), PlayerKind::Human);
        assert_eq!(human.name(), "Player 1");

        let computer = create_player(" Computer\n", "").unwrap();
        assert_eq!(computer.kind(), PlayerKind::Computer);
        assert_eq!(computer.name(), "");

        assert_eq!(
            create_player("robot", "Player 1").unwrap_err(),
            PlayerError::UnknownType("robot".to_string())
        );
    }

    #[test]
    fn hold_banks_turn_total() {
        let mut player = Player::new(PlayerKind::Human, "a")
            .with_score(30)
            .with_turn_total(12);
        assert_eq!(player.hold(), 12);
        assert_eq!(player.score(), 42);
        assert_eq!(player.turn_total(), 0);

        // holding with nothing to bank is allowed and changes nothing
        assert_eq!(player.hold(), 0);
        assert_eq!(player.score(), 42);
        assert_eq!(player.turn_total(), 0);
    }

    #[test]
    fn rolling_one_busts() {
        for turn_total in [0, 5, 24, 90] {
            let mut player = Player::new(PlayerKind::Human, "a").with_turn_total(turn_total);
            assert_eq!(player.add_roll(1), TurnOutcome::Switches);
            assert_eq!(player.turn_total(), 0);
            assert_eq!(player.score(), 0);
        }

        let mut player = Player::new(PlayerKind::Human, "a").with_turn_total(4);
        assert_eq!(player.add_roll(6), TurnOutcome::Continues);
        assert_eq!(player.turn_total(), 10);
    }

    #[test]
    fn hold_threshold() {
        let fresh = |score, turn_total| {
            Player::new(PlayerKind::Computer, "cpu")
                .with_score(score)
                .with_turn_total(turn_total)
        };

        assert!(fresh(0, 24).should_roll(WINNING_SCORE));
        assert!(!fresh(0, 25).should_roll(WINNING_SCORE));
        assert!(!fresh(0, 30).should_roll(WINNING_SCORE));

        // close to the target the threshold shrinks to what's left
        assert!(fresh(80, 19).should_roll(WINNING_SCORE));
        assert!(!fresh(80, 20).should_roll(WINNING_SCORE));
        assert!(!fresh(99, 1).should_roll(WINNING_SCORE));
        assert!(!fresh(120, 0).should_roll(WINNING_SCORE));
    }

    #[test]
    fn computer_rolls_below_threshold() {
        let mut player = Player::new(PlayerKind::Computer, "cpu")
            .with_score(80)
            .with_turn_total(10);
        let mut dice = Loaded::new(&[4]);
        let mut log = EventLog::new();

        let outcome = player.make_decision(&mut dice, WINNING_SCORE, &mut log);
        assert_eq!(outcome, TurnOutcome::Continues);
        assert_eq!(player.turn_total(), 14);
        assert_eq!(player.score(), 80);
        assert_eq!(
            log,
            vec![
                Event::Decided("cpu".to_string(), Command::Roll),
                Event::Rolled(4)
            ]
        );
    }

    #[test]
    fn computer_busts() {
        let mut player = Player::new(PlayerKind::Computer, "cpu").with_turn_total(18);
        let mut dice = Loaded::new(&[1]);
        let mut log = EventLog::new();

        let outcome = player.make_decision(&mut dice, WINNING_SCORE, &mut log);
        assert_eq!(outcome, TurnOutcome::Switches);
        assert_eq!(player.turn_total(), 0);
        assert_eq!(log.last(), Some(&Event::Busted("cpu".to_string())));
    }

    #[test]
    fn computer_holds_at_threshold() {
        let mut player = Player::new(PlayerKind::Computer, "cpu")
            .with_score(80)
            .with_turn_total(25);
        // no faces: holding must not touch the dice
        let mut dice = Loaded::new(&[]);
        let mut log = EventLog::new();

        let outcome = player.make_decision(&mut dice, WINNING_SCORE, &mut log);
        assert_eq!(outcome, TurnOutcome::Switches);
        assert_eq!(player.score(), 105);
        assert_eq!(player.turn_total(), 0);
        assert_eq!(
            log,
            vec![
                Event::Decided("cpu".to_string(), Command::Hold),
                Event::Held {
                    name: "cpu".to_string(),
                    banked: 25,
                    score: 105
                }
            ]
        );
    }
}
