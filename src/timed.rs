use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    console::{Event, Input, Output},
    dice::{Dice, Roll},
    game::{Game, GameError, Outcome},
};

pub const TIME_LIMIT: Duration = Duration::from_secs(60);

/// a one-shot deadline. a worker thread waits out the limit and raises the
/// flag unless it's cancelled first. dropping the countdown cancels it and
/// waits for the worker to finish.
pub struct Countdown {
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn start(limit: Duration, expired: Arc<AtomicBool>) -> Self {
        let (cancel, cancelled) = mpsc::channel();

        let worker = thread::spawn(move || match cancelled.recv_timeout(limit) {
            Err(RecvTimeoutError::Timeout) => {
                expired.store(true, Ordering::Release);
                log::warn!("time's up after {:?}", limit);
            }
            // either cancelled outright or the countdown was dropped
            Ok(()) | Err(RecvTimeoutError::Disconnected) => log::debug!("countdown cancelled"),
        });

        Self {
            cancel: Some(cancel),
            worker: Some(worker),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // the worker may already have fired and hung up
            let _ = cancel.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("countdown worker panicked");
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// a game with a wall-clock limit. when time runs out the higher score wins.
///
/// the deadline is only checked between turns, so a human who is sitting
/// at the prompt when time runs out still finishes their turn.
pub struct TimedGame<D: Roll = Dice> {
    game: Game<D>,
    limit: Duration,
    time_up: Arc<AtomicBool>,
}

impl<D> TimedGame<D>
where
    D: Roll,
{
    #[allow(dead_code)]
    pub fn new(game: Game<D>) -> Self {
        Self::with_limit(game, TIME_LIMIT)
    }

    pub fn with_limit(game: Game<D>, limit: Duration) -> Self {
        Self {
            game,
            limit,
            time_up: Arc::new(AtomicBool::new(false)),
        }
    }

    #[allow(dead_code)]
    pub fn game(&self) -> &Game<D> {
        &self.game
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up.load(Ordering::Acquire)
    }

    /// play until someone reaches the target or the deadline passes
    pub fn play(
        &mut self,
        input: &mut impl Input,
        output: &mut impl Output,
    ) -> Result<Outcome, GameError> {
        let mut countdown = Countdown::start(self.limit, Arc::clone(&self.time_up));

        while !self.game.is_game_over() && !self.is_time_up() {
            self.game.play_turn(input, output)?;
        }
        countdown.cancel();

        if self.is_time_up() {
            output.emit(Event::TimeUp);
        }

        let outcome = self.game.standing();
        log::info!("timed game over: {:?}", outcome);
        output.emit(Event::GameOver(outcome.clone()));
        Ok(outcome)
    }
}
