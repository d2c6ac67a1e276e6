use console::{Input, Terminal};
use game::{Game, WINNING_SCORE};
use log::LevelFilter;
use parser::parse_setup;
use player::create_player;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use timed::TimedGame;

mod console;
mod dice;
mod game;
mod parser;
mod player;
mod timed;

/// env var holding the log level, e.g. `PIG_LOG=debug`
const LOG_ENV: &str = "PIG_LOG";

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    // game output owns stdout, logs go to stderr
    if let Err(error) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
    {
        eprintln!("failed to start logging: {}", error);
    }
}

fn main() {
    init_logging();

    // a match description may be passed as arguments: `pig human vs computer timed`
    let mut args = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let setup;
    let first;
    let second;

    // get the match description and players
    loop {
        let line = if args.is_empty() {
            match Terminal.read_line("Describe the match (e.g. `human vs computer timed`): ") {
                Ok(Some(line)) => line,
                Ok(None) => return,
                Err(error) => {
                    log::error!("failed to read stdin: {}", error);
                    return;
                }
            }
        } else {
            std::mem::take(&mut args)
        };

        let parsed = match parse_setup(&line) {
            Ok(parsed) => parsed,
            Err(error) => {
                println!("please try again: {}", error);
                continue;
            }
        };

        match (
            create_player(&parsed.first, "Player 1"),
            create_player(&parsed.second, "Player 2"),
        ) {
            (Ok(player_one), Ok(player_two)) => {
                first = player_one;
                second = player_two;
                setup = parsed;
                break;
            }
            (Err(error), _) | (_, Err(error)) => println!("please try again: {}", error),
        }
    }

    log::info!("starting {:?}", setup);
    let mut game = Game::new(first, second).with_target(setup.target.unwrap_or(WINNING_SCORE));

    let result = match setup.time_limit {
        Some(limit) => TimedGame::with_limit(game, limit).play(&mut Terminal, &mut Terminal),
        None => game.play(&mut Terminal, &mut Terminal),
    };

    if let Err(error) = result {
        log::error!("{}", error);
        eprintln!("game abandoned: {}", error);
    }
}
