use std::time::Duration;

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::{extra::Err, prelude::*, text::inline_whitespace};
use thiserror::Error;

use crate::{game::Command, timed::TIME_LIMIT};

/// a parsed match description, e.g. `human vs computer to 50 timed 30`.
/// player types are kept as the typed tags; they're checked when the
/// players are created.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Setup {
    pub first: String,
    pub second: String,
    /// winning score, if not the default
    pub target: Option<u32>,
    /// `Some` for the timed variant
    pub time_limit: Option<Duration>,
}

/// a function which returns a match description parser. should
/// be used as setup().parse()
fn setup<'a>() -> impl Parser<'a, &'a str, Setup, Err<Rich<'a, char>>> {
    // parser for u32s. will give an error for ints which don't fit.
    let number = text::int::<_, Err<Rich<char>>>(10).try_map(|s: &str, span| {
        s.parse::<u32>()
            .map_err(|e| Rich::custom(span, format!("Invalid number: {}", e)))
    });

    let kind = text::ident::<_, Err<Rich<char>>>().map(|s: &str| s.to_lowercase());

    // zero would end the game before it starts
    let positive = |what: &'static str| {
        number.clone().try_map(move |n, span| match n {
            0 => Err(Rich::custom(span, format!("The {} must be above zero", what))),
            n => Ok(n),
        })
    };

    let target = just("to")
        .then(inline_whitespace().at_least(1))
        .ignore_then(positive("winning score"))
        .padded();

    let timed = just("timed")
        .ignore_then(
            inline_whitespace()
                .at_least(1)
                .ignore_then(positive("time limit"))
                .or_not(),
        )
        .padded()
        .map(|seconds| Duration::from_secs(seconds.map_or(TIME_LIMIT.as_secs(), u64::from)));

    kind.clone()
        .padded()
        .then_ignore(just("vs").padded())
        .then(kind.padded())
        .then(target.or_not())
        .then(timed.or_not())
        .then_ignore(end())
        .map(|(((first, second), target), time_limit)| Setup {
            first,
            second,
            target,
            time_limit,
        })
}

/// a function which returns a roll/hold parser. expects trimmed, lowercase input.
fn command<'a>() -> impl Parser<'a, &'a str, Command, Err<Rich<'a, char>>> {
    choice((
        just("roll").to(Command::Roll),
        just("r").to(Command::Roll),
        just("hold").to(Command::Hold),
        just("h").to(Command::Hold),
    ))
    .then_ignore(end())
}

/// parse a match description, printing diagnostics for anything that doesn't parse
pub fn parse_setup(line: &str) -> Result<Setup, SetupError> {
    let source = line.trim_end();
    let parse_result = setup().parse(source);
    if let Some(setup) = parse_result.output() {
        return Ok(setup.clone());
    }

    let name = "match";
    parse_result.errors().for_each(|error| {
        let span = error.span().start()..error.span().end();
        let _ = Report::build(ReportKind::Error, (name, span.clone()))
            .with_message(error.to_string())
            .with_label(
                Label::new((name, span))
                    .with_color(Color::Red)
                    .with_message("Parsing failed here"),
            )
            .finish()
            .eprint((name, Source::from(source)));
    });
    Err(SetupError::CannotParse)
}

/// read a roll/hold command. case and surrounding whitespace don't matter.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let token = line.trim();
    let lowered = token.to_lowercase();
    command()
        .parse(lowered.as_str())
        .into_result()
        .map_err(|_| CommandError::Unrecognized(token.to_string()))
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SetupError {
    #[error("expected something like `human vs computer timed`")]
    CannotParse,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("`{0}` is not a command")]
    Unrecognized(String),
}
