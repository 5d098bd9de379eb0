//! REPL command parsing
//!
//! Turns a line of user input into a [`Command`], validating argument counts
//! up front so the handlers in [`crate::app`] only deal with well-formed input.

use thiserror::Error;

use crate::pokeapi::PokeApiError;

/// Command names and descriptions, in the order `help` lists them
pub const COMMANDS: [(&str, &str); 8] = [
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Display next 20 location names"),
    ("mapb", "Display previous 20 location names"),
    ("explore", "Explore a location area"),
    ("catch", "Try to catch a pokemon"),
    ("inspect", "Inspect a caught pokemon"),
    ("pokedex", "Show all pokemons that you have"),
];

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Show the next page of location areas
    Map,
    /// Show the previous page of location areas
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

/// Errors that can occur while parsing or running a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// The command was given the wrong number of arguments
    #[error("[{command}] -> {hint}")]
    Usage {
        command: &'static str,
        hint: &'static str,
    },

    /// `mapb` was used before moving past the first page
    #[error("[mapb] -> you cannot move back from first page of locations")]
    FirstPage,

    /// `map` was used after the last page was shown
    #[error("[map] -> you are on the last page of locations")]
    LastPage,

    /// The API request failed
    #[error(transparent)]
    Api(#[from] PokeApiError),

    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Lowercases the input and splits it on whitespace
pub fn normalize_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl Command {
    /// Parses normalized words into a command
    ///
    /// Commands that take no argument ignore any extra words.
    ///
    /// # Returns
    /// * `Ok(Some(Command))` for a recognized command
    /// * `Ok(None)` for empty input
    /// * `Err(CommandError)` for an unknown command or bad arguments
    pub fn parse(words: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(single_arg(
                args,
                "explore",
                "you must provide one location name to explore",
            )?),
            "catch" => Command::Catch(single_arg(
                args,
                "catch",
                "you must provide one pokemon name",
            )?),
            "inspect" => Command::Inspect(single_arg(
                args,
                "inspect",
                "you must provide one pokemon name",
            )?),
            "pokedex" => Command::Pokedex,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Parses a raw input line
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        Self::parse(&normalize_input(line))
    }
}

fn single_arg(
    args: &[String],
    command: &'static str,
    hint: &'static str,
) -> Result<String, CommandError> {
    match args {
        [arg] => Ok(arg.clone()),
        _ => Err(CommandError::Usage { command, hint }),
    }
}
