//! Application state management for the Pokedex REPL
//!
//! This module contains the session state (location paging, caught pokemon)
//! and the handlers for each REPL command. Handlers write to any
//! `std::io::Write`, so the whole session can run against an in-memory buffer.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::{Command, CommandError, COMMANDS};
use crate::pokeapi::{LocationAreaPage, PokeApiClient};
use crate::pokedex::{attempt_catch, Pokedex};

/// Main application struct managing REPL session state
pub struct App {
    /// Flag indicating the REPL should exit
    pub should_quit: bool,
    /// Link to the next page of location areas, if one has been fetched
    next_location_url: Option<String>,
    /// Link to the previous page of location areas
    previous_location_url: Option<String>,
    /// Set once a fetched page had no `next` link
    on_last_page: bool,
    /// Pokemon caught during this session
    pokedex: Pokedex,
    /// PokeAPI client
    client: PokeApiClient,
    /// Source of catch rolls
    rng: StdRng,
}

impl App {
    /// Creates a new App with an entropy-seeded RNG
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a new App with a specific RNG (for reproducible catches)
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            should_quit: false,
            next_location_url: None,
            previous_location_url: None,
            on_last_page: false,
            pokedex: Pokedex::new(),
            client,
            rng,
        }
    }

    /// Returns the PokeAPI client
    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Returns the pokemon caught so far
    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Parses and runs one line of input, printing any command error
    ///
    /// Only a failure to write to `out` is returned; command errors are
    /// reported to the user and the session continues.
    pub async fn handle_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> std::io::Result<()> {
        let result = match Command::parse_line(line) {
            Ok(Some(command)) => self.execute(command, out).await,
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => Ok(()),
            Err(CommandError::Io(err)) => Err(err),
            Err(err) => {
                log::debug!("Command failed: {:?}", err);
                writeln!(out, "{}", err)
            }
        }
    }

    /// Runs a parsed command
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<(), CommandError> {
        match command {
            Command::Help => self.show_help(out),
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                self.should_quit = true;
                Ok(())
            }
            Command::Map => self.map_next(out).await,
            Command::MapBack => self.map_previous(out).await,
            Command::Explore(area) => self.explore(&area, out).await,
            Command::Catch(name) => self.catch(&name, out).await,
            Command::Inspect(name) => self.inspect(&name, out),
            Command::Pokedex => self.show_pokedex(out),
        }
    }

    /// Prints the welcome banner and command list
    pub fn show_help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out)?;
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "{}: {}", name, description)?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn map_next<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        if self.on_last_page {
            return Err(CommandError::LastPage);
        }

        let page = self
            .client
            .location_areas(self.next_location_url.as_deref())
            .await?;
        self.show_location_page(page, out)
    }

    async fn map_previous<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let Some(url) = self.previous_location_url.clone() else {
            return Err(CommandError::FirstPage);
        };

        let page = self.client.location_areas(Some(&url)).await?;
        self.show_location_page(page, out)
    }

    /// Prints a page of location names and moves the paging links to it
    fn show_location_page<W: Write>(
        &mut self,
        page: LocationAreaPage,
        out: &mut W,
    ) -> Result<(), CommandError> {
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }

        self.on_last_page = page.next.is_none();
        self.next_location_url = page.next;
        self.previous_location_url = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(
        &mut self,
        area_name: &str,
        out: &mut W,
    ) -> Result<(), CommandError> {
        let area = self.client.location_area(area_name).await?;

        writeln!(out, "Exploring {}...", area.location.name)?;
        writeln!(out, "Found pokemons:")?;
        for encounter in &area.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let pokemon = self.client.catchable_pokemon(name).await?;

        writeln!(out, "Throwing a pokeball at {}...", pokemon.name())?;
        if !attempt_catch(&mut self.rng, pokemon.capture_rate()) {
            writeln!(out, "{} escaped!", pokemon.name())?;
            return Ok(());
        }

        writeln!(out, "{} was caught!", pokemon.name())?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
        self.pokedex.record(pokemon);
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught {} yet", name)?;
            return Ok(());
        };

        let pokemon = &caught.details.pokemon;
        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  - {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for pokemon_type in &pokemon.types {
            writeln!(out, "  - {}", pokemon_type.type_.name)?;
        }
        writeln!(
            out,
            "Caught at: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn show_pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Try to catch a pokemon first!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
