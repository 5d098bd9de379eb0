//! Pokedex - explore locations and catch pokemon from the terminal
//!
//! A line-oriented REPL over PokeAPI. Responses are cached in memory for the
//! configured interval so paging back and forth does not refetch.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use log::LevelFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

use pokedex::app::App;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::pokeapi::PokeApiClient;

const PROMPT: &str = "Pokedex > ";

/// Initializes env_logger at `level`, letting RUST_LOG override it
fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    init_logging(config.log_level);
    log::info!(
        "Using {} with a {:?} cache interval",
        config.base_url,
        config.cache_interval
    );

    let client = PokeApiClient::with_base_url(config.base_url, config.cache_interval)?;
    let mut app = App::new(client);
    let mut stdout = io::stdout();

    app.show_help(&mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        // End of input behaves like `exit`
        let Some(line) = lines.next_line().await? else {
            writeln!(stdout)?;
            break;
        };

        app.handle_line(&line, &mut stdout).await?;
        if app.should_quit {
            break;
        }
    }

    app.client().shutdown();
    Ok(())
}
