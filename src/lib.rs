//! Pokedex CLI Library
//!
//! This module exposes the cache, API client, and REPL modules for use by the
//! binary and in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod pokeapi;
pub mod pokedex;
