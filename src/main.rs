//! Sidx - a search index generator for static blogs.

#![allow(dead_code)]

mod cli;
mod config;
mod corpus;
mod excerpt;
mod index;
mod logger;
mod meta;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::IndexConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Build { args } => {
            logger::set_verbose(args.verbose);
            let config = IndexConfig::load(&cli)?;
            cli::build::build_index(&config)
        }
    }
}
