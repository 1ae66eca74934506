#![deny(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic)]

use std::error::Error as _;

use clap::Parser;
use confy::ConfyError;
use piggybank_lib::{engine, platform};

mod app;
mod config;
mod logging;
mod state;
mod wallet;

use app::App;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load or store configuration")]
    Config(#[from] ConfyError),

    #[error(transparent)]
    Piggybank(#[from] engine::Error),

    #[error(transparent)]
    Bank(#[from] platform::Error),

    #[error("a wallet already exists, pass --force to replace it")]
    WalletExists,
}

fn main() {
    let app = App::parse();
    logging::set_up(app.verbosity());

    if let Err(e) = app.run() {
        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
