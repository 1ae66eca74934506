use clap::Parser;
use tracing::Level;

use crate::{app::balance, state::State, Error};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Init;

impl Init {
    pub fn run(self) -> Result<(), Error> {
        let mut state = State::load()?;
        let address = state.address()?;

        let State {
            engine,
            signer,
            bank,
        } = &mut state;
        match bank.transact(|bank| engine.initialize(bank, signer, &address)) {
            Ok(()) => println!("created piggybank {address}"),
            Err(e) if e.is_recoverable() => {
                tracing::event!(Level::INFO, %e, "using existing piggybank");
                println!("piggybank {address} already exists");
            }
            Err(e) => return Err(e.into()),
        }

        state.save()?;
        balance::print(&state, &address)
    }
}
