use clap::Parser;

use crate::{state::State, Error};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Address;

impl Address {
    pub fn run(self) -> Result<(), Error> {
        let state = State::load()?;
        let (address, bump) = state.engine.address_of(&state.signer)?;

        println!("wallet:    {}", state.signer);
        println!("piggybank: {address} (bump {bump})");
        Ok(())
    }
}
