use clap::Parser;
use piggybank_lib::Platform;

use crate::{app::format_lamports, state::State, Error};

#[derive(Debug, Parser, Clone, Copy)]
pub struct Airdrop {
    /// Amount in lamports
    lamports: u64,
}

impl Airdrop {
    pub fn run(self) -> Result<(), Error> {
        let mut state = State::load()?;
        state.bank.airdrop(&state.signer, self.lamports)?;
        state.save()?;

        println!(
            "wallet balance: {}",
            format_lamports(state.bank.lamports(&state.signer))
        );
        Ok(())
    }
}
