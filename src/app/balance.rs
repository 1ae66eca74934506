use clap::Parser;
use piggybank_lib::Pubkey;

use crate::{app::format_lamports, state::State, Error};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Balance {
    /// Show the piggybank of this owner instead of the wallet's
    #[clap(long)]
    owner: Option<Pubkey>,
}

impl Balance {
    pub fn run(self) -> Result<(), Error> {
        let state = State::load()?;
        let owner = self.owner.unwrap_or(state.signer);
        let (address, _bump) = state.engine.address_of(&owner)?;

        print(&state, &address)
    }
}

pub fn print(state: &State, address: &Pubkey) -> Result<(), Error> {
    let balances = state.engine.balances(&state.bank, address)?;

    println!("piggybank {address}");
    println!("  available: {}", format_lamports(balances.available()));
    println!("  tracked:   {}", format_lamports(balances.tracked()));
    println!("  floor:     {}", format_lamports(balances.floor()));

    let unallocated = balances.available().saturating_sub(balances.tracked());
    if unallocated > 0 {
        println!(
            "  {} arrived outside of deposits and cannot be withdrawn",
            format_lamports(unallocated)
        );
    }

    Ok(())
}
