use clap::Parser;

use crate::{app::balance, state::State, Error};

#[derive(Debug, Parser, Clone, Copy)]
pub struct Deposit {
    /// Amount in lamports
    amount: u64,
}

impl Deposit {
    pub fn run(self) -> Result<(), Error> {
        let mut state = State::load()?;
        let address = state.address()?;

        let State {
            engine,
            signer,
            bank,
        } = &mut state;
        bank.transact(|bank| engine.deposit(bank, signer, &address, self.amount))?;

        state.save()?;
        balance::print(&state, &address)
    }
}
