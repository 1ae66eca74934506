use clap::Parser;

use crate::{app::balance, state::State, Error};

#[derive(Debug, Parser, Clone, Copy)]
pub struct Withdraw {
    /// Amount in lamports
    amount: u64,
}

impl Withdraw {
    pub fn run(self) -> Result<(), Error> {
        let mut state = State::load()?;
        let address = state.address()?;

        let State {
            engine,
            signer,
            bank,
        } = &mut state;
        bank.transact(|bank| engine.withdraw(bank, signer, &address, self.amount))?;

        state.save()?;
        balance::print(&state, &address)
    }
}
