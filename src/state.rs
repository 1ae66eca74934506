//! The local simulated ledger and the identity acting on it

use piggybank_lib::{Bank, Piggybank, Pubkey};

use crate::{config, Error};

#[derive(Debug)]
pub struct State {
    pub engine: Piggybank,
    pub signer: Pubkey,
    pub bank: Bank,
}

impl State {
    pub fn load() -> Result<Self, Error> {
        let config = config::load()?;
        let wallet = config::wallet()?;
        let bank = config::bank(&config)?;

        tracing::debug!(program_id = %config.program_id, signer = %wallet.pubkey(), "loaded state");

        Ok(Self {
            engine: Piggybank::new(config.program_id),
            signer: wallet.pubkey(),
            bank,
        })
    }

    /// The signer's piggybank address
    pub fn address(&self) -> Result<Pubkey, Error> {
        let (address, _bump) = self.engine.address_of(&self.signer)?;
        Ok(address)
    }

    pub fn save(&self) -> Result<(), Error> {
        config::save_bank(&self.bank)?;
        Ok(())
    }
}
