use clap::Parser;

use crate::{config, wallet::Wallet, Error};

#[derive(Debug, Parser, Clone, Copy)]
pub struct Keygen {
    /// Replace an existing wallet
    #[clap(long)]
    force: bool,
}

impl Keygen {
    pub fn run(self) -> Result<(), Error> {
        if config::wallet_exists()? && !self.force {
            return Err(Error::WalletExists);
        }

        let wallet = Wallet::generate();
        config::save_wallet(&wallet)?;
        println!("new wallet: {}", wallet.pubkey());
        Ok(())
    }
}
