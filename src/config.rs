use confy::ConfyError;
use piggybank_lib::{Bank, Pubkey, Rent};
use serde::{Deserialize, Serialize};

use crate::wallet::Wallet;

pub static BIN_NAME: &str = std::env!("CARGO_PKG_NAME");

/// The program id the piggybank program was first deployed under
const DEFAULT_PROGRAM_ID: Pubkey = Pubkey::new([
    0xd7, 0x5d, 0x6c, 0x8d, 0xc0, 0xc9, 0x73, 0x99, 0xd1, 0x42, 0x8c, 0xc6, 0xe9, 0x13, 0x1a, 0xfd,
    0x89, 0xe9, 0x0f, 0x27, 0x5f, 0xcc, 0x1f, 0x59, 0xb4, 0xb9, 0xd9, 0xe3, 0x95, 0x31, 0xde, 0x6e,
]);

#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The program owning every piggybank record
    pub program_id: Pubkey,

    /// Rent schedule for a freshly created local bank
    pub rent: Rent,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            rent: Rent::default(),
        }
    }
}

pub fn load() -> Result<Config, ConfyError> {
    confy::load(BIN_NAME, "config")
}

pub fn wallet() -> Result<Wallet, ConfyError> {
    confy::load(BIN_NAME, "wallet")
}

pub fn save_wallet(wallet: &Wallet) -> Result<(), ConfyError> {
    confy::store(BIN_NAME, "wallet", wallet)
}

pub fn wallet_exists() -> Result<bool, ConfyError> {
    Ok(confy::get_configuration_file_path(BIN_NAME, "wallet")?.exists())
}

/// Load the local bank, seeding an empty one with the configured rent
pub fn bank(config: &Config) -> Result<Bank, ConfyError> {
    let bank: Bank = confy::load(BIN_NAME, "bank")?;
    if bank.accounts().next().is_none() {
        return Ok(Bank::new(config.rent));
    }
    Ok(bank)
}

pub fn save_bank(bank: &Bank) -> Result<(), ConfyError> {
    confy::store(BIN_NAME, "bank", bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_yaml() {
        let raw = r#"
        program_id: abababababababababababababababababababababababababababababababab
        rent:
          lamports_per_byte_year: 1
          exemption_threshold_years: 1
          account_storage_overhead: 0
        "#;

        let config: Config = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.program_id, Pubkey::new([0xab; 32]));
        assert_eq!(config.rent.minimum_balance(41), 41);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.program_id, DEFAULT_PROGRAM_ID);
        assert_eq!(config.rent, Rent::default());
    }
}
