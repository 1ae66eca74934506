use std::fmt;

use ed25519_dalek::SigningKey;
use piggybank_lib::Pubkey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// The local signing identity.
///
/// Holding the secret key is what makes this CLI the authenticated owner of
/// its piggybank.
#[derive(Serialize, Deserialize)]
pub struct Wallet {
    #[serde(with = "hex::serde")]
    secret_key: [u8; 32],
}

impl Default for Wallet {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

impl Wallet {
    pub fn generate() -> Self {
        let key = SigningKey::generate(&mut OsRng);
        Self {
            secret_key: key.to_bytes(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        let key = SigningKey::from_bytes(&self.secret_key);
        Pubkey::new(key.verifying_key().to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubkey_is_stable_across_reloads() {
        let wallet = Wallet::generate();
        let yaml = serde_yaml::to_string(&wallet).unwrap();
        let reloaded: Wallet = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(wallet.pubkey(), reloaded.pubkey());
    }

    #[test]
    fn debug_hides_the_secret() {
        let wallet = Wallet::generate();
        let debug = format!("{wallet:?}");

        assert!(!debug.contains(&hex::encode(wallet.secret_key)));
        assert!(debug.contains(&wallet.pubkey().to_string()));
    }
}
