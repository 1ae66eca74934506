use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A 32-byte identity handle.
///
/// Used for owners, program ids and derived record addresses alike. The text
/// form is lowercase hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    /// The length of a [`Pubkey`] in bytes
    pub const LEN: usize = 32;

    /// Wrap raw bytes
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the key
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

/// Returned when parsing a [`Pubkey`] from text fails
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParsePubkeyError {
    /// the input is not valid hex
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// the input decoded to the wrong number of bytes
    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())?;
        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParsePubkeyError::Length(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_text_form() {
        let key = Pubkey::new([0xab; 32]);
        let text = key.to_string();
        assert_eq!(text, "ab".repeat(32));
        assert_eq!(text.parse::<Pubkey>().unwrap(), key);
    }

    #[test]
    fn rejects_short_keys() {
        assert_eq!("abcd".parse::<Pubkey>(), Err(ParsePubkeyError::Length(2)));
    }

    #[test]
    fn deserialise_yaml() {
        let raw = format!("owner: {}", "cd".repeat(32));
        let parsed: std::collections::HashMap<String, Pubkey> = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(parsed["owner"], Pubkey::new([0xcd; 32]));
    }
}
