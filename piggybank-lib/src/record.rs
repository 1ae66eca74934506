use crate::Pubkey;

/// The persistent per-owner state of a piggybank.
///
/// `tracked_total` is the net of every deposit and withdrawal processed by
/// the engine. It is not the raw balance of the account holding the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// The identity allowed to deposit into and withdraw from this record
    pub owner: Pubkey,

    /// Sum of deposits minus sum of withdrawals
    pub tracked_total: u64,

    /// The bump that, with the owner, reproduces the record's address
    pub bump: u8,
}

impl Record {
    /// Serialized size in bytes: owner, tracked total (little endian), bump
    pub const LEN: usize = Pubkey::LEN + 8 + 1;

    /// A fresh record with nothing tracked
    #[must_use]
    pub const fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            tracked_total: 0,
            bump,
        }
    }

    /// Encode into the fixed storage layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[..32].copy_from_slice(self.owner.as_ref());
        bytes[32..40].copy_from_slice(&self.tracked_total.to_le_bytes());
        bytes[40] = self.bump;
        bytes
    }

    /// Decode from the fixed storage layout.
    ///
    /// Returns `None` if `data` is not exactly [`Record::LEN`] bytes long.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let data: &[u8; Self::LEN] = data.try_into().ok()?;

        let mut owner = [0; 32];
        owner.copy_from_slice(&data[..32]);
        let mut tracked_total = [0; 8];
        tracked_total.copy_from_slice(&data[32..40]);

        Some(Self {
            owner: Pubkey::new(owner),
            tracked_total: u64::from_le_bytes(tracked_total),
            bump: data[40],
        })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn layout() {
        let record = Record {
            owner: Pubkey::new([0xaa; 32]),
            tracked_total: 0x0102_0304_0506_0708,
            bump: 254,
        };
        let bytes = record.to_bytes();

        assert_eq!(bytes.len(), 41);
        assert_eq!(&bytes[..32], &[0xaa; 32]);
        assert_eq!(&bytes[32..40], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(bytes[40], 254);
        assert_eq!(Record::from_bytes(&bytes), Some(record));
    }

    #[test_case(0; "empty")]
    #[test_case(40; "truncated")]
    #[test_case(42; "trailing byte")]
    fn rejects_wrong_length(len: usize) {
        assert_eq!(Record::from_bytes(&vec![0; len]), None);
    }
}
