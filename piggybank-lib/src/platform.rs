//! The hosting ledger the piggybank runs on
//!
//! The engine never touches balances or storage directly. Everything goes
//! through a [`Platform`], which owns raw balances, storage allocation and the
//! minimum balance a storage account must keep to go on existing.

use crate::Pubkey;

mod bank;
pub use bank::{Account, Bank, Rent};

/// A view of an account that holds program data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Storage<'a> {
    /// The program that owns, and alone may write, the data
    pub program: Pubkey,

    /// The raw stored bytes
    pub data: &'a [u8],
}

/// Errors raised by the hosting ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source of a transfer does not hold enough units
    #[error("account {account} holds {balance}, needs {needed}")]
    InsufficientLamports {
        /// the account being debited
        account: Pubkey,
        /// the amount requested
        needed: u64,
        /// the account's balance at the time
        balance: u64,
    },

    /// A transfer would leave a storage account below its minimum balance
    #[error("account {account} would fall below its minimum balance of {floor}")]
    BelowMinimumBalance {
        /// the storage account being debited
        account: Pubkey,
        /// the minimum balance for its data size
        floor: u64,
    },

    /// A credit would overflow the destination balance
    #[error("balance of account {account} would overflow")]
    BalanceOverflow {
        /// the account being credited
        account: Pubkey,
    },

    /// Storage was requested for an account that already has some
    #[error("account {address} already holds data")]
    AlreadyAllocated {
        /// the account in question
        address: Pubkey,
    },

    /// A write targeted an account without storage
    #[error("account {address} holds no data")]
    NotAllocated {
        /// the account in question
        address: Pubkey,
    },

    /// A write did not match the size of the allocated storage
    #[error("expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// the allocated size
        expected: usize,
        /// the size of the write
        actual: usize,
    },
}

/// The collaborator interface consumed by the [`Piggybank`](crate::Piggybank)
/// engine.
///
/// Implementations are expected to apply a whole engine call or none of it.
/// See [`Bank::transact`] for an in-memory version of that guarantee.
pub trait Platform {
    /// The raw balance of an account. Unknown accounts hold nothing.
    fn lamports(&self, address: &Pubkey) -> u64;

    /// The program data held by an account, if any
    fn storage(&self, address: &Pubkey) -> Option<Storage<'_>>;

    /// The minimum raw balance an account holding `data_len` bytes must keep
    fn minimum_balance(&self, data_len: usize) -> u64;

    /// Move units between accounts.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot cover the amount, if the source is a storage
    /// account that would drop below its minimum balance, or if the
    /// destination would overflow.
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<(), Error>;

    /// Give an account `space` zeroed bytes of storage owned by `program`.
    ///
    /// # Errors
    ///
    /// Fails if the account already holds data.
    fn allocate(&mut self, address: &Pubkey, space: usize, program: &Pubkey) -> Result<(), Error>;

    /// Overwrite an account's storage.
    ///
    /// # Errors
    ///
    /// Fails if the account holds no data or `data` differs in size from the
    /// allocation.
    fn write(&mut self, address: &Pubkey, data: &[u8]) -> Result<(), Error>;
}
