use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{instrument, Level};

use super::{Error, Platform, Storage};
use crate::Pubkey;

/// The schedule used to compute the minimum balance of storage accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rent {
    /// Units charged per byte per year
    pub lamports_per_byte_year: u64,

    /// How many years of rent an account must hold to be exempt
    pub exemption_threshold_years: u64,

    /// Bytes of bookkeeping charged on top of every account's data
    pub account_storage_overhead: u64,
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold_years: 2,
            account_storage_overhead: 128,
        }
    }
}

impl Rent {
    /// The minimum balance for an account holding `data_len` bytes
    #[must_use]
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        let data_len = u64::try_from(data_len).unwrap_or(u64::MAX);
        self.account_storage_overhead
            .saturating_add(data_len)
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_threshold_years)
    }
}

/// A single account held by the [`Bank`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Account {
    /// The raw balance
    pub lamports: u64,

    /// The program owning `data`, if storage has been allocated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Pubkey>,

    /// Program data
    #[serde(default, with = "hex::serde", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

/// An in-memory hosting ledger.
///
/// Serializable, so a whole simulated ledger can be saved and reloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(default)]
    rent: Rent,

    #[serde(default)]
    accounts: IndexMap<Pubkey, Account>,
}

impl Bank {
    /// An empty bank using the given rent schedule
    #[must_use]
    pub fn new(rent: Rent) -> Self {
        Self {
            rent,
            accounts: IndexMap::default(),
        }
    }

    /// The bank's rent schedule
    #[must_use]
    pub fn rent(&self) -> Rent {
        self.rent
    }

    /// Look up an account
    #[must_use]
    pub fn account(&self, address: &Pubkey) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// All accounts, in order of first appearance
    pub fn accounts(&self) -> impl Iterator<Item = (&Pubkey, &Account)> {
        self.accounts.iter()
    }

    /// Mint new units into an account
    ///
    /// # Errors
    ///
    /// Fails if the account balance would overflow.
    #[instrument(skip(self))]
    pub fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> Result<(), Error> {
        let credited = self
            .lamports(to)
            .checked_add(lamports)
            .ok_or(Error::BalanceOverflow { account: *to })?;
        self.accounts.entry(*to).or_default().lamports = credited;

        tracing::event!(Level::INFO, "airdropped");
        Ok(())
    }

    /// Run `f` against the bank, keeping its changes only if it succeeds.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns. The bank is left exactly as it was before
    /// the call in that case.
    pub fn transact<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.accounts.clone();
        let result = f(self);
        if result.is_err() {
            tracing::event!(Level::DEBUG, "rolling back");
            self.accounts = snapshot;
        }
        result
    }
}

impl Platform for Bank {
    fn lamports(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |account| account.lamports)
    }

    fn storage(&self, address: &Pubkey) -> Option<Storage<'_>> {
        let account = self.accounts.get(address)?;
        account.program.map(|program| Storage {
            program,
            data: &account.data,
        })
    }

    fn minimum_balance(&self, data_len: usize) -> u64 {
        self.rent.minimum_balance(data_len)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<(), Error> {
        let balance = self.lamports(from);
        if balance < lamports {
            return Err(Error::InsufficientLamports {
                account: *from,
                needed: lamports,
                balance,
            });
        }
        if lamports == 0 || from == to {
            return Ok(());
        }

        let remaining = balance - lamports;
        if let Some(storage) = self.storage(from) {
            let floor = self.minimum_balance(storage.data.len());
            if remaining < floor {
                return Err(Error::BelowMinimumBalance {
                    account: *from,
                    floor,
                });
            }
        }

        let credited = self
            .lamports(to)
            .checked_add(lamports)
            .ok_or(Error::BalanceOverflow { account: *to })?;

        self.accounts.entry(*from).or_default().lamports = remaining;
        self.accounts.entry(*to).or_default().lamports = credited;

        // plain accounts that run dry are purged, as on a real ledger
        if remaining == 0 && self.storage(from).is_none() {
            self.accounts.shift_remove(from);
        }

        Ok(())
    }

    fn allocate(&mut self, address: &Pubkey, space: usize, program: &Pubkey) -> Result<(), Error> {
        let account = self.accounts.entry(*address).or_default();
        if account.program.is_some() {
            return Err(Error::AlreadyAllocated { address: *address });
        }
        account.program = Some(*program);
        account.data = vec![0; space];
        Ok(())
    }

    fn write(&mut self, address: &Pubkey, data: &[u8]) -> Result<(), Error> {
        let account = self
            .accounts
            .get_mut(address)
            .filter(|account| account.program.is_some())
            .ok_or(Error::NotAllocated { address: *address })?;
        if account.data.len() != data.len() {
            return Err(Error::SizeMismatch {
                expected: account.data.len(),
                actual: data.len(),
            });
        }
        account.data.copy_from_slice(data);
        Ok(())
    }
}
