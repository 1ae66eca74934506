//! The balance engine
//!
//! Every mutating call re-derives the caller's record address, checks it
//! against the address presented, and only then touches balances. The
//! minimum balance of the record is looked up fresh on every call.

use std::fmt;

use tracing::{instrument, Level};

use crate::{
    address::{self, NAMESPACE},
    platform::{self, Platform},
    Pubkey, Record,
};

/// Why a caller was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unauthorized {
    /// The address presented is not the one derived from the caller
    #[error("address does not belong to the caller")]
    AddressMismatch,

    /// The record is owned by someone other than the caller
    #[error("caller does not own the record")]
    OwnerMismatch,

    /// The account is held by a different program
    #[error("account is owned by another program")]
    ForeignAccount,
}

/// Which ceiling a withdrawal ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    /// The raw balance above the storage floor
    Available,

    /// The net total deposited through the engine
    Tracked,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available balance"),
            Self::Tracked => f.write_str("tracked balance"),
        }
    }
}

/// Ways a record can be found in an impossible state
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Corruption {
    /// Adding a deposit to the tracked total overflowed
    #[error("tracked total overflowed")]
    TrackedOverflow,

    /// The stored bytes do not decode as a record
    #[error("stored data is not a record")]
    MalformedRecord,

    /// The stored bump does not reproduce the record's address
    #[error("stored bump {stored} does not match derived bump {derived}")]
    BumpMismatch {
        /// the bump held in the record
        stored: u8,
        /// the bump found by derivation
        derived: u8,
    },
}

/// Errors returned by the [`Piggybank`] engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A record already lives at this address. Callers should fetch it
    /// rather than treat this as fatal.
    #[error("a record already exists at {address}")]
    AlreadyExists {
        /// the record's address
        address: Pubkey,
    },

    /// No record lives at this address
    #[error("no record exists at {address}")]
    NotInitialized {
        /// the address looked up
        address: Pubkey,
    },

    /// The caller may not act on this record
    #[error("unauthorized: {0}")]
    Unauthorized(Unauthorized),

    /// A withdrawal asked for more than the record can give
    #[error("insufficient funds: requested {requested}, {shortfall} is {available}")]
    InsufficientFunds {
        /// the amount asked for
        requested: u64,
        /// the ceiling that was hit
        available: u64,
        /// which ceiling was hit
        shortfall: Shortfall,
    },

    /// Deposits and withdrawals must move at least one unit
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The record is inconsistent
    #[error("corruption: {0}")]
    Corruption(Corruption),

    /// No address could be derived for the caller
    #[error(transparent)]
    Derivation(#[from] address::Error),

    /// The hosting ledger refused an operation
    #[error(transparent)]
    Platform(#[from] platform::Error),
}

impl Error {
    /// Whether the caller can carry on. Only [`Error::AlreadyExists`] is
    /// recoverable: the record the caller wanted is already there.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl From<Unauthorized> for Error {
    fn from(reason: Unauthorized) -> Self {
        Self::Unauthorized(reason)
    }
}

impl From<Corruption> for Error {
    fn from(reason: Corruption) -> Self {
        Self::Corruption(reason)
    }
}

/// The two numbers a client reconciles, projected from one record and the
/// raw balance of the account holding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balances {
    raw: u64,
    floor: u64,
    tracked: u64,
}

impl Balances {
    fn new(record: &Record, raw: u64, floor: u64) -> Self {
        Self {
            raw,
            floor,
            tracked: record.tracked_total,
        }
    }

    /// The raw balance of the account holding the record
    #[must_use]
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// The minimum balance the account must keep
    #[must_use]
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Raw balance above the floor
    #[must_use]
    pub fn available(&self) -> u64 {
        self.raw.saturating_sub(self.floor)
    }

    /// Net units deposited through the engine
    #[must_use]
    pub fn tracked(&self) -> u64 {
        self.tracked
    }

    /// The largest amount a single withdrawal can currently take
    #[must_use]
    pub fn withdrawable(&self) -> u64 {
        self.available().min(self.tracked)
    }

    /// True when no units have reached or left the record outside the engine
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.available() == self.tracked
    }
}

/// The piggybank balance engine for one program id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piggybank {
    program_id: Pubkey,
}

impl Piggybank {
    /// An engine whose records are owned by `program_id`
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// The program id records are derived under and owned by
    #[must_use]
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// The record address for `owner` and its bump
    ///
    /// # Errors
    ///
    /// Fails only if no bump yields a viable address.
    pub fn address_of(&self, owner: &Pubkey) -> Result<(Pubkey, u8), Error> {
        Ok(address::derive(NAMESPACE, owner, &self.program_id)?)
    }

    /// Create the record for `signer` at `address`, funding it up to the
    /// storage floor from the signer's own balance.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if `address` is not derived from `signer`
    /// - [`Error::AlreadyExists`] if something is already stored there
    /// - [`Error::Platform`] if the signer cannot pay for the floor
    #[instrument(skip(self, platform))]
    pub fn initialize<P: Platform>(
        &self,
        platform: &mut P,
        signer: &Pubkey,
        address: &Pubkey,
    ) -> Result<(), Error> {
        let bump = self.check_address(signer, address)?;

        if platform.storage(address).is_some() {
            tracing::event!(Level::DEBUG, "record already exists");
            return Err(Error::AlreadyExists { address: *address });
        }

        let floor = platform.minimum_balance(Record::LEN);
        let top_up = floor.saturating_sub(platform.lamports(address));
        if top_up > 0 {
            platform.transfer(signer, address, top_up)?;
        }

        platform.allocate(address, Record::LEN, &self.program_id)?;
        platform.write(address, &Record::new(*signer, bump).to_bytes())?;

        tracing::event!(Level::INFO, floor, bump, "initialized record");
        Ok(())
    }

    /// Move `amount` from the signer into their record.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if the signer does not own the record
    /// - [`Error::InvalidAmount`] if `amount` is zero
    /// - [`Error::Corruption`] if the tracked total would overflow
    /// - [`Error::Platform`] if the signer cannot cover the amount
    #[instrument(skip(self, platform))]
    pub fn deposit<P: Platform>(
        &self,
        platform: &mut P,
        signer: &Pubkey,
        address: &Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        let (mut record, _) = self.authorize(platform, signer, address)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let tracked_total = record
            .tracked_total
            .checked_add(amount)
            .ok_or(Corruption::TrackedOverflow)?;

        platform.transfer(signer, address, amount)?;
        record.tracked_total = tracked_total;
        platform.write(address, &record.to_bytes())?;

        tracing::event!(Level::INFO, tracked_total, "deposited");
        Ok(())
    }

    /// Move `amount` from the signer's record back to the signer.
    ///
    /// The amount is capped both by the raw balance above the storage floor
    /// and by the tracked total, so neither donated units nor the floor can
    /// be withdrawn.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if the signer does not own the record
    /// - [`Error::InvalidAmount`] if `amount` is zero
    /// - [`Error::InsufficientFunds`] if either ceiling is exceeded
    #[instrument(skip(self, platform))]
    pub fn withdraw<P: Platform>(
        &self,
        platform: &mut P,
        signer: &Pubkey,
        address: &Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        let (mut record, balances) = self.authorize(platform, signer, address)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let available = balances.available();
        if amount > available {
            tracing::event!(Level::WARN, available, "withdrawal exceeds available balance");
            return Err(Error::InsufficientFunds {
                requested: amount,
                available,
                shortfall: Shortfall::Available,
            });
        }

        let tracked_total = record.tracked_total.checked_sub(amount).ok_or_else(|| {
            tracing::event!(
                Level::WARN,
                tracked = record.tracked_total,
                "withdrawal exceeds tracked balance"
            );
            Error::InsufficientFunds {
                requested: amount,
                available: record.tracked_total,
                shortfall: Shortfall::Tracked,
            }
        })?;

        platform.transfer(address, signer, amount)?;
        record.tracked_total = tracked_total;
        platform.write(address, &record.to_bytes())?;

        debug_assert!(platform.lamports(address) >= balances.floor());
        tracing::event!(Level::INFO, tracked_total, "withdrew");
        Ok(())
    }

    /// Both balance projections of the record at `address`
    ///
    /// # Errors
    ///
    /// Fails if no valid record of this program is stored at `address`.
    pub fn balances<P: Platform>(&self, platform: &P, address: &Pubkey) -> Result<Balances, Error> {
        self.load(platform, address).map(|(_, balances)| balances)
    }

    /// The raw balance above the storage floor of the record at `address`
    ///
    /// # Errors
    ///
    /// See [`Piggybank::balances`].
    pub fn available_balance<P: Platform>(
        &self,
        platform: &P,
        address: &Pubkey,
    ) -> Result<u64, Error> {
        self.balances(platform, address)
            .map(|balances| balances.available())
    }

    /// The tracked total of the record at `address`
    ///
    /// # Errors
    ///
    /// See [`Piggybank::balances`].
    pub fn tracked_balance<P: Platform>(
        &self,
        platform: &P,
        address: &Pubkey,
    ) -> Result<u64, Error> {
        self.balances(platform, address)
            .map(|balances| balances.tracked())
    }

    /// Returns the bump for `address` if it is derived from `signer`
    fn check_address(&self, signer: &Pubkey, address: &Pubkey) -> Result<u8, Error> {
        let (expected, bump) = self.address_of(signer)?;
        if expected != *address {
            tracing::event!(Level::WARN, %expected, "address mismatch");
            return Err(Unauthorized::AddressMismatch.into());
        }
        Ok(bump)
    }

    fn authorize<P: Platform>(
        &self,
        platform: &P,
        signer: &Pubkey,
        address: &Pubkey,
    ) -> Result<(Record, Balances), Error> {
        let bump = self.check_address(signer, address)?;
        let (record, balances) = self.load(platform, address)?;

        if record.owner != *signer {
            tracing::event!(Level::WARN, owner = %record.owner, "owner mismatch");
            return Err(Unauthorized::OwnerMismatch.into());
        }
        if record.bump != bump {
            return Err(Corruption::BumpMismatch {
                stored: record.bump,
                derived: bump,
            }
            .into());
        }

        Ok((record, balances))
    }

    fn load<P: Platform>(&self, platform: &P, address: &Pubkey) -> Result<(Record, Balances), Error> {
        let storage = platform
            .storage(address)
            .ok_or(Error::NotInitialized { address: *address })?;
        if storage.program != self.program_id {
            return Err(Unauthorized::ForeignAccount.into());
        }

        let record = Record::from_bytes(storage.data).ok_or(Corruption::MalformedRecord)?;
        let floor = platform.minimum_balance(storage.data.len());
        let balances = Balances::new(&record, platform.lamports(address), floor);

        Ok((record, balances))
    }
}
