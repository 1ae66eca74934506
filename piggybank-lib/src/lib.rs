//! A custodial piggybank ledger.
//!
//! Each owner gets exactly one [`Record`] stored at an address derived from
//! their identity. The [`Piggybank`] engine moves native units in and out of
//! that record while keeping the record's raw balance at or above the
//! storage floor demanded by the hosting [`Platform`].

#![deny(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs
)]
#![warn(clippy::pedantic)]

mod pubkey;
pub use pubkey::{ParsePubkeyError, Pubkey};
pub mod address;
mod record;
pub use record::Record;
pub mod platform;
#[doc(inline)]
pub use platform::{Bank, Platform, Rent};
pub mod engine;
#[doc(inline)]
pub use engine::{Balances, Piggybank};
