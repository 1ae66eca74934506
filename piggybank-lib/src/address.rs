//! Deterministic record addresses
//!
//! A record address is a SHA-256 digest of the namespace tag, the owner, a
//! one-byte bump and the program id. Digests that happen to be valid ed25519
//! points are skipped so no private key can ever sign for a record address.

use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

use crate::Pubkey;

/// The namespace tag every piggybank record address is derived under
pub const NAMESPACE: &[u8] = b"piggybank";

const MARKER: &[u8] = b"ProgramDerivedAddress";

/// Errors that can occur while deriving an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The digest for this bump is a valid curve point and cannot be used
    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    /// Every bump from 255 down to 0 produced an on-curve digest
    #[error("no viable bump seed")]
    NoViableBump,
}

/// Compute the address for a known bump.
///
/// # Errors
///
/// Returns [`Error::OnCurve`] if the resulting digest is a valid ed25519
/// point.
pub fn create_address(
    namespace: &[u8],
    owner: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, Error> {
    let mut hasher = Sha256::new();
    hasher.update(namespace);
    hasher.update(owner);
    hasher.update([bump]);
    hasher.update(program_id);
    hasher.update(MARKER);
    let bytes: [u8; 32] = hasher.finalize().into();

    if VerifyingKey::from_bytes(&bytes).is_ok() {
        return Err(Error::OnCurve);
    }

    Ok(Pubkey::new(bytes))
}

/// Find the record address for `owner` together with the bump that produced
/// it. The highest viable bump wins, so the result is reproducible.
///
/// # Errors
///
/// Returns [`Error::NoViableBump`] if no bump yields an off-curve address.
pub fn derive(
    namespace: &[u8],
    owner: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), Error> {
    (0..=u8::MAX)
        .rev()
        .find_map(|bump| {
            create_address(namespace, owner, bump, program_id)
                .ok()
                .map(|address| (address, bump))
        })
        .ok_or(Error::NoViableBump)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const PROGRAM: Pubkey = Pubkey::new([7; 32]);

    #[test_case(Pubkey::new([1; 32]); "ones")]
    #[test_case(Pubkey::new([0xfe; 32]); "high bytes")]
    #[test_case(Pubkey::default(); "zero key")]
    fn derivation_is_reproducible(owner: Pubkey) {
        let (address, bump) = derive(NAMESPACE, &owner, &PROGRAM).unwrap();
        assert_eq!(derive(NAMESPACE, &owner, &PROGRAM).unwrap(), (address, bump));
        assert_eq!(create_address(NAMESPACE, &owner, bump, &PROGRAM), Ok(address));
    }

    #[test]
    fn highest_viable_bump_is_chosen() {
        let owner = Pubkey::new([3; 32]);
        let (_, bump) = derive(NAMESPACE, &owner, &PROGRAM).unwrap();
        for higher in (bump..=u8::MAX).skip(1) {
            assert_eq!(
                create_address(NAMESPACE, &owner, higher, &PROGRAM),
                Err(Error::OnCurve)
            );
        }
    }

    #[test]
    fn derived_addresses_are_off_curve() {
        let (address, _) = derive(NAMESPACE, &Pubkey::new([9; 32]), &PROGRAM).unwrap();
        assert!(VerifyingKey::from_bytes(&address.to_bytes()).is_err());
    }

    #[test]
    fn inputs_separate_addresses() {
        let a = Pubkey::new([1; 32]);
        let b = Pubkey::new([2; 32]);
        let (for_a, _) = derive(NAMESPACE, &a, &PROGRAM).unwrap();
        let (for_b, _) = derive(NAMESPACE, &b, &PROGRAM).unwrap();
        let (other_namespace, _) = derive(b"vault", &a, &PROGRAM).unwrap();
        let (other_program, _) = derive(NAMESPACE, &a, &Pubkey::new([8; 32])).unwrap();

        assert_ne!(for_a, for_b);
        assert_ne!(for_a, other_namespace);
        assert_ne!(for_a, other_program);
    }
}
