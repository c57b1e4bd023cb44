//! Candidate-account matching.
//!
//! Given a target address and an ordered list of labelled secret phrases,
//! derive the address each secret implies under sr25519 and report the first
//! exact match. Derivation is deterministic; the scan short-circuits on the
//! first hit and a malformed secret is skipped (logged at `warn`), never
//! fatal to the remaining candidates.

use crate::error::KeyringError;
use crate::shared::Address;
use serde::{Deserialize, Serialize};
use sp_core::crypto::Ss58Codec;
use sp_core::{sr25519, Pair};
use tracing::warn;

/// A labelled secret phrase to probe: a dev derivation path (`//Alice`) or
/// an arbitrary mnemonic/seed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub secret: String,
}

impl Candidate {
    pub fn new(label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: secret.into(),
        }
    }
}

/// Outcome of a matching scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The first candidate whose derived address equals the target.
    Match { label: String, address: Address },
    /// Every candidate was tried (or skipped) without a hit.
    NoMatch,
}

/// Derive the SS58 address a secret phrase implies.
///
/// Pure and deterministic: the same secret always yields the same address.
pub fn derive_address(secret: &str) -> Result<Address, KeyringError> {
    let pair = sr25519::Pair::from_string(secret, None)
        .map_err(|e| KeyringError::BadSecret(format!("{e:?}")))?;
    Ok(Address::new(pair.public().to_ss58check()))
}

/// Scan `candidates` in order for the first one deriving `target`.
///
/// Evaluation stops at the first match; candidates after it are never
/// derived. A candidate whose secret does not parse is skipped.
pub fn match_target<I>(target: &Address, candidates: I) -> MatchOutcome
where
    I: IntoIterator<Item = Candidate>,
{
    for candidate in candidates {
        match derive_address(&candidate.secret) {
            Ok(address) if address == *target => {
                return MatchOutcome::Match {
                    label: candidate.label,
                    address,
                };
            }
            Ok(_) => {}
            Err(e) => {
                warn!(label = %candidate.label, error = %e, "skipping underivable candidate");
            }
        }
    }
    MatchOutcome::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

    #[test]
    fn test_derive_is_deterministic() {
        let a = derive_address("//Alice").unwrap();
        let b = derive_address("//Alice").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_well_known_dev_addresses() {
        assert_eq!(derive_address("//Alice").unwrap().as_str(), ALICE);
        assert_eq!(derive_address("//Bob").unwrap().as_str(), BOB);
    }

    #[test]
    fn test_bad_secret_is_an_error() {
        // Not a bip39 phrase, not hex, no derivation path.
        assert!(matches!(
            derive_address("xyzzy plugh"),
            Err(KeyringError::BadSecret(_))
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let outcome = match_target(
            &Address::new(ALICE),
            vec![
                Candidate::new("Alice", "//Alice"),
                Candidate::new("Bob", "//Bob"),
            ],
        );
        assert_eq!(
            outcome,
            MatchOutcome::Match {
                label: "Alice".into(),
                address: Address::new(ALICE),
            }
        );
    }

    #[test]
    fn test_scan_short_circuits() {
        let derived = Cell::new(0usize);
        let candidates = std::iter::from_fn(|| {
            derived.set(derived.get() + 1);
            match derived.get() {
                1 => Some(Candidate::new("Alice", "//Alice")),
                2 => Some(Candidate::new("Bob", "//Bob")),
                _ => None,
            }
        });
        let outcome = match_target(&Address::new(ALICE), candidates);
        assert!(matches!(outcome, MatchOutcome::Match { .. }));
        // Bob was never pulled from the sequence.
        assert_eq!(derived.get(), 1);
    }

    #[test]
    fn test_malformed_candidate_does_not_abort_scan() {
        let outcome = match_target(
            &Address::new(BOB),
            vec![
                Candidate::new("broken", "xyzzy plugh"),
                Candidate::new("Bob", "//Bob"),
            ],
        );
        assert_eq!(
            outcome,
            MatchOutcome::Match {
                label: "Bob".into(),
                address: Address::new(BOB),
            }
        );
    }

    #[test]
    fn test_exhausted_scan_is_no_match() {
        let outcome = match_target(
            &Address::new(ALICE),
            vec![
                Candidate::new("Bob", "//Bob"),
                Candidate::new("Charlie", "//Charlie"),
            ],
        );
        assert_eq!(outcome, MatchOutcome::NoMatch);
    }
}
