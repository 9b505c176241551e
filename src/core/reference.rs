//! Synthetic identifiers: campaign ids and transaction hashes.

use rand::Rng;

/// Length of a transaction hash including the `0x` prefix
pub const TX_HASH_LEN: usize = 66;

/// Generates a random transaction hash: `0x` followed by 64 lowercase hex digits.
///
/// Used for donations to local-only campaigns and for fund releases, where no
/// real chain transaction exists.
#[must_use]
pub fn generate_tx_hash() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

/// Generates a campaign identifier: `camp_` followed by 16 lowercase hex digits.
#[must_use]
pub fn generate_campaign_id() -> String {
    let mut bytes = [0u8; 8];
    rand::rng().fill(&mut bytes);
    format!("camp_{}", hex::encode(bytes))
}

/// Whether `value` has the shape produced by [`generate_tx_hash`].
#[must_use]
pub fn is_tx_hash(value: &str) -> bool {
    value.len() == TX_HASH_LEN
        && value.starts_with("0x")
        && value[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
