//! Generators for human-facing reference numbers.

use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};

fn short_uuid() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}

/// `ORD-YYYYMMDD-xxxxxxxx`
pub fn order_number(now: DateTime<Utc>) -> String {
    format!("ORD-{}-{}", now.format("%Y%m%d"), short_uuid())
}

/// `TXN-YYYYMMDDHHMMSS-xxxxxxxx`
pub fn transaction_id(now: DateTime<Utc>) -> String {
    format!("TXN-{}-{}", now.format("%Y%m%d%H%M%S"), short_uuid())
}

/// Mock bech32-looking wallet address: `bc1q` followed by 32 lower-case alphanumerics.
pub fn crypto_address() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("bc1q{}", suffix)
}

/// Virtual account number: `8808` followed by 8 random digits.
pub fn virtual_account() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..8)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();

    format!("8808{}", digits)
}
