//! Field-level validation rules.
//!
//! Every function here is total: arbitrary input (including the empty
//! string) yields `false` rather than an error.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

static WALLET_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid pattern"));

static IPFS_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Qm[1-9A-HJ-NP-Za-km-z]{44}$").expect("valid pattern"));

/// Whether the string is an EVM-style wallet address: `0x` followed by
/// exactly 40 hex digits. No checksum verification.
pub fn validate_wallet_address(address: &str) -> bool {
    WALLET_ADDRESS.is_match(address)
}

/// Whether the string looks like an email address.
///
/// Deliberately loose (non-whitespace `@` non-whitespace `.`
/// non-whitespace), not RFC 5322.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Whether the string parses as an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn validate_date(date: &str) -> bool {
    parse_date(date).is_some()
}

/// Whether a person born on `date_of_birth` is at least `min_age` years
/// old today. An unparseable date yields `false`.
pub fn validate_age(date_of_birth: &str, min_age: i32) -> bool {
    age_on(date_of_birth, min_age, Utc::now().date_naive())
}

/// Age check against an explicit "today", so callers can pin the clock.
///
/// Computes the calendar-year difference and subtracts one if the birth
/// month/day has not yet occurred this year. The boundary is inclusive:
/// on the exact `min_age`th birthday this returns `true`.
pub fn age_on(date_of_birth: &str, min_age: i32, today: NaiveDate) -> bool {
    let Some(birth) = parse_date(date_of_birth) else {
        return false;
    };

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age >= min_age
}

/// Whether the string is a legacy (CIDv0) content identifier: `Qm`
/// followed by exactly 44 base58 characters.
pub fn validate_ipfs_hash(hash: &str) -> bool {
    IPFS_HASH.is_match(hash)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
