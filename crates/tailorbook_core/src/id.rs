//! Primary key generation for customers and delivery logs.
//!
//! Keys look like `CUS-lq2k9x7QF3A1B`: prefix, the creation time in base36,
//! then six uppercase base36 characters of randomness.

use crate::clock::{Clock, SystemClock};
use uuid::Uuid;

pub const CUSTOMER_ID_PREFIX: &str = "CUS";
pub const DELIVERY_LOG_ID_PREFIX: &str = "DEL";

const RANDOM_SUFFIX_LEN: usize = 6;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces primary keys that are unique with overwhelming probability.
pub trait IdGenerator {
    fn generate_id(&self, prefix: &str) -> String;
}

/// Time-prefixed random key generator.
#[derive(Debug, Clone, Default)]
pub struct RandomIdGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> RandomIdGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for RandomIdGenerator<C> {
    fn generate_id(&self, prefix: &str) -> String {
        let timestamp = to_base36(u128::try_from(self.clock.now_ms()).unwrap_or(0));
        format!("{prefix}-{timestamp}{}", random_suffix())
    }
}

fn random_suffix() -> String {
    // v4 UUIDs carry 122 random bits; reduce them into six base36 digits.
    let entropy = Uuid::new_v4().as_u128() % 36u128.pow(RANDOM_SUFFIX_LEN as u32);
    let digits = to_base36(entropy).to_ascii_uppercase();
    format!("{digits:0>width$}", width = RANDOM_SUFFIX_LEN)
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::{to_base36, IdGenerator, RandomIdGenerator, CUSTOMER_ID_PREFIX};
    use crate::clock::ManualClock;
    use std::collections::HashSet;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn generated_id_has_prefix_timestamp_and_suffix() {
        let ids = RandomIdGenerator::with_clock(ManualClock::new(1_700_000_000_000));
        let id = ids.generate_id(CUSTOMER_ID_PREFIX);

        let rest = id.strip_prefix("CUS-").expect("prefix should be present");
        assert_eq!(&rest[..8], "loyw3v28");
        let suffix = &rest[8..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_ids_do_not_collide_in_a_burst() {
        let ids = RandomIdGenerator::with_clock(ManualClock::new(42));
        let unique: HashSet<_> = (0..200).map(|_| ids.generate_id("DEL")).collect();
        assert_eq!(unique.len(), 200);
    }
}
