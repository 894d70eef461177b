//! Verification entry entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

pub use mv_shared::config::verification::{DEFAULT_CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES};

/// One outstanding challenge for a single recipient
///
/// Entries are never mutated after creation; the store only inserts,
/// reads and removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// The numeric verification code, leading zeros preserved
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp from which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Creates an entry for an existing code
    ///
    /// An expiry past the representable range is clamped to the latest
    /// representable instant.
    ///
    /// # Arguments
    ///
    /// * `code` - The code to store
    /// * `created_at` - Issue time
    /// * `ttl` - Lifetime of the code
    pub fn new(code: impl Into<String>, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: code.into(),
            created_at,
            expires_at: created_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Creates an entry with a freshly generated code of `length` digits
    pub fn generate(length: usize, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(generate_code(length), created_at, ttl)
    }

    /// Checks whether the entry has expired at `now`
    ///
    /// The `expires_at` instant itself already counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the entry has expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compares a submitted code against the stored one in constant time
    ///
    /// No trimming or normalization is applied to `candidate`.
    pub fn matches(&self, candidate: &str) -> bool {
        if candidate.len() != self.code.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration_at(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Generates a code of `length` independently drawn uniform decimal digits
///
/// Digits come from `OsRng` (OS-provided CSPRNG). `gen_range` rejects
/// out-of-range samples, so every digit is unbiased.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_entry() {
        let entry = VerificationEntry::new("012345", t0(), Duration::minutes(10));

        assert_eq!(entry.code, "012345");
        assert_eq!(entry.created_at, t0());
        assert_eq!(entry.expires_at, t0() + Duration::minutes(10));
    }

    #[test]
    fn test_new_entry_clamps_overflowing_ttl() {
        let entry = VerificationEntry::new("012345", t0(), Duration::minutes(1_000_000_000_000));

        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired_at(t0()));
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert_eq!(code.len(), DEFAULT_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_lengths() {
        assert_eq!(generate_code(0), "");
        assert_eq!(generate_code(1).len(), 1);
        assert_eq!(generate_code(12).len(), 12);
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| generate_code(6)).collect();
        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = VerificationEntry::new("123456", t0(), Duration::minutes(10));

        assert!(!entry.is_expired_at(t0()));
        assert!(!entry.is_expired_at(t0() + Duration::minutes(10) - Duration::milliseconds(1)));
        assert!(entry.is_expired_at(t0() + Duration::minutes(10)));
        assert!(entry.is_expired_at(t0() + Duration::minutes(11)));
    }

    #[test]
    fn test_is_expired_uses_wall_clock() {
        let fresh = VerificationEntry::generate(6, Utc::now(), Duration::minutes(10));
        assert!(!fresh.is_expired());

        let stale = VerificationEntry::generate(6, Utc::now() - Duration::minutes(20), Duration::minutes(10));
        assert!(stale.is_expired());
    }

    #[test]
    fn test_matches_is_exact() {
        let entry = VerificationEntry::new("004200", t0(), Duration::minutes(10));

        assert!(entry.matches("004200"));
        assert!(!entry.matches("4200"));
        assert!(!entry.matches("004201"));
        assert!(!entry.matches(" 004200"));
        assert!(!entry.matches("004200 "));
        assert!(!entry.matches(""));
        assert!(!entry.matches("abcdef"));
    }

    #[test]
    fn test_time_until_expiration() {
        let entry = VerificationEntry::new("123456", t0(), Duration::minutes(10));

        assert_eq!(entry.time_until_expiration_at(t0()), Duration::minutes(10));
        assert_eq!(
            entry.time_until_expiration_at(t0() + Duration::minutes(4)),
            Duration::minutes(6)
        );
        assert_eq!(
            entry.time_until_expiration_at(t0() + Duration::minutes(30)),
            Duration::zero()
        );
    }

    #[test]
    fn test_serialization() {
        let entry = VerificationEntry::new("000123", t0(), Duration::minutes(10));
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: VerificationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
