//! Checksum engine.
//!
//! The embedded checksum is the low 16 bits of a 32-bit checksum computed
//! over the other four fields joined by a salt:
//!
//! ```text
//! dec(timestamp) ‖ salt ‖ dec(type) ‖ salt ‖ dec(rand) ‖ salt ‖ hash
//! ```
//!
//! Integers enter the message as decimal text and the hash as its raw bytes.
//! Two systems only agree on validity if they share the salt. This is an
//! integrity tag, not a signature.

use std::fmt;
use std::sync::OnceLock;

use crate::layout::HASH_LEN;
use crate::IdError;

/// Salt used when nothing else is configured.
pub const DEFAULT_SALT: &str = "$@1†";

static PROCESS_SALT: OnceLock<Salt> = OnceLock::new();

/// A 32-bit checksum over arbitrary bytes.
pub trait Checksum32: Send + Sync {
    fn checksum32(&self, bytes: &[u8]) -> u32;
}

/// CRC-32 (IEEE), the default algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32;

impl Checksum32 for Crc32 {
    fn checksum32(&self, bytes: &[u8]) -> u32 {
        crc32fast::hash(bytes)
    }
}

/// Salt mixed into the checksum message.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Salt(String);

impl Salt {
    #[must_use]
    pub fn new(salt: impl Into<String>) -> Self {
        Self(salt.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Salt {
    fn default() -> Self {
        Self::new(DEFAULT_SALT)
    }
}

// Keep the salt out of logs.
impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(..)")
    }
}

impl From<&str> for Salt {
    fn from(salt: &str) -> Self {
        Self::new(salt)
    }
}

impl From<String> for Salt {
    fn from(salt: String) -> Self {
        Self(salt)
    }
}

/// Installs the process-wide salt used by [`Uuuid::generate`](crate::Uuuid::generate)
/// and the other codec-less constructors.
///
/// Succeeds at most once, and only before the process salt is first read.
pub fn install_salt(salt: impl Into<Salt>) -> Result<(), IdError> {
    PROCESS_SALT
        .set(salt.into())
        .map_err(|_| IdError::SaltAlreadyInstalled)
}

/// Returns the process-wide salt, fixing it to [`DEFAULT_SALT`] if none was
/// installed.
pub fn process_salt() -> &'static Salt {
    PROCESS_SALT.get_or_init(Salt::default)
}

/// Computes the 16-bit embedded checksum for a salt and algorithm.
#[derive(Debug, Clone, Default)]
pub struct Checksummer<C = Crc32> {
    salt: Salt,
    algorithm: C,
}

impl Checksummer {
    /// Creates a CRC-32 checksummer with the given salt.
    #[must_use]
    pub fn new(salt: impl Into<Salt>) -> Self {
        Self {
            salt: salt.into(),
            algorithm: Crc32,
        }
    }
}

impl<C: Checksum32> Checksummer<C> {
    /// Replaces the checksum algorithm.
    #[must_use]
    pub fn with_algorithm<D: Checksum32>(self, algorithm: D) -> Checksummer<D> {
        Checksummer {
            salt: self.salt,
            algorithm,
        }
    }

    #[must_use]
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Builds the salted message for the four checksummed fields.
    #[must_use]
    pub fn message(&self, timestamp: u32, type_id: u16, rand: u16, hash: &[u8; HASH_LEN]) -> Vec<u8> {
        let salt = self.salt.as_str();
        let mut message =
            format!("{timestamp}{salt}{type_id}{salt}{rand}{salt}").into_bytes();
        message.extend_from_slice(hash);
        message
    }

    /// Returns the checksum truncated to its low 16 bits.
    #[must_use]
    pub fn digest(&self, timestamp: u32, type_id: u16, rand: u16, hash: &[u8; HASH_LEN]) -> u16 {
        let full = self
            .algorithm
            .checksum32(&self.message(timestamp, type_id, rand, hash));
        (full % 0x1_0000) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: [u8; HASH_LEN] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(Crc32.checksum32(b"123456789"), 0xcbf4_3926);
    }

    #[test]
    fn test_message_layout() {
        let checksummer = Checksummer::new("|");
        let message = checksummer.message(1_700_000_000, 5, 48879, &HASH);
        let mut expected = b"1700000000|5|48879|".to_vec();
        expected.extend_from_slice(&HASH);
        assert_eq!(message, expected);
    }

    #[test]
    fn test_default_salt_digest() {
        let checksummer = Checksummer::new(DEFAULT_SALT);
        assert_eq!(checksummer.digest(1_700_000_000, 5, 0xbeef, &HASH), 0xfe86);
    }

    #[test]
    fn test_salt_changes_digest() {
        let checksummer = Checksummer::new("other");
        assert_eq!(checksummer.digest(1_700_000_000, 5, 0xbeef, &HASH), 0x89c6);
    }

    #[test]
    fn test_pluggable_algorithm() {
        struct Constant;
        impl Checksum32 for Constant {
            fn checksum32(&self, _bytes: &[u8]) -> u32 {
                0xdead_beef
            }
        }

        let checksummer = Checksummer::new(DEFAULT_SALT).with_algorithm(Constant);
        assert_eq!(checksummer.digest(0, 0, 0, &[0; HASH_LEN]), 0xbeef);
    }

    #[test]
    fn test_salt_debug_is_redacted() {
        assert_eq!(format!("{:?}", Salt::new("secret")), "Salt(..)");
    }
}
