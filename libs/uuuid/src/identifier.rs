//! The identifier value and the codec that builds and decodes it.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::checksum::{process_salt, Checksum32, Checksummer, Crc32, Salt};
use crate::compact::{from_compact, to_compact, COMPACT_LEN};
use crate::layout::{Fields, BYTE_LEN, DEFAULT_SEPARATOR, HASH_LEN, HEX_LEN};
use crate::source::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::IdError;

/// A decoded or freshly constructed identifier.
///
/// Fields are fixed at construction. [`is_valid`](Self::is_valid) is computed
/// once: always true for constructed identifiers, and for parsed ones true
/// iff the embedded checksum matches the other four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuuid {
    fields: Fields,
    valid: bool,
}

impl Uuuid {
    /// Creates an identifier with a random hash fragment, using the process
    /// salt.
    #[must_use]
    pub fn generate(type_id: u32) -> Self {
        process_codec().construct(type_id, None)
    }

    /// Creates an identifier whose hash fragment is the first six bytes of
    /// `hash`, zero-padded when shorter.
    #[must_use]
    pub fn generate_with_hash(type_id: u32, hash: &[u8]) -> Self {
        process_codec().construct(type_id, Some(hash))
    }

    /// Parses the hex form with `sep` between groups. An empty `sep` means
    /// the canonical unseparated form.
    pub fn parse_hex(text: &str, sep: &str) -> Result<Self, IdError> {
        process_codec().parse_hex(text, sep)
    }

    /// Parses the 22-character compact form.
    pub fn parse_compact(text: &str) -> Result<Self, IdError> {
        process_codec().parse_compact(text)
    }

    /// Decodes the 16-byte binary form.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; BYTE_LEN]) -> Self {
        process_codec().decode_bytes(bytes)
    }

    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        self.fields.timestamp
    }

    #[must_use]
    pub const fn type_id(&self) -> u16 {
        self.fields.type_id
    }

    #[must_use]
    pub const fn checksum(&self) -> u16 {
        self.fields.checksum
    }

    #[must_use]
    pub const fn rand(&self) -> u16 {
        self.fields.rand
    }

    #[must_use]
    pub const fn hash(&self) -> [u8; HASH_LEN] {
        self.fields.hash
    }

    #[must_use]
    pub const fn fields(&self) -> Fields {
        self.fields
    }

    /// Whether the embedded checksum matched when this value was built.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The embedded timestamp as a UTC instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(i64::from(self.fields.timestamp), 0).unwrap_or_default()
    }

    /// Renders the hex form with `sep` between the 8-4-4-4-12 groups.
    #[must_use]
    pub fn render_hex(&self, sep: &str) -> String {
        self.fields.pack_with(sep)
    }

    /// Renders the hex form with the default `-` separator.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.render_hex(DEFAULT_SEPARATOR)
    }

    /// Renders the canonical 32-character form.
    #[must_use]
    pub fn to_canonical(&self) -> String {
        self.fields.pack()
    }

    /// Renders the compact URL-safe form.
    #[must_use]
    pub fn render_compact(&self) -> String {
        to_compact(&self.to_bytes())
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; BYTE_LEN] {
        self.fields.to_bytes()
    }
}

impl fmt::Display for Uuuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Accepts the compact form, the canonical form, or the `-` separated form.
impl FromStr for Uuuid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            COMPACT_LEN => Self::parse_compact(s),
            HEX_LEN => Self::parse_hex(s, ""),
            _ => Self::parse_hex(s, DEFAULT_SEPARATOR),
        }
    }
}

impl serde::Serialize for Uuuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Uuuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds and decodes identifiers for one salt, clock, random source and
/// checksum algorithm.
#[derive(Debug)]
pub struct Codec<K = SystemClock, R = ThreadRandom, C = Crc32> {
    checksummer: Checksummer<C>,
    clock: K,
    random: R,
}

impl Codec {
    /// A codec on the system clock and thread RNG, checksummed with CRC-32.
    #[must_use]
    pub fn new(salt: impl Into<Salt>) -> Self {
        Self {
            checksummer: Checksummer::new(salt),
            clock: SystemClock,
            random: ThreadRandom,
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Salt::default())
    }
}

impl<K, R, C> Codec<K, R, C>
where
    K: Clock,
    R: RandomSource,
    C: Checksum32,
{
    #[must_use]
    pub fn with_clock<K2: Clock>(self, clock: K2) -> Codec<K2, R, C> {
        Codec {
            checksummer: self.checksummer,
            clock,
            random: self.random,
        }
    }

    #[must_use]
    pub fn with_random<R2: RandomSource>(self, random: R2) -> Codec<K, R2, C> {
        Codec {
            checksummer: self.checksummer,
            clock: self.clock,
            random,
        }
    }

    #[must_use]
    pub fn with_checksum<C2: Checksum32>(self, algorithm: C2) -> Codec<K, R, C2> {
        Codec {
            checksummer: self.checksummer.with_algorithm(algorithm),
            clock: self.clock,
            random: self.random,
        }
    }

    #[must_use]
    pub fn salt(&self) -> &Salt {
        self.checksummer.salt()
    }

    /// Creates a new identifier.
    ///
    /// `type_id` is reduced modulo 65536. A caller hash is truncated or
    /// zero-padded to six bytes; without one the hash is drawn at random.
    #[must_use]
    pub fn construct(&self, type_id: u32, hash: Option<&[u8]>) -> Uuuid {
        let timestamp = self.clock.now_secs();
        let type_id = (type_id % 0x1_0000) as u16;
        let rand = self.random.next_u16();

        let mut fragment = [0u8; HASH_LEN];
        match hash {
            Some(bytes) => {
                let n = bytes.len().min(HASH_LEN);
                fragment[..n].copy_from_slice(&bytes[..n]);
            }
            None => self.random.fill_bytes(&mut fragment),
        }

        let checksum = self.checksummer.digest(timestamp, type_id, rand, &fragment);
        trace!(timestamp, type_id, "constructed identifier");

        Uuuid {
            fields: Fields {
                timestamp,
                type_id,
                checksum,
                rand,
                hash: fragment,
            },
            valid: true,
        }
    }

    /// Parses the hex form. A checksum mismatch yields an invalid identifier,
    /// not an error.
    pub fn parse_hex(&self, text: &str, sep: &str) -> Result<Uuuid, IdError> {
        Ok(self.validate(Fields::parse(text, sep)?))
    }

    /// Parses the compact form.
    pub fn parse_compact(&self, text: &str) -> Result<Uuuid, IdError> {
        Ok(self.decode_bytes(&from_compact(text)?))
    }

    /// Decodes the binary form.
    #[must_use]
    pub fn decode_bytes(&self, bytes: &[u8; BYTE_LEN]) -> Uuuid {
        self.validate(Fields::from_bytes(bytes))
    }

    /// Recomputes the checksum of `id` under this codec's salt.
    #[must_use]
    pub fn verify(&self, id: &Uuuid) -> bool {
        self.expected_checksum(&id.fields) == id.fields.checksum
    }

    fn expected_checksum(&self, fields: &Fields) -> u16 {
        self.checksummer
            .digest(fields.timestamp, fields.type_id, fields.rand, &fields.hash)
    }

    fn validate(&self, fields: Fields) -> Uuuid {
        let expected = self.expected_checksum(&fields);
        let valid = expected == fields.checksum;
        if !valid {
            debug!(
                embedded = fields.checksum,
                expected, "identifier checksum mismatch"
            );
        }
        Uuuid { fields, valid }
    }
}

fn process_codec() -> &'static Codec {
    static CODEC: OnceLock<Codec> = OnceLock::new();
    CODEC.get_or_init(|| Codec::new(process_salt().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::DEFAULT_SALT;
    use crate::source::{FixedClock, SeededRandom};

    const HASH: [u8; HASH_LEN] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

    fn fixed_codec() -> Codec<FixedClock, SeededRandom> {
        Codec::new(DEFAULT_SALT)
            .with_clock(FixedClock(1_700_000_000))
            .with_random(SeededRandom::new(42))
    }

    #[test]
    fn test_construct_scenario() {
        let id = fixed_codec().construct(5, Some(&HASH[..]));
        let hex = id.to_canonical();

        assert!(hex.starts_with("6553f1000005"));
        assert!(hex.ends_with("112233445566"));
        assert_eq!(&hex[12..16], format!("{:04x}", id.checksum()));
        assert_eq!(&hex[16..20], format!("{:04x}", id.rand()));
        assert!(id.is_valid());

        let parsed = Uuuid::parse_hex(&hex, "").unwrap();
        assert_eq!(parsed.type_id(), 5);
        assert_eq!(parsed.hash(), HASH);
        assert!(parsed.is_valid());
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_known_identifier_is_valid() {
        let id = Uuuid::parse_hex("6553f100-0005-fe86-beef-112233445566", "-").unwrap();
        assert!(id.is_valid());
        assert_eq!(id.timestamp(), 1_700_000_000);
        assert_eq!(id.rand(), 0xbeef);
        assert_eq!(id.checksum(), 0xfe86);
    }

    #[test]
    fn test_type_id_reduced_modulo() {
        let id = fixed_codec().construct(70_000, None);
        assert_eq!(id.type_id(), 4464);
        assert!(fixed_codec().verify(&id));
    }

    #[test]
    fn test_short_hash_is_zero_padded() {
        let id = fixed_codec().construct(1, Some(&[0xab, 0xcd][..]));
        assert_eq!(id.hash(), [0xab, 0xcd, 0, 0, 0, 0]);
        assert!(id.to_canonical().ends_with("abcd00000000"));
    }

    #[test]
    fn test_long_hash_is_truncated() {
        let id = fixed_codec().construct(1, Some(&[1, 2, 3, 4, 5, 6, 7, 8][..]));
        assert_eq!(id.hash(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_random_hash_drawn_when_absent() {
        let a = Codec::default().construct(1, None);
        let b = Codec::default().construct(1, None);
        // 64 random bits between rand and hash; equal only by astronomic chance.
        assert_ne!((a.rand(), a.hash()), (b.rand(), b.hash()));
    }

    #[test]
    fn test_checksum_mismatch_is_not_an_error() {
        let id = Uuuid::parse_hex("6553f100-0005-0000-beef-112233445566", "-").unwrap();
        assert!(!id.is_valid());
        assert_eq!(id.type_id(), 5);
    }

    #[test]
    fn test_other_salt_rejects_checksum() {
        // fe86 under the default salt, 89c6 under "other".
        let other = Codec::new("other");
        let id = other
            .parse_hex("6553f100-0005-fe86-beef-112233445566", "-")
            .unwrap();
        assert!(!id.is_valid());
        assert!(other
            .parse_hex("6553f100-0005-89c6-beef-112233445566", "-")
            .unwrap()
            .is_valid());
    }

    #[test]
    fn test_compact_roundtrip() {
        let id = fixed_codec().construct(5, Some(&HASH[..]));
        let compact = id.render_compact();
        assert_eq!(compact.len(), COMPACT_LEN);
        assert_eq!(Uuuid::parse_compact(&compact).unwrap(), id);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let id = fixed_codec().construct(9, None);
        assert_eq!(Uuuid::from_bytes(&id.to_bytes()), id);
    }

    #[test]
    fn test_from_str_detects_form() {
        let id = fixed_codec().construct(5, Some(&HASH[..]));
        assert_eq!(id.render_compact().parse::<Uuuid>().unwrap(), id);
        assert_eq!(id.to_canonical().parse::<Uuuid>().unwrap(), id);
        assert_eq!(id.to_hex().parse::<Uuuid>().unwrap(), id);
        assert!("not-an-id".parse::<Uuuid>().unwrap_err().is_malformed());
    }

    #[test]
    fn test_display_uses_default_separator() {
        let id = Uuuid::parse_hex("6553f1000005fe86beef112233445566", "").unwrap();
        assert_eq!(id.to_string(), "6553f100-0005-fe86-beef-112233445566");
    }

    #[test]
    fn test_created_at() {
        let id = fixed_codec().construct(5, None);
        assert_eq!(id.created_at().to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_json_roundtrip() {
        let id = fixed_codec().construct(5, Some(&HASH[..]));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let parsed: Uuuid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_json_rejects_malformed() {
        assert!(serde_json::from_str::<Uuuid>("\"6553f100\"").is_err());
    }
}
