//! # uuuid
//!
//! Self-describing 128-bit identifiers with an embedded type tag and checksum.
//!
//! ## Layout
//!
//! | Field     | Bits | Meaning                                        |
//! |-----------|------|------------------------------------------------|
//! | timestamp | 32   | Seconds since the Unix epoch at creation       |
//! | type      | 16   | Caller-chosen tag, reduced modulo 65536        |
//! | checksum  | 16   | Salted checksum of the other four fields       |
//! | rand      | 16   | Random disambiguator                           |
//! | hash      | 48   | Caller-supplied bytes or random                |
//!
//! ## Forms
//!
//! - Hex: `6553f100-0005-fe86-beef-112233445566` (separator configurable,
//!   or none for the canonical 32-character form)
//! - Compact: `ZVPxAAAF_oa-7xEiM0RVZg` (URL-safe base64, unpadded)
//! - Binary: 16 bytes, big-endian
//!
//! A checksum mismatch does not fail parsing. Check
//! [`Uuuid::is_valid`] before trusting decoded input.
//!
//! ```
//! let id = uuuid::Uuuid::generate_with_hash(5, &[0x11, 0x22, 0x33]);
//! let parsed: uuuid::Uuuid = id.render_compact().parse()?;
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.type_id(), 5);
//! # Ok::<(), uuuid::IdError>(())
//! ```

pub mod checksum;
pub mod compact;
mod error;
mod identifier;
pub mod layout;
mod slot;
pub mod source;

pub use checksum::{install_salt, Checksum32, Crc32, Salt, DEFAULT_SALT};
pub use error::IdError;
pub use identifier::{Codec, Uuuid};
pub use layout::{Fields, DEFAULT_SEPARATOR};
pub use slot::Slot;
pub use source::{Clock, FixedClock, RandomSource, SeededRandom, SystemClock, ThreadRandom};
