//! A holder that may or may not contain an identifier yet.
//!
//! `Uuuid` always carries fields. `Slot` is for callers that declare a
//! location first and load it later; reading it before a successful load
//! fails with [`IdError::UnboundState`].

use crate::checksum::Checksum32;
use crate::layout::{BYTE_LEN, HASH_LEN};
use crate::source::{Clock, RandomSource};
use crate::{Codec, IdError, Uuuid};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot(Option<Uuuid>);

impl Slot {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    /// Stores a freshly constructed identifier.
    pub fn generate<K, R, C>(
        &mut self,
        codec: &Codec<K, R, C>,
        type_id: u32,
        hash: Option<&[u8]>,
    ) -> &Uuuid
    where
        K: Clock,
        R: RandomSource,
        C: Checksum32,
    {
        self.0.insert(codec.construct(type_id, hash))
    }

    /// Loads the hex form. On failure the slot is left empty.
    pub fn load_hex<K, R, C>(
        &mut self,
        codec: &Codec<K, R, C>,
        text: &str,
        sep: &str,
    ) -> Result<&Uuuid, IdError>
    where
        K: Clock,
        R: RandomSource,
        C: Checksum32,
    {
        self.load(codec.parse_hex(text, sep))
    }

    /// Loads the compact form. On failure the slot is left empty.
    pub fn load_compact<K, R, C>(
        &mut self,
        codec: &Codec<K, R, C>,
        text: &str,
    ) -> Result<&Uuuid, IdError>
    where
        K: Clock,
        R: RandomSource,
        C: Checksum32,
    {
        self.load(codec.parse_compact(text))
    }

    fn load(&mut self, parsed: Result<Uuuid, IdError>) -> Result<&Uuuid, IdError> {
        match parsed {
            Ok(id) => Ok(&*self.0.insert(id)),
            Err(e) => {
                self.0 = None;
                Err(e)
            }
        }
    }

    /// Returns the held identifier.
    pub fn get(&self) -> Result<&Uuuid, IdError> {
        self.0.as_ref().ok_or(IdError::UnboundState)
    }

    /// Empties the slot, returning what it held.
    pub fn take(&mut self) -> Option<Uuuid> {
        self.0.take()
    }

    /// False while unbound.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_some_and(|id| id.is_valid())
    }

    pub fn timestamp(&self) -> Result<u32, IdError> {
        self.get().map(Uuuid::timestamp)
    }

    pub fn type_id(&self) -> Result<u16, IdError> {
        self.get().map(Uuuid::type_id)
    }

    pub fn checksum(&self) -> Result<u16, IdError> {
        self.get().map(Uuuid::checksum)
    }

    pub fn rand(&self) -> Result<u16, IdError> {
        self.get().map(Uuuid::rand)
    }

    pub fn hash(&self) -> Result<[u8; HASH_LEN], IdError> {
        self.get().map(Uuuid::hash)
    }

    pub fn render_hex(&self, sep: &str) -> Result<String, IdError> {
        self.get().map(|id| id.render_hex(sep))
    }

    pub fn render_compact(&self) -> Result<String, IdError> {
        self.get().map(Uuuid::render_compact)
    }

    pub fn to_bytes(&self) -> Result<[u8; BYTE_LEN], IdError> {
        self.get().map(Uuuid::to_bytes)
    }
}

impl From<Uuuid> for Slot {
    fn from(id: Uuuid) -> Self {
        Self(Some(id))
    }
}
