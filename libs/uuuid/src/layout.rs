//! Fixed-width field layout shared by the hex and binary forms.
//!
//! ```text
//! hex     tttttttt-yyyy-cccc-rrrr-hhhhhhhhhhhh
//! bytes   0..4     4..6 6..8 8..10 10..16
//! ```

use crate::IdError;

/// Length of the canonical unseparated hex form.
pub const HEX_LEN: usize = 32;

/// Length of the binary form.
pub const BYTE_LEN: usize = 16;

/// Length of the opaque hash fragment in bytes.
pub const HASH_LEN: usize = 6;

/// Separator used by the display form unless the caller picks another.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Hex widths of the five groups, in layout order.
const GROUP_WIDTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// The five logical fields of an identifier.
///
/// `Fields` carries no validity information; the checksum is whatever was
/// packed or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fields {
    pub timestamp: u32,
    pub type_id: u16,
    pub checksum: u16,
    pub rand: u16,
    pub hash: [u8; HASH_LEN],
}

impl Fields {
    /// Renders the canonical 32-character lowercase hex form.
    #[must_use]
    pub fn pack(&self) -> String {
        self.pack_with("")
    }

    /// Renders the display form with `sep` between the five groups.
    #[must_use]
    pub fn pack_with(&self, sep: &str) -> String {
        format!(
            "{:08x}{sep}{:04x}{sep}{:04x}{sep}{:04x}{sep}{}",
            self.timestamp,
            self.type_id,
            self.checksum,
            self.rand,
            hex::encode(self.hash),
        )
    }

    /// Decodes the canonical unseparated hex form.
    pub fn unpack(canonical: &str) -> Result<Self, IdError> {
        if canonical.len() != HEX_LEN {
            return Err(IdError::malformed(format!(
                "expected {HEX_LEN} hex characters, got {}",
                canonical.len()
            )));
        }
        if let Some(c) = canonical.chars().find(|c| !is_lower_hex(*c)) {
            return Err(IdError::malformed(format!(
                "unexpected character {c:?} in hex form"
            )));
        }

        // All ASCII from here on, so byte offsets are char boundaries.
        let mut hash = [0u8; HASH_LEN];
        hex::decode_to_slice(&canonical[20..32], &mut hash)
            .map_err(|e| IdError::malformed(format!("invalid hash group: {e}")))?;

        Ok(Self {
            timestamp: u32::from_str_radix(&canonical[0..8], 16)
                .map_err(group_error(&canonical[0..8]))?,
            type_id: u16::from_str_radix(&canonical[8..12], 16)
                .map_err(group_error(&canonical[8..12]))?,
            checksum: u16::from_str_radix(&canonical[12..16], 16)
                .map_err(group_error(&canonical[12..16]))?,
            rand: u16::from_str_radix(&canonical[16..20], 16)
                .map_err(group_error(&canonical[16..20]))?,
            hash,
        })
    }

    /// Decodes a possibly separated hex form.
    ///
    /// Separators are removed first; field offsets always refer to the
    /// canonical form.
    pub fn parse(text: &str, sep: &str) -> Result<Self, IdError> {
        Self::unpack(&strip_separators(text, sep)?)
    }

    /// Returns the big-endian binary form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; BYTE_LEN] {
        let mut out = [0u8; BYTE_LEN];
        out[0..4].copy_from_slice(&self.timestamp.to_be_bytes());
        out[4..6].copy_from_slice(&self.type_id.to_be_bytes());
        out[6..8].copy_from_slice(&self.checksum.to_be_bytes());
        out[8..10].copy_from_slice(&self.rand.to_be_bytes());
        out[10..16].copy_from_slice(&self.hash);
        out
    }

    /// Decodes the big-endian binary form.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; BYTE_LEN]) -> Self {
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&bytes[10..16]);
        Self {
            timestamp: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            type_id: u16::from_be_bytes([bytes[4], bytes[5]]),
            checksum: u16::from_be_bytes([bytes[6], bytes[7]]),
            rand: u16::from_be_bytes([bytes[8], bytes[9]]),
            hash,
        }
    }
}

/// Validates the grouped 8-4-4-4-12 shape for the literal `sep` and returns
/// the canonical unseparated form.
///
/// An empty separator means the input must already be canonical.
pub fn strip_separators(text: &str, sep: &str) -> Result<String, IdError> {
    if sep.is_empty() {
        return Ok(text.to_string());
    }

    let bytes = text.as_bytes();
    let mut canonical = String::with_capacity(HEX_LEN);
    let mut pos = 0;

    for (i, width) in GROUP_WIDTHS.iter().enumerate() {
        let end = pos + width;
        let group = bytes.get(pos..end).ok_or_else(|| {
            IdError::malformed(format!("group {} is shorter than {width} characters", i + 1))
        })?;
        if !group.iter().all(|b| is_lower_hex(char::from(*b))) {
            return Err(IdError::malformed(format!(
                "group {} is not {width} lowercase hex characters",
                i + 1
            )));
        }
        // The group is ASCII, so `pos..end` sits on char boundaries.
        canonical.push_str(&text[pos..end]);
        pos = end;

        if i + 1 < GROUP_WIDTHS.len() {
            if !text[pos..].starts_with(sep) {
                return Err(IdError::malformed(format!(
                    "expected separator {sep:?} after group {}",
                    i + 1
                )));
            }
            pos += sep.len();
        }
    }

    if pos != text.len() {
        return Err(IdError::malformed("trailing characters after last group"));
    }

    Ok(canonical)
}

fn is_lower_hex(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

fn group_error(group: &str) -> impl FnOnce(std::num::ParseIntError) -> IdError + '_ {
    move |e| IdError::malformed(format!("invalid hex group {group:?}: {e}"))
}
