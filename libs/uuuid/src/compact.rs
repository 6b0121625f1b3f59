//! Compact text form: URL-safe base64 without padding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::layout::BYTE_LEN;
use crate::IdError;

/// Length of the compact form of a 16-byte payload.
pub const COMPACT_LEN: usize = 22;

/// Emits no padding and accepts input with or without it.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes the binary form as 22 URL-safe characters.
#[must_use]
pub fn to_compact(bytes: &[u8; BYTE_LEN]) -> String {
    ENGINE.encode(bytes)
}

/// Decodes the compact form back into the binary form.
pub fn from_compact(text: &str) -> Result<[u8; BYTE_LEN], IdError> {
    let decoded = ENGINE
        .decode(text)
        .map_err(|e| IdError::malformed(format!("invalid compact form: {e}")))?;

    <[u8; BYTE_LEN]>::try_from(decoded.as_slice()).map_err(|_| {
        IdError::malformed(format!(
            "compact form decodes to {} bytes, expected {BYTE_LEN}",
            decoded.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const BYTES: [u8; BYTE_LEN] = [
        0x65, 0x53, 0xf1, 0x00, 0x00, 0x05, 0xfe, 0x86, 0xbe, 0xef, 0x11, 0x22, 0x33, 0x44, 0x55,
        0x66,
    ];

    #[test]
    fn test_to_compact_uses_url_safe_alphabet() {
        let compact = to_compact(&BYTES);
        assert_eq!(compact, "ZVPxAAAF_oa-7xEiM0RVZg");
        assert_eq!(compact.len(), COMPACT_LEN);
    }

    #[test]
    fn test_from_compact_roundtrip() {
        assert_eq!(from_compact("ZVPxAAAF_oa-7xEiM0RVZg").unwrap(), BYTES);
    }

    #[test]
    fn test_from_compact_accepts_padding() {
        assert_eq!(from_compact("ZVPxAAAF_oa-7xEiM0RVZg==").unwrap(), BYTES);
    }

    #[rstest]
    #[case::empty("")]
    #[case::standard_alphabet("ZVPxAAAF/oa+7xEiM0RVZg")]
    #[case::too_short("ZVPxAAAF_oa-7xEiM0RVZ")]
    #[case::too_long("ZVPxAAAF_oa-7xEiM0RVZgAA")]
    #[case::whitespace("ZVPxAAAF_oa-7xEiM0RV g")]
    #[case::nonzero_trailing_bits("ZVPxAAAF_oa-7xEiM0RVZh")]
    fn test_from_compact_rejects(#[case] input: &str) {
        let err = from_compact(input).unwrap_err();
        assert!(err.is_malformed(), "{input:?} gave {err:?}");
    }
}
