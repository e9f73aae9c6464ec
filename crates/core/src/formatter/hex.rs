//! Lowercase hex encoding, two characters per byte, no separator.

use crate::{CoreError, CoreResult};

/// Encodes `data` as lowercase hex.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    ::hex::encode(data)
}

/// Decodes a hex string, accepting either case.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] for a non-hex character or an odd number of digits.
/// A trailing half byte is rejected rather than dropped.
pub fn decode(data: &str) -> CoreResult<Vec<u8>> {
    ::hex::decode(data).map_err(|e| CoreError::InvalidInput(format!("invalid hex '{data}': {e}")))
}

/// Decodes exactly `N` bytes of hex into a fixed-size array.
pub fn decode_array<const N: usize>(data: &str) -> CoreResult<[u8; N]> {
    let mut out = [0u8; N];
    ::hex::decode_to_slice(data, &mut out)
        .map_err(|e| CoreError::InvalidInput(format!("invalid hex '{data}': {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_bytes() {
        assert_eq!(encode([0x00u8, 0x0f, 0xa5, 0xff]), "000fa5ff");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        assert_eq!(decode("000FA5FF").unwrap(), vec![0x00, 0x0f, 0xa5, 0xff]);
        assert_eq!(decode("000fa5ff").unwrap(), vec![0x00, 0x0f, 0xa5, 0xff]);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        let result = decode("abc");
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(decode("zz").is_err());
    }

    #[test]
    fn test_decode_array_checks_length() {
        let bytes: [u8; 2] = decode_array("beef").unwrap();
        assert_eq!(bytes, [0xbe, 0xef]);
        assert!(decode_array::<4>("beef").is_err());
    }

    proptest! {
        #[test]
        fn test_hex_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let encoded = encode(&bytes);
            prop_assert_eq!(encoded.len(), bytes.len() * 2);
            prop_assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }
}
