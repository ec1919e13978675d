//! Minimal Base64 transport for tapes shipped as text resources.
//!
//! The standard alphabet (`A-Z a-z 0-9 + /`) with optional trailing `=`
//! padding. [`decode_base64`] is deliberately not a validating decoder:
//! input is trusted build output, so sub-128 bytes outside the alphabet
//! decode through whatever the table holds for them (zero) rather than
//! erroring. Only bytes outside the 7-bit range are rejected: those can
//! never appear in build-generated transport text and always indicate
//! the wrong resource was loaded.

use crate::error::TapeError;

const ENCODE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Maps each 7-bit byte to its 6-bit alphabet value.
///
/// Non-alphabet slots, including `'='`, hold 0 so padded groups decode
/// cleanly and stray punctuation is tolerated instead of validated.
const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 26 {
        table[b'A' as usize + i] = i as u8;
        table[b'a' as usize + i] = (i + 26) as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = (i + 52) as u8;
        i += 1;
    }
    table[b'+' as usize] = 62;
    table[b'/' as usize] = 63;
    table
}

/// Decode Base64 text into raw bytes.
///
/// Output length is inferred from the input length and trailing padding.
/// Unpadded input is accepted; a trailing fragment of fewer than two
/// characters contributes no output bytes. Empty input decodes to empty
/// output.
///
/// # Errors
///
/// [`TapeError::InvalidEncoding`] if any input byte is ≥ 128.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, TapeError> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    let mut padding = 0;
    if len > 0 && bytes[len - 1] == b'=' {
        padding += 1;
    }
    if len > 1 && bytes[len - 2] == b'=' {
        padding += 1;
    }

    let out_len = (len * 3 / 4).saturating_sub(padding);
    let mut out = Vec::with_capacity(out_len);

    let lookup = |position: usize| -> Result<u32, TapeError> {
        let byte = bytes[position];
        if byte >= 0x80 {
            return Err(TapeError::InvalidEncoding { position, byte });
        }
        Ok(u32::from(DECODE_TABLE[byte as usize]))
    };

    let mut index = 0;
    while index < len {
        let a = lookup(index)?;
        index += 1;
        let mut group = [0u32; 3];
        for slot in &mut group {
            if index < len {
                *slot = lookup(index)?;
                index += 1;
            }
        }
        let [b, c, d] = group;

        let triple = (a << 18) | (b << 12) | (c << 6) | d;

        if out.len() < out_len {
            out.push((triple >> 16) as u8);
        }
        if out.len() < out_len {
            out.push((triple >> 8) as u8);
        }
        if out.len() < out_len {
            out.push(triple as u8);
        }
    }

    Ok(out)
}

/// Encode raw bytes as padded Base64 text.
///
/// The build-side counterpart of [`decode_base64`], used when the tape is
/// embedded in a text-only resource format.
pub fn encode_base64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for group in bytes.chunks(3) {
        let b1 = group.get(1).copied();
        let b2 = group.get(2).copied();
        let triple = (u32::from(group[0]) << 16)
            | (u32::from(b1.unwrap_or(0)) << 8)
            | u32::from(b2.unwrap_or(0));

        out.push(ENCODE_ALPHABET[(triple >> 18) as usize & 0x3F] as char);
        out.push(ENCODE_ALPHABET[(triple >> 12) as usize & 0x3F] as char);
        out.push(match b1 {
            Some(_) => ENCODE_ALPHABET[(triple >> 6) as usize & 0x3F] as char,
            None => '=',
        });
        out.push(match b2 {
            Some(_) => ENCODE_ALPHABET[(triple & 0x3F) as usize] as char,
            None => '=',
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // RFC 4648 §10 test vectors.
    const VECTORS: &[(&str, &[u8])] = &[
        ("", b""),
        ("Zg==", b"f"),
        ("Zm8=", b"fo"),
        ("Zm9v", b"foo"),
        ("Zm9vYg==", b"foob"),
        ("Zm9vYmE=", b"fooba"),
        ("Zm9vYmFy", b"foobar"),
    ];

    #[test]
    fn decodes_reference_vectors() {
        for (text, expected) in VECTORS {
            assert_eq!(
                decode_base64(text).unwrap().as_slice(),
                *expected,
                "decoding {text:?}"
            );
        }
    }

    #[test]
    fn encodes_reference_vectors() {
        for (text, bytes) in VECTORS {
            assert_eq!(encode_base64(bytes), *text, "encoding {bytes:?}");
        }
    }

    #[test]
    fn decodes_unpadded_input() {
        assert_eq!(decode_base64("Zg").unwrap(), b"f");
        assert_eq!(decode_base64("Zm8").unwrap(), b"fo");
        assert_eq!(decode_base64("Zm9vYg").unwrap(), b"foob");
        assert_eq!(decode_base64("Zm9vYmE").unwrap(), b"fooba");
    }

    #[test]
    fn rejects_bytes_outside_seven_bits() {
        // 'é' encodes as 0xC3 0xA9; the first offending byte is reported.
        let err = decode_base64("Zm9vé").unwrap_err();
        match err {
            TapeError::InvalidEncoding { position, byte } => {
                assert_eq!(position, 4);
                assert_eq!(byte, 0xC3);
            }
            other => panic!("expected InvalidEncoding, got {other:?}"),
        }
    }

    #[test]
    fn tolerates_sub_128_garbage() {
        // '#' maps to table slot 0, same as 'A'.
        assert_eq!(decode_base64("AB#A").unwrap(), vec![0x00, 0x10, 0x00]);
        assert_eq!(decode_base64("AB#A").unwrap(), decode_base64("ABAA").unwrap());
    }

    #[test]
    fn pure_padding_decodes_to_nothing() {
        assert_eq!(decode_base64("==").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_base64("====").unwrap(), vec![0x00]);
    }

    #[test]
    fn trailing_single_character_contributes_nothing() {
        assert_eq!(decode_base64("Zm9vA").unwrap(), b"foo");
        assert_eq!(decode_base64("A").unwrap(), Vec::<u8>::new());
    }

    proptest! {
        #[test]
        fn roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let text = encode_base64(&bytes);
            prop_assert_eq!(decode_base64(&text).unwrap(), bytes);
        }

        #[test]
        fn encoded_form_is_padded_alphabet(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let text = encode_base64(&bytes);
            prop_assert_eq!(text.len() % 4, 0);
            prop_assert!(text
                .bytes()
                .all(|b| b == b'=' || DECODE_TABLE[b as usize] != 0 || b == b'A'));
        }
    }
}
