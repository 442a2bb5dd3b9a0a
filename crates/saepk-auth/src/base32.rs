//! Base32 password codec.
//!
//! SAE-PK passwords use the RFC 4648 base32 alphabet in lowercase, grouped
//! in blocks of four characters separated by hyphens. Encoding works on
//! 40-bit blocks (five bytes, eight symbols) but stops emitting symbols once
//! the requested bit length is consumed, so trailing shift padding never
//! leaks into the output.

use saepk_types::SaePkError;

/// RFC 4648 base32 alphabet with lowercase characters.
pub(crate) const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Encode the first `len_bits` bits of `src` as a hyphenated password string.
pub fn encode(src: &[u8], len_bits: usize) -> Result<String, SaePkError> {
    let len = len_bits.div_ceil(8);
    if len == 0 || len >= usize::MAX / 8 {
        return Err(SaePkError::MalformedInput("empty or oversized bit length"));
    }
    if len > src.len() {
        return Err(SaePkError::MalformedInput("bit length exceeds input"));
    }

    let symbols = len * 8 / 5 + 1;
    let mut out = String::with_capacity(symbols + symbols / 4);
    let mut left = len_bits;

    let extra_pad = (5 - len % 5) % 5;
    let mut block: u64 = 0;
    for i in 0..len + extra_pad {
        let val = if i < len { src[i] } else { 0 };
        block = (block << 8) | u64::from(val);
        if i % 5 == 4 {
            for j in (0..8).rev() {
                push_symbol(&mut out, ((block >> (j * 5)) & 0x1f) as u8, &mut left);
            }
            block = 0;
        }
    }

    Ok(out)
}

/// Emit one symbol unless the bit budget is exhausted, inserting the hyphen
/// separator before every fifth output position.
fn push_symbol(out: &mut String, idx: u8, left: &mut usize) {
    if *left == 0 {
        return;
    }
    *left = left.saturating_sub(5);

    if out.len() % 5 == 4 {
        out.push('-');
    }
    out.push(BASE32_ALPHABET[idx as usize] as char);
}

/// Decode a password string back to bytes.
///
/// Characters outside the alphabet (hyphens in particular) are skipped.
/// `=` decodes as a zero symbol and marks padding: once a block containing
/// padding completes, only the whole bytes recoverable from it are kept.
pub fn decode(src: &str) -> Result<Vec<u8>, SaePkError> {
    let count = src
        .bytes()
        .filter(|&b| symbol_value(b).is_some())
        .count();
    if count == 0 {
        return Err(SaePkError::MalformedInput("no base32 symbols"));
    }
    let extra_pad = (8 - count % 8) % 8;

    let mut out = Vec::with_capacity((count + extra_pad) / 8 * 5);
    let mut block: u64 = 0;
    let mut in_block = 0;
    let mut pad = 0;

    let padded = src.bytes().chain(std::iter::repeat(b'=').take(extra_pad));
    for byte in padded {
        let Some(val) = symbol_value(byte) else {
            continue;
        };
        if byte == b'=' {
            pad += 1;
        }
        block = (block << 5) | u64::from(val);
        in_block += 1;
        if in_block == 8 {
            out.extend_from_slice(&[
                (block >> 32) as u8,
                (block >> 24) as u8,
                (block >> 16) as u8,
                (block >> 8) as u8,
                block as u8,
            ]);
            block = 0;
            in_block = 0;
            if pad > 0 {
                // Keep all available bits, zero padded to whole octets.
                out.truncate(out.len() - pad * 5 / 8);
                break;
            }
        }
    }

    Ok(out)
}

/// Map a byte to its 5-bit symbol value; `=` counts as a zero symbol.
fn symbol_value(byte: u8) -> Option<u8> {
    match byte {
        b'a'..=b'z' => Some(byte - b'a'),
        b'2'..=b'7' => Some(byte - b'2' + 26),
        b'=' => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero_block() {
        assert_eq!(encode(&[0u8; 5], 40).unwrap(), "aaaa-aaaa");
    }

    #[test]
    fn test_encode_truncates_at_bit_length() {
        // 0xff = 11111 111(00) -> '7' then 28 -> '4'
        assert_eq!(encode(&[0xff], 8).unwrap(), "74");
        assert_eq!(encode(&[0xff], 5).unwrap(), "7");
    }

    #[test]
    fn test_encode_separator_positions() {
        let out = encode(&[0u8; 10], 80).unwrap();
        assert_eq!(out, "aaaa-aaaa-aaaa-aaaa");
    }

    #[test]
    fn test_encode_rejects_zero_bits() {
        assert!(encode(&[1, 2, 3], 0).is_err());
    }

    #[test]
    fn test_encode_rejects_short_input() {
        assert!(encode(&[1], 16).is_err());
    }

    #[test]
    fn test_decode_ignores_separators() {
        assert_eq!(decode("aaaa-aaaa").unwrap(), decode("aaaaaaaa").unwrap());
    }

    #[test]
    fn test_decode_no_symbols() {
        assert!(decode("----").is_err());
        assert!(decode("").is_err());
        assert!(decode("!@#$ 019").is_err());
    }

    #[test]
    fn test_decode_known_vector() {
        // 'a'..'p' carry symbol values 0..15.
        let bytes = decode("abcd-efgh-ijkl-mnop").unwrap();
        assert_eq!(
            bytes,
            [0x00, 0x44, 0x32, 0x14, 0xc7, 0x42, 0x54, 0xb6, 0x35, 0xcf]
        );
    }

    #[test]
    fn test_decode_explicit_padding() {
        // One real symbol ('7' = 31) and seven '=' pads: the block keeps
        // only the whole bytes in front of the padding.
        let out = decode("7=======").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], 0xf8);
    }

    #[test]
    fn test_roundtrip_bit_prefix() {
        let data: Vec<u8> = (0u8..40).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
        for bits in 1..=data.len() * 8 {
            let text = encode(&data, bits).unwrap();
            let back = decode(&text).unwrap();
            let whole = bits / 8;
            assert_eq!(&back[..whole], &data[..whole], "bits={bits}");
            if bits % 8 != 0 {
                let mask = 0xffu8 << (8 - bits % 8);
                assert_eq!(back[whole] & mask, data[whole] & mask, "bits={bits}");
            }
        }
    }
}
