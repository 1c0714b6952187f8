use crate::{HdbError, HdbResult};

/// A streaming byte-to-byte text transformation.
///
/// The conversion core applies the transcoder to every string-shaped value
/// that is bound to a character-typed parameter field. For HANA this is the
/// UTF-8 to CESU-8 transformation implemented by [`Cesu8Transcoder`];
/// alternative implementations can be plugged in for testing.
///
/// Input chunks must be complete UTF-8; the caller is responsible for not
/// splitting a character across chunks (see [`incomplete_utf8_tail_len`]).
pub trait Transcoder {
    /// Transforms a chunk of UTF-8 input into its transport encoding.
    ///
    /// # Errors
    ///
    /// `HdbError::Cesu8` if the input is not valid UTF-8.
    fn transcode(&mut self, utf8: &[u8]) -> HdbResult<Vec<u8>>;
}

/// [`Transcoder`] for servers that expect strings in CESU-8 encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cesu8Transcoder;

impl Transcoder for Cesu8Transcoder {
    fn transcode(&mut self, utf8: &[u8]) -> HdbResult<Vec<u8>> {
        let s = std::str::from_utf8(utf8).map_err(|_| HdbError::Cesu8)?;
        Ok(cesu8::to_cesu8(s).to_vec())
    }
}

// Used for decoding parameter names from the server's metadata reply.
pub(crate) fn string_from_cesu8(bytes: Vec<u8>) -> HdbResult<String> {
    match cesu8::from_cesu8(&bytes) {
        Ok(cow) => Ok(cow.to_string()),
        Err(_) => Err(HdbError::Cesu8),
    }
}

// Splits off an incomplete trailing UTF-8 character and converts the rest
// to CESU-8. The tail has to be carried over into the next chunk.
pub(crate) fn utf8_to_cesu8_and_utf8_tail(mut utf8: Vec<u8>) -> HdbResult<(Vec<u8>, Vec<u8>)> {
    let tail_len = incomplete_utf8_tail_len(&utf8)?;
    let tail = utf8.split_off(utf8.len() - tail_len);
    let s = std::str::from_utf8(&utf8).map_err(|_| HdbError::Cesu8)?;
    Ok((cesu8::to_cesu8(s).to_vec(), tail))
}

// Number of bytes at the end of the slice that belong to an incomplete
// UTF-8 character. The slice must start at a character boundary.
pub(crate) fn incomplete_utf8_tail_len(bytes: &[u8]) -> HdbResult<usize> {
    let len = bytes.len();
    for back in 1..=len.min(4) {
        let b = bytes[len - back];
        if (0x80..0xC0).contains(&b) {
            // continuation byte, keep scanning for the character's lead byte
            continue;
        }
        let char_len = utf8_char_len(b)?;
        return match char_len.cmp(&back) {
            std::cmp::Ordering::Greater => Ok(back),
            std::cmp::Ordering::Equal => Ok(0),
            std::cmp::Ordering::Less => Err(HdbError::Cesu8),
        };
    }
    if len == 0 {
        Ok(0)
    } else {
        Err(HdbError::Cesu8)
    }
}

//   1: 0000_0000 to 0111_1111 (00 to 7F)
//   2: 1100_0000 to 1101_1111 (C0 to DF)
//   3: 1110_0000 to 1110_1111 (E0 to EF)
//   4: 1111_0000 to 1111_0111 (F0 to F7)
// ill: 1111_1000 to 1111_1111 (F8 to FF)
fn utf8_char_len(lead: u8) -> HdbResult<usize> {
    match lead {
        0x00..=0x7F => Ok(1),
        0xC0..=0xDF => Ok(2),
        0xE0..=0xEF => Ok(3),
        0xF0..=0xF7 => Ok(4),
        _ => Err(HdbError::Cesu8),
    }
}

#[cfg(test)]
mod test {
    use super::{incomplete_utf8_tail_len, utf8_to_cesu8_and_utf8_tail, Cesu8Transcoder};
    use crate::Transcoder;

    #[test]
    fn test_tail_len() {
        assert_eq!(incomplete_utf8_tail_len(b"").unwrap(), 0);
        assert_eq!(incomplete_utf8_tail_len(b"abc").unwrap(), 0);

        let euro = "€".as_bytes(); // 3 bytes
        assert_eq!(incomplete_utf8_tail_len(euro).unwrap(), 0);
        assert_eq!(incomplete_utf8_tail_len(&euro[..2]).unwrap(), 2);
        assert_eq!(incomplete_utf8_tail_len(&euro[..1]).unwrap(), 1);

        let mut bytes = b"xy".to_vec();
        bytes.extend_from_slice(&"😀".as_bytes()[..3]); // 4-byte char, truncated
        assert_eq!(incomplete_utf8_tail_len(&bytes).unwrap(), 3);

        // a stray continuation byte after a complete character is invalid
        assert!(incomplete_utf8_tail_len(&[b'a', 0x80]).is_err());
    }

    #[test]
    fn test_split_and_convert() {
        let mut bytes = "aä".as_bytes().to_vec();
        let truncated_char = &"ö".as_bytes()[..1];
        bytes.extend_from_slice(truncated_char);

        let (cesu8, tail) = utf8_to_cesu8_and_utf8_tail(bytes).unwrap();
        assert_eq!(cesu8, "aä".as_bytes());
        assert_eq!(tail, truncated_char);
    }

    #[test]
    fn test_supplementary_chars_become_surrogate_pairs() {
        let encoded = Cesu8Transcoder.transcode("a😀".as_bytes()).unwrap();
        // 'a' stays a single byte, the emoji becomes a 6-byte surrogate pair
        assert_eq!(encoded.len(), 7);
        assert_eq!(encoded[0], b'a');
        assert_eq!(encoded[1], 0xED);
    }
}
