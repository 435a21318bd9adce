use proptest::prelude::*;

use yeast::encoding::{
    decode, decode_utf16be, decode_utf16le, decode_utf32be, decode_utf32le, decode_utf8,
};
use yeast::Encoding;

proptest! {
    #[test]
    fn utf8_agrees_with_the_standard_library(text in ".*") {
        let mut rest = text.as_bytes();
        for expected in text.chars() {
            let (point, consumed) = decode_utf8(rest);
            prop_assert_eq!(point, Some(expected as u32));
            prop_assert_eq!(consumed, expected.len_utf8());
            rest = &rest[consumed..];
        }
        prop_assert!(rest.is_empty());
    }

    #[test]
    fn utf16_round_trips(ch in any::<char>()) {
        let mut units = [0u16; 2];
        let encoded = ch.encode_utf16(&mut units);
        let mut le = Vec::new();
        let mut be = Vec::new();
        for unit in encoded.iter() {
            le.extend_from_slice(&unit.to_le_bytes());
            be.extend_from_slice(&unit.to_be_bytes());
        }
        prop_assert_eq!(decode_utf16le(&le), (Some(ch as u32), le.len()));
        prop_assert_eq!(decode_utf16be(&be), (Some(ch as u32), be.len()));
    }

    #[test]
    fn utf32_round_trips(ch in any::<char>()) {
        let value = ch as u32;
        prop_assert_eq!(decode_utf32le(&value.to_le_bytes()), (Some(value), 4));
        prop_assert_eq!(decode_utf32be(&value.to_be_bytes()), (Some(value), 4));
    }

    /// Arbitrary byte soup never wedges a decoder: every call either
    /// consumes something or signals that the remaining bytes cannot even
    /// hold one code unit.
    #[test]
    fn decoders_always_make_progress(
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
        which in 0usize..5,
    ) {
        let encoding = [
            Encoding::Utf8,
            Encoding::Utf16Le,
            Encoding::Utf16Be,
            Encoding::Utf32Le,
            Encoding::Utf32Be,
        ][which];
        let mut position = 0;
        let mut rounds = 0;
        while position < bytes.len() {
            let (_, consumed) = decode(encoding, &bytes[position..]);
            prop_assert!(consumed <= bytes.len() - position);
            if consumed == 0 {
                // Only a trailing fragment shorter than one code unit stalls.
                prop_assert!(bytes.len() - position < encoding.max_char_bytes());
                break;
            }
            position += consumed;
            rounds += 1;
            prop_assert!(rounds <= bytes.len());
        }
    }

    #[test]
    fn lone_surrogates_are_rejected(unit in 0xD800u32..0xE000) {
        let le = [(unit & 0xFF) as u8, (unit >> 8) as u8];
        let (point, consumed) = decode_utf16le(&le);
        prop_assert_eq!(point, None);
        prop_assert!(consumed > 0);
    }
}
