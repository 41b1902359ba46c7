use crate::constants::{CHARSET_MAP, DEFAULT_CHARSET};
use encoding::all::{ISO_8859_2, ISO_8859_5, UTF_8, WINDOWS_1254};
use encoding::types::{DecoderTrap, Encoding, EncodingRef};
use strum_macros::Display;
use tracing::debug;

/// Character sets Brother printers use for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Charset {
    #[strum(to_string = "latin2")]
    Latin2,
    #[strum(to_string = "cyrillic")]
    Cyrillic,
    /// ISO-8859-9. Decoded as Windows-1254, which agrees on every printable byte.
    #[strum(to_string = "latin5")]
    Latin5,
    #[strum(to_string = "utf-8")]
    Utf8,
    /// HP Roman-8, the printers' default.
    #[strum(to_string = "roman8")]
    Roman8,
}

impl Charset {
    /// Resolve the IANA MIBenum a printer reports, falling back to Roman-8.
    pub fn from_mib_enum(value: Option<u64>) -> Self {
        value
            .and_then(|value| {
                CHARSET_MAP
                    .iter()
                    .find_map(|&(mib, charset)| (u64::from(mib) == value).then_some(charset))
            })
            .unwrap_or(DEFAULT_CHARSET)
    }

    fn codec(self) -> Option<EncodingRef> {
        match self {
            Charset::Latin2 => Some(ISO_8859_2 as EncodingRef),
            Charset::Cyrillic => Some(ISO_8859_5 as EncodingRef),
            Charset::Latin5 => Some(WINDOWS_1254 as EncodingRef),
            Charset::Utf8 => Some(UTF_8 as EncodingRef),
            Charset::Roman8 => None,
        }
    }

    /// Strict decode; `None` if any byte is invalid in this character set.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self.codec() {
            Some(codec) => codec.decode(bytes, DecoderTrap::Strict).ok(),
            None => decode_roman8(bytes),
        }
    }
}

/// HP Roman-8, 0xa0..=0xfe. 0xff is unassigned.
#[rustfmt::skip]
const ROMAN8_HIGH: [char; 95] = [
    '\u{00a0}', 'À', 'Â', 'È', 'Ê', 'Ë', 'Î', 'Ï', '´', 'ˋ', 'ˆ', '¨', '˜', 'Ù', 'Û', '₤',
    '¯', 'Ý', 'ý', '°', 'Ç', 'ç', 'Ñ', 'ñ', '¡', '¿', '¤', '£', '¥', '§', 'ƒ', '¢',
    'â', 'ê', 'ô', 'û', 'á', 'é', 'ó', 'ú', 'à', 'è', 'ò', 'ù', 'ä', 'ë', 'ö', 'ü',
    'Å', 'î', 'Ø', 'Æ', 'å', 'í', 'ø', 'æ', 'Ä', 'ì', 'Ö', 'Ü', 'É', 'ï', 'ß', 'Ô',
    'Á', 'Ã', 'ã', 'Ð', 'ð', 'Í', 'Ì', 'Ó', 'Ò', 'Õ', 'õ', 'Š', 'š', 'Ú', 'Ÿ', 'ÿ',
    'Þ', 'þ', '·', 'µ', '¶', '¾', '—', '¼', '½', 'ª', 'º', '«', '■', '»', '±',
];

fn decode_roman8(bytes: &[u8]) -> Option<String> {
    bytes
        .iter()
        .map(|&byte| match byte {
            0x00..=0x9f => Some(char::from(byte)),
            0xa0..=0xfe => Some(ROMAN8_HIGH[usize::from(byte - 0xa0)]),
            0xff => None,
        })
        .collect()
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn cleanse_status(status: &str) -> String {
    status.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn the raw status bytes into a display string.
///
/// Returns `None` when the bytes are not valid in `charset`; the caller treats
/// that as "no status this cycle".
pub fn decode_status(raw: &[u8], charset: Charset) -> Option<String> {
    match charset.decode(raw) {
        Some(text) => Some(cleanse_status(&text)),
        None => {
            debug!(%charset, raw = %hex::encode(raw), "Unable to decode status");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_status() {
        let cases: &[(&[u8], Charset, &str)] = &[
            (b"TRYB U\xa6PIENIA", Charset::Latin2, "TRYB UŚPIENIA"),
            (b"PROSZ\xca CZEKA\xc6", Charset::Latin2, "PROSZĘ CZEKAĆ"),
            (b"MA\xa3O TONERU (Y)", Charset::Latin2, "MAŁO TONERU (Y)"),
            (b"\xe8\xaf\xb7\xe7\xad\x89\xe5\xbe\x85", Charset::Utf8, "请等待"),
            (b"Stap. Kopie\xcdn:01", Charset::Roman8, "Stap. Kopieën:01"),
            (b"\xc1\xdf\xef\xe9\xd8\xd9 \xe0\xd5\xd6\xd8\xdc", Charset::Cyrillic, "Спящий режим"),
            (b"UYKU \xdd\xdeLEM", Charset::Latin5, "UYKU İŞLEM"),
        ];
        for (raw, charset, expected) in cases {
            assert_eq!(decode_status(raw, *charset).as_deref(), Some(*expected), "{charset}");
        }
    }

    #[test]
    fn test_decode_status_invalid_bytes() {
        assert_eq!(decode_status(b"\xff\xfe\xfd", Charset::Utf8), None);
        assert_eq!(decode_status(b"READY\xff", Charset::Roman8), None);
    }

    #[test]
    fn test_cleanse_status() {
        assert_eq!(cleanse_status("  ready   to   print  "), "ready to print");
        assert_eq!(cleanse_status("ready\t\nto\n\tprint"), "ready to print");
        assert_eq!(cleanse_status(""), "");
        assert_eq!(cleanse_status("   \t\n  "), "");
    }

    #[test]
    fn test_status_is_cleansed_after_decoding() {
        assert_eq!(decode_status(b"  DEEP   SLEEP  ", Charset::Roman8).as_deref(), Some("DEEP SLEEP"));
    }

    #[test]
    fn test_charset_from_mib_enum() {
        assert_eq!(Charset::from_mib_enum(Some(5)), Charset::Latin2);
        assert_eq!(Charset::from_mib_enum(Some(8)), Charset::Cyrillic);
        assert_eq!(Charset::from_mib_enum(Some(12)), Charset::Latin5);
        assert_eq!(Charset::from_mib_enum(Some(106)), Charset::Utf8);
        assert_eq!(Charset::from_mib_enum(Some(2004)), Charset::Roman8);
        assert_eq!(Charset::from_mib_enum(Some(3)), Charset::Roman8);
        assert_eq!(Charset::from_mib_enum(None), Charset::Roman8);
    }

    #[test]
    fn test_roman8_table_is_complete() {
        assert_eq!(ROMAN8_HIGH.len(), 0xfe - 0xa0 + 1);
        assert_eq!(decode_roman8(&[0xa1, 0xcd, 0xfe]).as_deref(), Some("Àë±"));
    }
}
