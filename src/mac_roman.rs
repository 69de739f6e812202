//! Mac OS Roman → Unicode decoding for type tags and resource names.
//!
//! Bytes below 0x80 are ASCII and pass through unchanged.  Bytes 0x80–0xFF
//! index [`HIGH_CHARS`].  Every byte value has a mapping, so decoding never
//! fails and always yields one `char` per input byte.

/// Unicode code points for Mac OS Roman bytes 0x80–0xFF, in byte order.
///
/// This is the post-1998 table: 0xDB is the euro sign (formerly the generic
/// currency sign) and 0xF0 is the Apple logo in the private use area.
pub const HIGH_CHARS: [char; 128] = [
    // 0x80
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
    // 0x90
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
    // 0xA0
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
    // 0xB0
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
    // 0xC0
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{00A0}', 'À', 'Ã', 'Õ', 'Œ', 'œ',
    // 0xD0
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ',
    // 0xE0
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô',
    // 0xF0
    '\u{F8FF}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ',
];

/// Map a single Mac OS Roman byte to its Unicode scalar.
#[inline]
pub fn decode_byte(b: u8) -> char {
    if b < 0x80 {
        b as char
    } else {
        HIGH_CHARS[(b - 0x80) as usize]
    }
}

/// Decode a Mac OS Roman byte string.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(decode_byte).collect()
}
