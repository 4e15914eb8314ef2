//! Binary-escaped text ("string binary") conversions.
//!
//! Printable ASCII is kept as-is and every other byte is written as `\xHH`
//! with uppercase hex digits. The escaped form is what users type for row
//! keys, families and qualifiers on the command line and in configuration
//! files.

/// Punctuation kept verbatim besides ASCII letters and digits.
const PRINTABLE_PUNCTUATION: &[u8] = b" `~!@#$%^&*()-_=+[]{}|;:'\",.<>/?";

fn is_printable(b: u8) -> bool {
    b.is_ascii_alphanumeric() || PRINTABLE_PUNCTUATION.contains(&b)
}

/// Render bytes as binary-escaped text.
///
/// # Examples
///
/// ```
/// use cellcodec_commons::conversions::to_string_binary;
///
/// assert_eq!(to_string_binary(b"row-1"), "row-1");
/// assert_eq!(to_string_binary(&[0x00, b'a', 0xff]), "\\x00a\\xFF");
/// assert_eq!(to_string_binary(b"a\\b"), "a\\x5Cb");
/// ```
pub fn to_string_binary(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len());
    for &b in bytes {
        if is_printable(b) {
            s.push(b as char);
        } else {
            use std::fmt::Write;
            let _ = write!(s, "\\x{:02X}", b);
        }
    }
    s
}

/// Parse binary-escaped text back into bytes.
///
/// `\xHH` escapes become one byte. A `\x` without two hex digits after it
/// loses its backslash. Any other character, a lone backslash included,
/// contributes its UTF-8 encoding.
///
/// # Examples
///
/// ```
/// use cellcodec_commons::conversions::to_bytes_binary;
///
/// assert_eq!(to_bytes_binary("\\x00a\\xFF"), vec![0x00, b'a', 0xff]);
/// assert_eq!(to_bytes_binary("\\xZZ"), b"xZZ".to_vec());
/// ```
pub fn to_bytes_binary(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let hi = bytes.get(i + 2).and_then(|c| hex_value(*c));
            let lo = bytes.get(i + 3).and_then(|c| hex_value(*c));
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 4;
                },
                _ => {
                    // bogus escape: drop the backslash only
                    i += 1;
                },
            }
        } else {
            out.push(b);
            i += 1;
        }
    }
    out
}

fn hex_value(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_bytes_are_verbatim() {
        let input = b"Hello, World! key_01/[a]{b}";
        assert_eq!(to_string_binary(input), "Hello, World! key_01/[a]{b}");
    }

    #[test]
    fn test_non_printable_bytes_are_escaped() {
        assert_eq!(to_string_binary(&[0x01, 0x7f, b'\n']), "\\x01\\x7F\\x0A");
        assert_eq!(to_string_binary("é".as_bytes()), "\\xC3\\xA9");
    }

    #[test]
    fn test_every_byte_survives_escape_and_parse() {
        let all: Vec<u8> = (0..=255u8).collect();
        assert_eq!(to_bytes_binary(&to_string_binary(&all)), all);
    }

    #[test]
    fn test_escaped_text_is_stable() {
        let text = "a\\x00b\\xFFc";
        assert_eq!(to_string_binary(&to_bytes_binary(text)), text);
    }

    #[test]
    fn test_lowercase_hex_is_accepted() {
        assert_eq!(to_bytes_binary("\\xff"), vec![0xff]);
    }

    #[test]
    fn test_incomplete_escapes() {
        assert_eq!(to_bytes_binary("ab\\x4"), b"abx4".to_vec());
        assert_eq!(to_bytes_binary("\\"), b"\\".to_vec());
    }
}
