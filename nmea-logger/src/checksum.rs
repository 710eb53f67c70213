//! NMEA 0183 checksum validation.
//!
//! A sentence looks like `$IIMWV,127,R,21.8,N,A*1C`: an optional `$`
//! address marker, the payload, a single `*` delimiter and two hex digits.
//! The checksum is the XOR of every payload byte, rendered as two uppercase
//! hex digits.
//!
//! No I/O happens here; this is pure data transformation.

/// The delimiter between payload and checksum digits.
pub const CHECKSUM_DELIMITER: char = '*';

/// Leading marker of an NMEA address field. Removed once before summing.
pub const ADDRESS_MARKER: char = '$';

/// XOR all bytes of `payload` and render the result as `%02X`.
///
/// `payload` must already have the leading `$` and the `*XX` suffix
/// stripped, e.g. `"IIMWV,127,R,21.8,N,A"` yields `"1C"`.
pub fn calculate_checksum(payload: &str) -> String {
    let sum = payload.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("{sum:02X}")
}

/// Returns `true` if `sentence` carries a correct checksum.
///
/// Rules:
/// - exactly one `*` must be present;
/// - a single leading `$` is removed before summing (sentences without it
///   are summed as-is);
/// - the provided digits must equal the computed uppercase digits exactly.
pub fn is_valid(sentence: &str) -> bool {
    let mut pieces = sentence.split(CHECKSUM_DELIMITER);
    let (Some(data), Some(provided), None) = (pieces.next(), pieces.next(), pieces.next()) else {
        return false;
    };

    let payload = data.strip_prefix(ADDRESS_MARKER).unwrap_or(data);
    calculate_checksum(payload) == provided
}
