//! Debug utility for rendering raw record bytes in log output.

/// Formats a byte slice for debugging.
///
/// Printable ASCII is kept as-is; every other byte (including the ISO 2709
/// delimiters `0x1D`, `0x1E`, `0x1F`) is rendered as `\xNN`.
///
/// # Example
///
/// ```
/// use marc21_buffers::print_octets;
///
/// assert_eq!(print_octets(b"245\x1e", 16), "245\\x1e");
/// assert_eq!(print_octets(b"abcdef", 3), "abc... (3 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = String::with_capacity(octets.len().min(max) * 2);
    for &byte in octets.iter().take(max) {
        if byte.is_ascii_graphic() || byte == b' ' {
            result.push(byte as char);
        } else {
            result.push_str(&format!("\\x{:02x}", byte));
        }
    }

    if octets.len() > max {
        result.push_str(&format!("... ({} more)", octets.len() - max));
    }

    result
}
