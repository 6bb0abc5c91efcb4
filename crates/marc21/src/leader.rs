//! Leader helpers: reading the length fields and splicing recomputed ones.
//!
//! The leader is kept as a string on the record. Decode reads only the
//! declared record length (0–4) and base address (12–16); encode rewrites
//! those two and the fixed codes at 10–11 and 20–23. On the wire the leader
//! is exactly 24 ASCII bytes, and [`with_lengths`] always produces that.

use crate::constants::LEADER_LEN;

/// Leader of a freshly created record.
pub const BLANK_LEADER: &str = "                        ";

const RECORD_LENGTH_WIDTH: usize = 5;
const BASE_ADDRESS_AT: usize = 12;
const BASE_ADDRESS_WIDTH: usize = 5;
const INDICATOR_COUNT_AT: usize = 10;
const ENTRY_MAP_AT: usize = 20;

/// What the first five bytes of a raw record say about its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredLength {
    Numeric(usize),
    /// Fewer than five bytes available.
    Missing,
    /// The five bytes are not all digits; carries them lossily decoded.
    NonNumeric(String),
}

/// Reads the declared record length from the start of `raw`.
pub fn declared_length(raw: &[u8]) -> DeclaredLength {
    let Some(digits) = raw.get(..RECORD_LENGTH_WIDTH) else {
        return DeclaredLength::Missing;
    };
    let mut reader = marc21_buffers::Reader::new(digits);
    match reader.decimal(RECORD_LENGTH_WIDTH) {
        Ok(n) => DeclaredLength::Numeric(n),
        Err(_) => DeclaredLength::NonNumeric(String::from_utf8_lossy(digits).into_owned()),
    }
}

/// Base address of data from leader bytes 12–16.
///
/// Non-numeric input is read the lenient way: leading blanks are skipped and
/// the leading run of digits is used, so `"37xyz"` is 37 and `"abc"` is 0.
pub fn base_address(raw: &[u8]) -> usize {
    let field = raw
        .get(BASE_ADDRESS_AT..)
        .map(|rest| &rest[..rest.len().min(BASE_ADDRESS_WIDTH)])
        .unwrap_or_default();
    leading_int(field)
}

/// Integer value of the leading digit run of `bytes`, after any blanks.
pub(crate) fn leading_int(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| b.is_ascii_digit())
        .fold(0usize, |acc, &b| {
            acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        })
}

/// Result of [`with_lengths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderUpdate {
    pub leader: String,
    /// The spliced leader ran past 24 bytes and was cut back.
    pub truncated: bool,
    /// Non-ASCII bytes in the input were overwritten with blanks.
    pub replaced: bool,
}

/// Writes `total` and `base` into `leader` along with the fixed `22` and
/// `4500` codes.
///
/// A short leader is first padded with blanks. Numbers that need more than
/// five digits are written in full, pushing later bytes right; if that (or an
/// over-long input) leaves more than 24 bytes, the result is truncated.
/// Splicing works on bytes, so every non-ASCII byte is blanked first; the
/// result is always 24 bytes of ASCII.
///
/// ```
/// use marc21::leader::with_lengths;
///
/// let update = with_lengths("00000nam  2200000 a 4500", 42, 37);
/// assert_eq!(update.leader, "00042nam  2200037 a 4500");
/// assert!(!update.truncated);
/// assert!(!update.replaced);
/// ```
pub fn with_lengths(leader: &str, total: usize, base: usize) -> LeaderUpdate {
    let mut replaced = false;
    let mut bytes: Vec<u8> = leader
        .bytes()
        .map(|b| {
            if b.is_ascii() {
                b
            } else {
                replaced = true;
                b' '
            }
        })
        .collect();
    if bytes.len() < LEADER_LEN {
        bytes.resize(LEADER_LEN, b' ');
    }
    splice(&mut bytes, 0, RECORD_LENGTH_WIDTH, format!("{total:05}").as_bytes());
    splice(&mut bytes, BASE_ADDRESS_AT, BASE_ADDRESS_WIDTH, format!("{base:05}").as_bytes());
    splice(&mut bytes, INDICATOR_COUNT_AT, 2, b"22");
    splice(&mut bytes, ENTRY_MAP_AT, 4, b"4500");

    let truncated = bytes.len() > LEADER_LEN;
    if truncated {
        bytes.truncate(LEADER_LEN);
    }
    LeaderUpdate {
        leader: bytes.into_iter().map(char::from).collect(),
        truncated,
        replaced,
    }
}

fn splice(bytes: &mut Vec<u8>, at: usize, width: usize, with: &[u8]) {
    let at = at.min(bytes.len());
    let end = (at + width).min(bytes.len());
    bytes.splice(at..end, with.iter().copied());
}
