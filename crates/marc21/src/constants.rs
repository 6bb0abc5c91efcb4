//! ISO 2709 delimiters and layout constants.

/// Ends every record.
pub const RECORD_TERMINATOR: u8 = 0x1D;

/// Ends every field and the directory.
pub const FIELD_TERMINATOR: u8 = 0x1E;

/// Introduces each subfield of a data field.
pub const SUBFIELD_INDICATOR: u8 = 0x1F;

pub const LEADER_LEN: usize = 24;

pub const DIRECTORY_ENTRY_LEN: usize = 12;

/// Largest length expressible in the leader's five-digit length field.
pub const MAX_RECORD_LENGTH: usize = 99_999;

/// Largest field length expressible in a directory entry's four digits.
pub const MAX_FIELD_LENGTH: usize = 9_999;

/// Largest offset expressible in a directory entry's five digits.
pub const MAX_FIELD_OFFSET: usize = 99_999;

/// Bytes tolerated (and stripped) between records in a multi-record stream.
pub const INTER_RECORD_NOISE: [u8; 3] = [0x0A, 0x0D, 0x00];
