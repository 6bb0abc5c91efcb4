//! Byte buffer utilities for the marc21 codec.
//!
//! ISO 2709 records are fixed-width, self-describing byte strings: numbers
//! are zero-padded ASCII decimals and structure is marked by control bytes.
//! This crate provides the cursors the codec reads and writes them with.
//!
//! # Overview
//!
//! - [`Reader`] - Reads a byte slice with cursor tracking; never panics on short input
//! - [`Writer`] - Writes bytes and fixed-width decimals to an auto-growing buffer
//! - [`StreamingReader`] - Accepts pushed chunks and cuts delimited frames
//!
//! # Example
//!
//! ```
//! use marc21_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.decimal(42, 5);
//! writer.ascii("abc");
//! let data = writer.flush();
//! assert_eq!(data, b"00042abc");
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.decimal(5), Ok(42));
//! assert_eq!(reader.ascii(3), Ok("abc"));
//! ```

mod print_octets;
mod reader;
mod streaming_reader;
mod writer;

pub use print_octets::print_octets;
pub use reader::Reader;
pub use streaming_reader::StreamingReader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
    /// Expected a run of ASCII digits.
    NotDecimal,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            BufferError::NotDecimal => write!(f, "not a decimal number"),
        }
    }
}

impl std::error::Error for BufferError {}
