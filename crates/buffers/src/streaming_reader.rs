//! Streaming reader with internal buffer management.

use crate::Reader;

/// A streaming reader that internally manages a growing buffer.
///
/// Data chunks are pushed into the reader and consumed incrementally, which
/// lets a pull-based source cut delimiter-terminated frames out of input that
/// arrives in arbitrary pieces.
///
/// # Example
///
/// ```
/// use marc21_buffers::StreamingReader;
///
/// let mut reader = StreamingReader::new();
/// reader.push(b"one\x1dtw");
/// reader.push(b"o\x1d");
///
/// let n = reader.index_of(0x1d).unwrap();
/// assert_eq!(reader.cut(n), b"one");
/// reader.skip(1);
/// assert_eq!(reader.index_of(0x1d), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct StreamingReader {
    uint8: Vec<u8>,
    x: usize,
}

impl Default for StreamingReader {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingReader {
    /// Creates a new streaming reader with default allocation size.
    pub fn new() -> Self {
        Self::with_alloc_size(16 * 1024)
    }

    /// Creates a new streaming reader with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(alloc_size),
            x: 0,
        }
    }

    /// Returns the number of bytes remaining to be read.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Adds a chunk of data to be read.
    pub fn push(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Drops already-read bytes so the buffer does not grow without bound.
    pub fn consume(&mut self) {
        self.uint8.drain(..self.x);
        self.x = 0;
    }

    /// Returns the current cursor position.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Peeks at the next byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.uint8.get(self.x).copied()
    }

    /// Returns the offset (from the cursor) of the next `byte`, if buffered.
    pub fn index_of(&self, byte: u8) -> Option<usize> {
        self.uint8[self.x..].iter().position(|&b| b == byte)
    }

    /// Skips up to `length` bytes.
    pub fn skip(&mut self, length: usize) {
        self.x = self.x.saturating_add(length).min(self.uint8.len());
    }

    /// Skips bytes while `pred` holds and returns how many were skipped.
    pub fn skip_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> usize {
        let start = self.x;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.x += 1;
        }
        self.x - start
    }

    /// Reads up to `size` bytes into a new vector, advancing the cursor.
    pub fn cut(&mut self, size: usize) -> Vec<u8> {
        let x = self.x;
        let end = x.saturating_add(size).min(self.uint8.len());
        self.x = end;
        self.uint8[x..end].to_vec()
    }

    /// Creates a Reader over the unread bytes.
    pub fn slice(&self) -> Reader<'_> {
        Reader::from_slice(&self.uint8, self.x, self.uint8.len())
    }

    /// Discards all buffered data.
    pub fn reset(&mut self) {
        self.uint8.clear();
        self.x = 0;
    }
}
