//! Byte buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A byte buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position. Unlike a binary protocol reader,
/// it is fed untrusted record data, so reads that could run past `end`
/// either return [`BufferError::EndOfBuffer`] or clamp to the available
/// bytes. No method panics.
///
/// # Example
///
/// ```
/// use marc21_buffers::Reader;
///
/// let data = b"00037abc";
/// let mut reader = Reader::new(data);
///
/// assert_eq!(reader.decimal(5), Ok(37));
/// assert_eq!(reader.take(10), b"abc");
/// assert_eq!(reader.size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `uint8[x..end]`, clamping both bounds to the slice.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        let x = x.min(end);
        Self { uint8, x, end }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.end = uint8.len();
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Option<u8> {
        (self.x < self.end).then(|| self.uint8[self.x])
    }

    /// Returns the final byte of the readable window.
    pub fn last(&self) -> Option<u8> {
        (self.end > self.x).then(|| self.uint8[self.end - 1])
    }

    /// Advances the cursor by up to `length` bytes.
    pub fn skip(&mut self, length: usize) {
        self.x = self.x.saturating_add(length).min(self.end);
    }

    /// Returns exactly `size` bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        if size > self.size() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(self.take(size))
    }

    /// Returns up to `size` bytes and advances the cursor past them.
    pub fn take(&mut self, size: usize) -> &'a [u8] {
        let x = self.x;
        let end = x.saturating_add(size).min(self.end);
        self.x = end;
        &self.uint8[x..end]
    }

    /// Returns the bytes between `start` and `end` (relative to the cursor)
    /// without advancing. Both bounds are clamped to the window.
    pub fn subarray(&self, start: usize, end: Option<usize>) -> &'a [u8] {
        let from = self.x.saturating_add(start).min(self.end);
        let to = end
            .map(|e| self.x.saturating_add(e).min(self.end))
            .unwrap_or(self.end)
            .max(from);
        &self.uint8[from..to]
    }

    /// Creates a new Reader over the same memory, relative to the cursor.
    pub fn slice(&self, start: usize, end: Option<usize>) -> Reader<'a> {
        let from = self.x.saturating_add(start);
        let to = end.map(|e| self.x.saturating_add(e)).unwrap_or(self.end);
        Reader::from_slice(self.uint8, from, to.min(self.end))
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        let val = self.peek().ok_or(BufferError::EndOfBuffer)?;
        self.x += 1;
        Ok(val)
    }

    /// Reads an ASCII string of the given length.
    pub fn ascii(&mut self, length: usize) -> Result<&'a str, BufferError> {
        let bytes = self.buf(length)?;
        if !bytes.is_ascii() {
            return Err(BufferError::InvalidUtf8);
        }
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
    }

    /// Reads a UTF-8 string of the given size.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let bytes = self.buf(size)?;
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
    }

    /// Reads a fixed-width decimal made of exactly `width` ASCII digits.
    ///
    /// The cursor advances past the field even when it is not numeric, so
    /// fixed-layout parsing can continue with the next field.
    pub fn decimal(&mut self, width: usize) -> Result<usize, BufferError> {
        let bytes = self.buf(width)?;
        parse_decimal(bytes).ok_or(BufferError::NotDecimal)
    }
}

fn parse_decimal(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    bytes.iter().try_fold(0usize, |acc, &b| {
        acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
    })
}
