//! Auto-growing byte buffer writer.

/// A byte writer backed by a growable buffer.
///
/// Bytes written since the last [`flush`](Writer::flush) live in
/// `uint8[x0..x]`. Flushing hands them out and starts a new frame, which is
/// how the encoder emits one record per flush.
///
/// # Example
///
/// ```
/// use marc21_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.ascii("245");
/// writer.decimal(17, 4);
/// writer.decimal(0, 5);
/// assert_eq!(writer.flush(), b"245001700000");
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
    /// Start of the current frame.
    pub x0: usize,
    /// Write cursor.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with default allocation size.
    pub fn new() -> Self {
        Self::with_alloc_size(64 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(alloc_size),
            x0: 0,
            x: 0,
        }
    }

    /// Makes room for at least `capacity` more bytes past the cursor.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.uint8.truncate(self.x);
        self.uint8.reserve(capacity);
    }

    /// Returns the number of bytes written in the current frame.
    pub fn size(&self) -> usize {
        self.x - self.x0
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.uint8.truncate(self.x);
        self.uint8.push(byte);
        self.x += 1;
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.truncate(self.x);
        self.uint8.extend_from_slice(data);
        self.x += data.len();
    }

    /// Writes a string's bytes.
    pub fn ascii(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }

    /// Writes `value` as a zero-padded decimal at least `width` digits wide.
    ///
    /// Values needing more digits are written in full, as `sprintf("%0Nd")`
    /// would; callers that require a fixed width must range-check first.
    pub fn decimal(&mut self, value: usize, width: usize) {
        let digits = format!("{value:0width$}");
        self.buf(digits.as_bytes());
    }

    /// Returns the current frame and starts a new one.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
        self.x0 = 0;
        self.x = 0;
    }
}
