//! Pull-based reader over multi-record ISO 2709 streams.
//!
//! Records in a file or buffer are plain concatenations split on the record
//! terminator. Stray `\n`, `\r` and NUL bytes between records are dropped.

use std::fs::File;
use std::io::{Cursor, ErrorKind as IoErrorKind, Read};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use marc21_buffers::StreamingReader;

use crate::constants::{INTER_RECORD_NOISE, MAX_RECORD_LENGTH, RECORD_TERMINATOR};
use crate::decoder::RecordDecoder;
use crate::error::{ErrorKind, MarcError, Result};
use crate::record::Record;

/// Tuning for [`MarcReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Longest chunk handed out; longer runs are cut at this length.
    pub max_record_length: usize,
    /// How many bytes to request from the source per read.
    pub chunk_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_record_length: MAX_RECORD_LENGTH,
            chunk_size: 16 * 1024,
        }
    }
}

/// Yields raw record chunks, or decoded records, from any [`Read`] source.
///
/// ```
/// use marc21::MarcReader;
///
/// let stream = b"00042    a2200037   4500008000400000\x1eabc\x1e\x1d\n".to_vec();
/// let records: Vec<_> = MarcReader::from_bytes(stream).collect::<Result<_, _>>()?;
/// assert_eq!(records.len(), 1);
/// # Ok::<(), marc21::MarcError>(())
/// ```
pub struct MarcReader<R> {
    source: R,
    buffer: StreamingReader,
    options: ReaderOptions,
    decoder: RecordDecoder,
    eof: bool,
}

impl MarcReader<File> {
    /// Opens a file of concatenated records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            let filename = path.display().to_string();
            tracing::warn!(%err, filename = %filename, "cannot open record file");
            MarcError::new(ErrorKind::InvalidFile, &[("filename", &filename)])
        })?;
        Ok(Self::new(file))
    }
}

impl MarcReader<Cursor<Vec<u8>>> {
    /// Reads records from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read> MarcReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            source,
            buffer: StreamingReader::with_alloc_size(options.chunk_size),
            options,
            decoder: RecordDecoder::new(),
            eof: false,
        }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Next delimited chunk, terminator included.
    ///
    /// Leading noise bytes are stripped and empty chunks skipped. A final
    /// chunk with no terminator is returned with one appended, and a chunk
    /// longer than `max_record_length` is cut at that length. Returns
    /// `Ok(None)` once the source is exhausted.
    pub fn next_raw(&mut self) -> Result<Option<Vec<u8>>> {
        let max = self.options.max_record_length.max(1);
        loop {
            self.buffer
                .skip_while(|b| INTER_RECORD_NOISE.contains(&b));
            match self.buffer.index_of(RECORD_TERMINATOR) {
                Some(0) => {
                    self.buffer.skip(1);
                    continue;
                }
                Some(n) if n <= max => {
                    let chunk = self.buffer.cut(n);
                    self.buffer.skip(1);
                    return Ok(Some(self.finish(chunk)));
                }
                _ if self.buffer.size() >= max => {
                    tracing::trace!(max, "cutting over-long record chunk");
                    let chunk = self.buffer.cut(max);
                    return Ok(Some(self.finish(chunk)));
                }
                _ => {}
            }

            if self.eof {
                if self.buffer.size() == 0 {
                    return Ok(None);
                }
                let chunk = self.buffer.cut(self.buffer.size());
                tracing::trace!(len = chunk.len(), "unterminated tail of stream");
                return Ok(Some(self.finish(chunk)));
            }
            self.fill()?;
        }
    }

    /// Next decoded record, or `None` at the end of the stream.
    pub fn next_record(&mut self) -> Option<Result<Record>> {
        match self.next_raw() {
            Ok(Some(raw)) => Some(self.decoder.decode(&raw)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }

    fn finish(&mut self, mut chunk: Vec<u8>) -> Vec<u8> {
        self.buffer.consume();
        chunk.push(RECORD_TERMINATOR);
        tracing::trace!(len = chunk.len(), "record chunk");
        chunk
    }

    fn fill(&mut self) -> Result<()> {
        let mut block = vec![0; self.options.chunk_size.max(1)];
        loop {
            match self.source.read(&mut block) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.buffer.push(&block[..n]);
                    return Ok(());
                }
                Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
                Err(err) => {
                    tracing::warn!(%err, "record source failed");
                    // Nothing more can be read after a failed source.
                    self.eof = true;
                    self.buffer.reset();
                    return Err(MarcError::new(ErrorKind::InvalidSource, &[]));
                }
            }
        }
    }
}

impl<R: Read> Iterator for MarcReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// A [`MarcReader`] shared between worker threads.
///
/// Only chunk extraction is serialized; each worker decodes the chunk it
/// was handed without holding the lock.
pub struct SharedMarcReader<R> {
    inner: Mutex<MarcReader<R>>,
    decoder: RecordDecoder,
}

impl<R: Read> SharedMarcReader<R> {
    pub fn new(reader: MarcReader<R>) -> Self {
        Self {
            inner: Mutex::new(reader),
            decoder: RecordDecoder::new(),
        }
    }

    pub fn next_raw(&self) -> Result<Option<Vec<u8>>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_raw()
    }

    pub fn next_record(&self) -> Option<Result<Record>> {
        match self.next_raw() {
            Ok(Some(raw)) => Some(self.decoder.decode(&raw)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }

    pub fn into_inner(self) -> MarcReader<R> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
