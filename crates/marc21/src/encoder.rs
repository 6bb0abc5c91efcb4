//! Record encoder: `Record` to ISO 2709 bytes.

use marc21_buffers::Writer;

use crate::constants::{
    DIRECTORY_ENTRY_LEN, FIELD_TERMINATOR, LEADER_LEN, MAX_FIELD_LENGTH, MAX_FIELD_OFFSET,
    RECORD_TERMINATOR,
};
use crate::error::{ErrorKind, Warning};
use crate::field::Tag;
use crate::leader::with_lengths;
use crate::record::Record;

/// One 12-byte directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub tag: Tag,
    /// Byte length of the field, terminator included.
    pub length: usize,
    /// Offset of the field from the base address.
    pub offset: usize,
}

/// Directory and field bodies computed from a record's non-empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub entries: Vec<DirectoryEntry>,
    pub fields: Vec<Vec<u8>>,
    /// Fields whose length or offset would overflow their directory digits,
    /// with the entry they would have had. They are left out of the record.
    pub oversized: Vec<DirectoryEntry>,
    pub total_length: usize,
    pub base_address: usize,
}

/// Serializes records.
///
/// The leader's length and base address are always recomputed, and fields
/// that report themselves empty are left out of both directory and body.
/// Every directory entry is exactly 12 bytes: a field longer than 9999 bytes,
/// or one starting past offset 99999, is dropped with a
/// [`FieldTooLong`](ErrorKind::FieldTooLong) warning instead.
pub struct RecordEncoder {
    pub writer: Writer,
}

impl Default for RecordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Writer sized per record rather than up front, for one-off encodes.
    pub(crate) fn one_off() -> Self {
        Self {
            writer: Writer::with_alloc_size(0),
        }
    }

    /// Lays out the record's non-empty fields with contiguous offsets.
    pub fn build_directory(&self, record: &Record) -> Directory {
        let mut entries = Vec::new();
        let mut fields = Vec::new();
        let mut oversized = Vec::new();
        let mut data_end = 0;
        for field in record.fields().filter(|field| !field.is_empty()) {
            let raw = field.to_raw();
            let entry = DirectoryEntry {
                tag: field.tag(),
                length: raw.len(),
                offset: data_end,
            };
            if entry.length > MAX_FIELD_LENGTH || entry.offset > MAX_FIELD_OFFSET {
                oversized.push(entry);
                continue;
            }
            entries.push(entry);
            data_end += raw.len();
            fields.push(raw);
        }
        let base_address = LEADER_LEN + entries.len() * DIRECTORY_ENTRY_LEN + 1;
        Directory {
            entries,
            fields,
            oversized,
            total_length: base_address + data_end + 1,
            base_address,
        }
    }

    /// Encodes `record`, first writing the recomputed lengths into its leader.
    pub fn encode(&mut self, record: &mut Record) -> Vec<u8> {
        let directory = self.build_directory(record);
        let update = with_lengths(record.leader(), directory.total_length, directory.base_address);
        record.set_leader(update.leader);
        if update.replaced {
            record.add_warning(Warning::new(ErrorKind::LeaderNotAscii, &[]));
        }
        if update.truncated {
            record.add_warning(Warning::new(
                ErrorKind::LeaderTooLong,
                &[("len", &LEADER_LEN.to_string())],
            ));
        }
        for entry in &directory.oversized {
            record.add_warning(Warning::new(
                ErrorKind::FieldTooLong,
                &[
                    ("tag", entry.tag.as_str()),
                    ("len", &entry.length.to_string()),
                    ("offset", &entry.offset.to_string()),
                ],
            ));
        }

        let writer = &mut self.writer;
        writer.reset();
        writer.ensure_capacity(directory.total_length);
        writer.buf(record.leader().as_bytes());
        for entry in &directory.entries {
            writer.buf(entry.tag.as_bytes());
            writer.decimal(entry.length, 4);
            writer.decimal(entry.offset, 5);
        }
        writer.u8(FIELD_TERMINATOR);
        for raw in &directory.fields {
            writer.buf(raw);
        }
        writer.u8(RECORD_TERMINATOR);
        writer.flush()
    }
}

/// Encodes one record with a fresh [`RecordEncoder`].
pub fn encode_record(record: &mut Record) -> Vec<u8> {
    RecordEncoder::one_off().encode(record)
}
