//! Record decoder: ISO 2709 bytes to `Record`.
//!
//! Only a missing record terminator stops a decode. Every other anomaly in
//! the leader, directory or field bodies is logged on the record's warning
//! list and decoding carries on with a fallback value.

use marc21_buffers::{print_octets, Reader};

use crate::constants::{
    DIRECTORY_ENTRY_LEN, FIELD_TERMINATOR, LEADER_LEN, RECORD_TERMINATOR, SUBFIELD_INDICATOR,
};
use crate::error::{ErrorKind, MarcError, Result, Warning};
use crate::field::{ControlField, DataField, Field, Subfield};
use crate::leader::{base_address, declared_length, leading_int, DeclaredLength};
use crate::record::Record;

/// Decodes raw records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDecoder;

impl RecordDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one terminated record.
    ///
    /// Only a missing record terminator fails the call. Every other anomaly
    /// is logged on the record's warnings and decoding carries on.
    ///
    /// Two checks differ from a literal reading of the directory:
    /// - A field runs past the record (`InvalidDirectory`) when
    ///   `base_address + offset + length` exceeds the buffer. The offset is
    ///   measured from the base address, so comparing `offset + length`
    ///   alone against the record length would miss entries that overrun
    ///   by up to the size of leader and directory. Out-of-range slices are
    ///   clamped to the buffer.
    /// - A declared length that stops one byte short of the field
    ///   terminator is accepted without `FieldEof`.
    ///
    /// ```
    /// use marc21::RecordDecoder;
    ///
    /// let raw = b"00042    a2200037   4500008000400000\x1eabc\x1e\x1d";
    /// let record = RecordDecoder::new().decode(raw)?;
    /// let field = record.get_field("008").and_then(|f| f.as_control()).unwrap();
    /// assert_eq!(field.data(), "abc");
    /// assert!(record.warnings().is_empty());
    /// # Ok::<(), marc21::MarcError>(())
    /// ```
    pub fn decode(&self, raw: &[u8]) -> Result<Record> {
        let mut record = Record::new();
        let total = raw.len();

        match declared_length(raw) {
            // 00000 is what writers put in a leader before the length is known.
            DeclaredLength::Numeric(0) => {}
            DeclaredLength::Numeric(declared) if declared != total => {
                record.add_warning(Warning::new(
                    ErrorKind::IncorrectLength,
                    &[
                        ("record_length", &format!("{declared:05}")),
                        ("actual", &total.to_string()),
                    ],
                ));
            }
            DeclaredLength::Numeric(_) => {}
            DeclaredLength::Missing => {
                record.add_warning(Warning::new(ErrorKind::MissingLength, &[]));
            }
            DeclaredLength::NonNumeric(text) => {
                record.add_warning(Warning::new(
                    ErrorKind::NonnumericLength,
                    &[("record_length", &text)],
                ));
            }
        }

        if raw.last() != Some(&RECORD_TERMINATOR) {
            let err = MarcError::new(ErrorKind::InvalidTerminator, &[]);
            tracing::warn!(
                code = err.code(),
                len = total,
                tail = %print_octets(&raw[total.saturating_sub(8)..], 8),
                "{err}"
            );
            return Err(err);
        }

        record.set_leader(String::from_utf8_lossy(&raw[..total.min(LEADER_LEN)]));
        let data_start = base_address(raw);

        let directory_end = data_start.saturating_sub(1);
        if raw.get(directory_end) != Some(&FIELD_TERMINATOR) || data_start == 0 {
            record.add_warning(Warning::new(ErrorKind::NoDirectory, &[]));
        }
        let directory = Reader::from_slice(raw, LEADER_LEN, directory_end);
        let directory = directory.subarray(0, None);
        if directory.len() % DIRECTORY_ENTRY_LEN != 0 {
            record.add_warning(Warning::new(ErrorKind::InvalidDirectoryLength, &[]));
        }

        for entry in directory.chunks_exact(DIRECTORY_ENTRY_LEN) {
            self.decode_field(&mut record, raw, data_start, entry);
        }
        Ok(record)
    }

    fn decode_field(&self, record: &mut Record, raw: &[u8], data_start: usize, entry: &[u8]) {
        let mut reader = Reader::new(entry);
        let tag = unpad(reader.take(3));
        let tag = tag.as_str();

        if !is_valid_tag(tag) {
            record.add_warning(Warning::new(ErrorKind::InvalidDirectoryTag, &[("tag", tag)]));
        }
        let length_bytes = reader.subarray(0, Some(4));
        let length = reader.decimal(4).unwrap_or_else(|_| {
            record.add_warning(Warning::new(
                ErrorKind::InvalidDirectoryTagLength,
                &[("tag", tag), ("len", &unpad(length_bytes))],
            ));
            leading_int(length_bytes)
        });
        let offset_bytes = reader.subarray(0, Some(5));
        let offset = reader.decimal(5).unwrap_or_else(|_| {
            record.add_warning(Warning::new(
                ErrorKind::InvalidDirectoryOffset,
                &[("tag", tag), ("offset", &unpad(offset_bytes))],
            ));
            leading_int(offset_bytes)
        });

        let start = data_start.saturating_add(offset);
        let end = start.saturating_add(length);
        if end > raw.len() {
            record.add_warning(Warning::new(ErrorKind::InvalidDirectory, &[("tag", tag)]));
        }

        let mut body = Reader::from_slice(raw, start, end).take(length);
        match body.split_last() {
            Some((&FIELD_TERMINATOR, rest)) => body = rest,
            // A length that stops just short of the terminator is tolerated.
            _ if raw.get(end) == Some(&FIELD_TERMINATOR) => {}
            _ => {
                record.add_warning(Warning::new(ErrorKind::FieldEof, &[("tag", tag)]));
            }
        }

        let field = if is_control_tag(tag) {
            ControlField::new(tag, String::from_utf8_lossy(body)).map(Field::from)
        } else {
            self.decode_data_field(record, tag, body).map(Field::from)
        };
        match field {
            Ok(field) => {
                record.append_field(field);
            }
            // Only this field is lost; the rest of the record still decodes.
            Err(err) => record.add_warning(err.into()),
        }
    }

    fn decode_data_field(
        &self,
        record: &mut Record,
        tag: &str,
        body: &[u8],
    ) -> Result<DataField> {
        let mut chunks = body.split(|&b| b == SUBFIELD_INDICATOR);
        let indicators = String::from_utf8_lossy(chunks.next().unwrap_or_default());

        let mut chars = indicators.chars();
        let (ind1, ind2) = match (chars.next(), chars.next(), chars.next()) {
            (Some(ind1), Some(ind2), None) => (ind1, ind2),
            (first, _, _) => {
                record.add_warning(Warning::new(
                    ErrorKind::InvalidIndicators,
                    &[("tag", tag), ("indicators", &indicators)],
                ));
                match (first, indicators.chars().count()) {
                    (Some(ind1), 1) => (ind1, ' '),
                    _ => (' ', ' '),
                }
            }
        };

        let mut subfields = Vec::new();
        for chunk in chunks {
            if chunk.is_empty() {
                record.add_warning(Warning::new(ErrorKind::EmptySubfield, &[("tag", tag)]));
                continue;
            }
            let text = String::from_utf8_lossy(chunk);
            let mut chars = text.chars();
            if let Some(code) = chars.next() {
                subfields.push(Subfield::new(code, chars.as_str()));
            }
        }

        let mut buf1 = [0u8; 4];
        let mut buf2 = [0u8; 4];
        DataField::new(
            tag,
            subfields,
            Some(&*ind1.encode_utf8(&mut buf1)),
            Some(&*ind2.encode_utf8(&mut buf2)),
        )
    }
}

/// Decodes one record with the default decoder.
pub fn decode_record(raw: &[u8]) -> Result<Record> {
    RecordDecoder::new().decode(raw)
}

/// Directory values lose trailing blanks and NULs, as a space-padded `A`
/// unpack would.
fn unpad(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches([' ', '\0'])
        .to_string()
}

fn is_valid_tag(tag: &str) -> bool {
    tag.len() == 3 && tag.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Numeric tags below 10 carry control fields.
fn is_control_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit()) && leading_int(tag.as_bytes()) < 10
}
