//! MARC21 (ISO 2709) binary records: decode, edit, encode.
//!
//! A raw record is a 24-byte leader, a directory of 12-byte entries locating
//! each field, and the field bodies. [`RecordDecoder`] turns bytes into an
//! editable [`Record`], recovering from most damage and logging it as
//! [`Warning`]s; [`RecordEncoder`] serializes a record back, recomputing the
//! directory and the leader's length fields. [`MarcReader`] pulls records
//! from concatenated multi-record files and streams.
//!
//! ```
//! use marc21::{decode_record, encode_record, DataField, InsertMode, Subfield};
//!
//! let raw = b"00042    a2200037   4500008000400000\x1eabc\x1e\x1d";
//! let mut record = decode_record(raw)?;
//! let anchor = record.field_ids().next().unwrap();
//! record.insert_field(
//!     DataField::new("245", [Subfield::new('a', "Title")], Some("0"), Some("0"))?,
//!     anchor,
//!     InsertMode::After,
//! )?;
//!
//! let again = decode_record(&encode_record(&mut record))?;
//! assert_eq!(again.fields().count(), 2);
//! # Ok::<(), marc21::MarcError>(())
//! ```

mod constants;

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod field;
pub mod leader;
pub mod ordered_list;
pub mod reader;
pub mod record;

pub use constants::{
    DIRECTORY_ENTRY_LEN, FIELD_TERMINATOR, INTER_RECORD_NOISE, LEADER_LEN, MAX_FIELD_LENGTH,
    MAX_FIELD_OFFSET, MAX_RECORD_LENGTH, RECORD_TERMINATOR, SUBFIELD_INDICATOR,
};
pub use decoder::{decode_record, RecordDecoder};
pub use encoder::{encode_record, Directory, DirectoryEntry, RecordEncoder};
pub use error::{format_error, ErrorKind, MarcError, Result, Severity, Warning};
pub use field::{
    ControlField, DataField, Field, Subfield, SubfieldId, Tag, DEFAULT_FORMAT_EXCLUDE,
};
pub use ordered_list::{ElementId, InsertMode, OrderedList};
pub use reader::{MarcReader, ReaderOptions, SharedMarcReader};
pub use record::{FieldId, Record};
