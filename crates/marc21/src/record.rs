//! The editable record: leader, ordered fields and a warning log.

use regex::Regex;

use crate::encoder::RecordEncoder;
use crate::error::{ErrorKind, MarcError, Result, Warning};
use crate::field::{Field, Tag};
use crate::leader::BLANK_LEADER;
use crate::ordered_list::{ElementId, InsertMode, OrderedList};

/// Handle to a field within its [`Record`].
pub type FieldId = ElementId;

/// A MARC record.
///
/// Record length and base address are never stored authoritatively; they are
/// recomputed into the leader each time the record is encoded.
///
/// ```
/// use marc21::{ControlField, DataField, Record, Subfield};
///
/// let mut record = Record::new();
/// record.append_field(ControlField::new("001", "ocm01047729")?);
/// record.append_field(DataField::new(
///     "245",
///     [Subfield::new('a', "Moby Dick /"), Subfield::new('c', "Herman Melville.")],
///     Some("1"),
///     Some("0"),
/// )?);
///
/// assert_eq!(record.len(), 2);
/// assert!(record.get_field("245").is_some());
/// # Ok::<(), marc21::MarcError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    leader: String,
    fields: OrderedList<Field>,
    warnings: Vec<Warning>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// Empty record with a blank leader.
    pub fn new() -> Self {
        Self::with_leader(BLANK_LEADER)
    }

    pub fn with_leader(leader: impl Into<String>) -> Self {
        Self {
            leader: leader.into(),
            fields: OrderedList::new(),
            warnings: Vec::new(),
        }
    }

    pub fn leader(&self) -> &str {
        &self.leader
    }

    pub fn set_leader(&mut self, leader: impl Into<String>) {
        self.leader = leader.into();
    }

    /// Number of fields, empty ones included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in stored order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.values()
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> + '_ {
        self.fields.values_mut()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.ids()
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id)
    }

    pub fn field_position(&self, id: FieldId) -> Option<usize> {
        self.fields.position(id)
    }

    /// First field tagged `tag`.
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields().find(|field| field.tag() == tag)
    }

    /// First field whose tag matches `pattern`.
    pub fn get_field_matching(&self, pattern: &Regex) -> Option<&Field> {
        self.fields().find(|field| pattern.is_match(field.tag().as_str()))
    }

    /// Handle of the first field tagged `tag`, for use as an insert anchor.
    pub fn get_field_id(&self, tag: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .find(|(_, field)| field.tag() == tag)
            .map(|(id, _)| id)
    }

    pub fn get_fields(&self, tag: &str) -> Vec<&Field> {
        self.fields().filter(|field| field.tag() == tag).collect()
    }

    pub fn get_fields_matching(&self, pattern: &Regex) -> Vec<&Field> {
        self.fields()
            .filter(|field| pattern.is_match(field.tag().as_str()))
            .collect()
    }

    pub fn append_field(&mut self, field: impl Into<Field>) -> FieldId {
        self.fields.append(field.into())
    }

    pub fn prepend_field(&mut self, field: impl Into<Field>) -> FieldId {
        self.fields.prepend(field.into())
    }

    /// Inserts `field` before or after `anchor`.
    ///
    /// Fails with `InvalidField` when `anchor` is not a field of this record;
    /// the record is left unchanged.
    pub fn insert_field(
        &mut self,
        field: impl Into<Field>,
        anchor: FieldId,
        mode: InsertMode,
    ) -> Result<FieldId> {
        self.fields
            .insert_relative(field.into(), anchor, mode)
            .map_err(|rejected| not_a_member(rejected.tag()))
    }

    /// Moves field `id` before or after `anchor`.
    pub fn move_field(&mut self, id: FieldId, anchor: FieldId, mode: InsertMode) -> Result<()> {
        if self.fields.move_relative(id, anchor, mode) {
            return Ok(());
        }
        // A dropped handle no longer knows its tag.
        Err(match self.field(id) {
            Some(field) => not_a_member(field.tag()),
            None => MarcError::new(ErrorKind::InvalidField, &[("tag", "?")]),
        })
    }

    pub fn delete_field(&mut self, id: FieldId) -> Option<Field> {
        self.fields.delete(id)
    }

    /// Deletes every field tagged `tag`; returns how many went.
    pub fn delete_fields(&mut self, tag: &str) -> usize {
        self.delete_where(|field_tag| field_tag == tag)
    }

    pub fn delete_fields_matching(&mut self, pattern: &Regex) -> usize {
        self.delete_where(|field_tag| pattern.is_match(field_tag.as_str()))
    }

    fn delete_where(&mut self, mut pred: impl FnMut(Tag) -> bool) -> usize {
        let doomed: Vec<FieldId> = self
            .fields
            .iter()
            .filter(|(_, field)| pred(field.tag()))
            .map(|(id, _)| id)
            .collect();
        for &id in &doomed {
            self.fields.delete(id);
        }
        doomed.len()
    }

    /// Appends to the warning log.
    pub fn add_warning(&mut self, warning: Warning) {
        tracing::debug!(code = warning.kind().code(), "{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Serializes the record, rewriting the leader's length fields.
    pub fn to_raw(&mut self) -> Vec<u8> {
        RecordEncoder::one_off().encode(self)
    }
}

fn not_a_member(tag: Tag) -> MarcError {
    MarcError::new(ErrorKind::InvalidField, &[("tag", tag.as_str())])
}
