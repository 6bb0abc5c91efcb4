//! Data field: a tag, two indicators and an ordered list of subfields.

use super::{Subfield, Tag};
use crate::constants::FIELD_TERMINATOR;
use crate::error::{ErrorKind, MarcError};
use crate::ordered_list::{ElementId, InsertMode, OrderedList};

/// Handle to a subfield within its [`DataField`].
pub type SubfieldId = ElementId;

/// Subfield codes that subject headings (`6xx`) join with `" -- "`.
const SUBDIVISION_CODES: [char; 4] = ['v', 'x', 'y', 'z'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    tag: Tag,
    ind1: char,
    ind2: char,
    subfields: OrderedList<Subfield>,
}

impl DataField {
    /// Builds a data field, validating the tag and both indicators.
    ///
    /// An absent or empty indicator becomes a space; one longer than a single
    /// character fails with `InvalidIndicator`.
    ///
    /// ```
    /// use marc21::{DataField, Subfield};
    ///
    /// let field = DataField::new("100", [Subfield::new('a', "Scott, Daniel.")], Some("0"), None)?;
    /// assert_eq!(field.indicator(1)?, '0');
    /// assert_eq!(field.indicator(2)?, ' ');
    /// # Ok::<(), marc21::MarcError>(())
    /// ```
    pub fn new(
        tag: &str,
        subfields: impl IntoIterator<Item = Subfield>,
        ind1: Option<&str>,
        ind2: Option<&str>,
    ) -> Result<Self, MarcError> {
        let tag = Tag::new(tag)?;
        Ok(Self {
            tag,
            ind1: validate_indicator(tag, ind1)?,
            ind2: validate_indicator(tag, ind2)?,
            subfields: subfields.into_iter().collect(),
        })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn set_tag(&mut self, tag: &str) -> Result<(), MarcError> {
        self.tag = Tag::new(tag)?;
        Ok(())
    }

    /// Indicator 1 or 2; any other number is `InvalidIndicatorRequest`.
    pub fn indicator(&self, n: u8) -> Result<char, MarcError> {
        match n {
            1 => Ok(self.ind1),
            2 => Ok(self.ind2),
            _ => Err(invalid_indicator_request(n)),
        }
    }

    pub fn set_indicator(&mut self, n: u8, value: Option<&str>) -> Result<char, MarcError> {
        let slot = match n {
            1 => &mut self.ind1,
            2 => &mut self.ind2,
            _ => return Err(invalid_indicator_request(n)),
        };
        *slot = validate_indicator(self.tag, value)?;
        Ok(*slot)
    }

    pub fn indicators(&self) -> (char, char) {
        (self.ind1, self.ind2)
    }

    pub fn append_subfield(&mut self, subfield: Subfield) -> SubfieldId {
        self.subfields.append(subfield)
    }

    pub fn prepend_subfield(&mut self, subfield: Subfield) -> SubfieldId {
        self.subfields.prepend(subfield)
    }

    /// Inserts next to `anchor`; fails with `InvalidSubfield` when `anchor`
    /// does not belong to this field.
    pub fn insert_subfield(
        &mut self,
        subfield: Subfield,
        anchor: SubfieldId,
        mode: InsertMode,
    ) -> Result<SubfieldId, MarcError> {
        self.subfields
            .insert_relative(subfield, anchor, mode)
            .map_err(|rejected| self.not_a_member(rejected.code()))
    }

    pub fn move_subfield(
        &mut self,
        id: SubfieldId,
        anchor: SubfieldId,
        mode: InsertMode,
    ) -> Result<(), MarcError> {
        if self.subfields.move_relative(id, anchor, mode) {
            Ok(())
        } else {
            Err(self.not_a_member('?'))
        }
    }

    /// Appends in order and returns how many were added.
    pub fn add_subfields(&mut self, subfields: impl IntoIterator<Item = Subfield>) -> usize {
        let before = self.subfields.len();
        self.subfields.extend(subfields);
        self.subfields.len() - before
    }

    pub fn delete_subfield(&mut self, id: SubfieldId) -> Option<Subfield> {
        self.subfields.delete(id)
    }

    pub fn subfield(&self, id: SubfieldId) -> Option<&Subfield> {
        self.subfields.get(id)
    }

    pub fn subfield_mut(&mut self, id: SubfieldId) -> Option<&mut Subfield> {
        self.subfields.get_mut(id)
    }

    pub fn subfield_position(&self, id: SubfieldId) -> Option<usize> {
        self.subfields.position(id)
    }

    /// All subfields in order.
    pub fn subfields(&self) -> impl Iterator<Item = &Subfield> + '_ {
        self.subfields.values()
    }

    pub fn subfields_mut(&mut self) -> impl Iterator<Item = &mut Subfield> + '_ {
        self.subfields.values_mut()
    }

    pub fn subfield_ids(&self) -> impl Iterator<Item = SubfieldId> + '_ {
        self.subfields.ids()
    }

    pub fn subfield_list(&self) -> &OrderedList<Subfield> {
        &self.subfields
    }

    /// First subfield with `code`.
    pub fn get_subfield(&self, code: char) -> Option<&Subfield> {
        self.subfields().find(|sf| sf.code() == code)
    }

    /// Every subfield with `code`. Passing `None` yields nothing.
    pub fn get_subfields(&self, code: Option<char>) -> Vec<&Subfield> {
        let Some(code) = code else {
            return Vec::new();
        };
        self.subfields().filter(|sf| sf.code() == code).collect()
    }

    /// True when no subfield carries data (including when there are none).
    pub fn is_empty(&self) -> bool {
        self.subfields().all(Subfield::is_empty)
    }

    /// `ind1 ∥ ind2 ∥ non-empty subfields ∥ FIELD_TERMINATOR`.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut raw = Vec::new();
        let mut buf = [0u8; 4];
        raw.extend_from_slice(self.ind1.encode_utf8(&mut buf).as_bytes());
        raw.extend_from_slice(self.ind2.encode_utf8(&mut buf).as_bytes());
        for subfield in self.subfields().filter(|sf| !sf.is_empty()) {
            subfield.write_raw(&mut raw);
        }
        raw.push(FIELD_TERMINATOR);
        raw
    }

    /// Flattens subfield data into one display string.
    ///
    /// Codes in `exclude` are skipped. In subject headings (tags starting
    /// with `6`) the subdivisions `v`, `x`, `y`, `z` are always kept and
    /// joined with `" -- "`.
    pub fn format_field(&self, exclude: &[char]) -> String {
        let subject = self.tag.as_str().starts_with('6');
        let mut out = String::new();
        for sf in self.subfields() {
            if subject && SUBDIVISION_CODES.contains(&sf.code()) {
                out.push_str(" -- ");
                out.push_str(sf.data());
            } else if !exclude.contains(&sf.code()) {
                out.push(' ');
                out.push_str(sf.data());
            }
        }
        out.trim().to_string()
    }

    fn not_a_member(&self, code: char) -> MarcError {
        MarcError::new(
            ErrorKind::InvalidSubfield,
            &[("code", &code.to_string()), ("tag", self.tag.as_str())],
        )
    }
}

fn validate_indicator(tag: Tag, indicator: Option<&str>) -> Result<char, MarcError> {
    let Some(value) = indicator else {
        return Ok(' ');
    };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(' '),
        (Some(c), None) => Ok(c),
        _ => Err(MarcError::new(
            ErrorKind::InvalidIndicator,
            &[("tag", tag.as_str()), ("indicator", value)],
        )),
    }
}

fn invalid_indicator_request(n: u8) -> MarcError {
    MarcError::new(
        ErrorKind::InvalidIndicatorRequest,
        &[("indicator", &n.to_string())],
    )
}
