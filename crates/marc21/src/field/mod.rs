//! Field model: tags, subfields, control fields and data fields.

mod control;
mod data;
mod subfield;
mod tag;

pub use control::ControlField;
pub use data::{DataField, SubfieldId};
pub use subfield::Subfield;
pub use tag::Tag;

/// Subfield codes left out of [`Field::format_field`] by default.
pub const DEFAULT_FORMAT_EXCLUDE: [char; 1] = ['2'];

/// One variable field of a record.
///
/// Which variant a decoded field becomes depends only on its tag: tags whose
/// integer value is below 10 are control fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Control(ControlField),
    Data(DataField),
}

impl Field {
    pub fn tag(&self) -> Tag {
        match self {
            Field::Control(field) => field.tag(),
            Field::Data(field) => field.tag(),
        }
    }

    pub fn set_tag(&mut self, tag: &str) -> crate::Result<()> {
        match self {
            Field::Control(field) => field.set_tag(tag),
            Field::Data(field) => field.set_tag(tag),
        }
    }

    pub fn is_control_field(&self) -> bool {
        matches!(self, Field::Control(_))
    }

    pub fn is_data_field(&self) -> bool {
        matches!(self, Field::Data(_))
    }

    pub fn as_control(&self) -> Option<&ControlField> {
        match self {
            Field::Control(field) => Some(field),
            Field::Data(_) => None,
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut ControlField> {
        match self {
            Field::Control(field) => Some(field),
            Field::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&DataField> {
        match self {
            Field::Data(field) => Some(field),
            Field::Control(_) => None,
        }
    }

    pub fn as_data_mut(&mut self) -> Option<&mut DataField> {
        match self {
            Field::Data(field) => Some(field),
            Field::Control(_) => None,
        }
    }

    /// Empty fields are left out of encoded records.
    pub fn is_empty(&self) -> bool {
        match self {
            Field::Control(field) => field.is_empty(),
            Field::Data(field) => field.is_empty(),
        }
    }

    pub fn to_raw(&self) -> Vec<u8> {
        match self {
            Field::Control(field) => field.to_raw(),
            Field::Data(field) => field.to_raw(),
        }
    }

    /// Human-readable rendering: control data verbatim, data fields joined
    /// per [`DataField::format_field`].
    pub fn format_field(&self, exclude: &[char]) -> String {
        match self {
            Field::Control(field) => field.data().to_string(),
            Field::Data(field) => field.format_field(exclude),
        }
    }
}

impl From<ControlField> for Field {
    fn from(field: ControlField) -> Self {
        Field::Control(field)
    }
}

impl From<DataField> for Field {
    fn from(field: DataField) -> Self {
        Field::Data(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accessors() {
        let mut control: Field = ControlField::new("001", "123").unwrap().into();
        assert!(control.is_control_field());
        assert!(control.as_data().is_none());
        control.as_control_mut().unwrap().set_data("456");
        assert_eq!(control.format_field(&DEFAULT_FORMAT_EXCLUDE), "456");

        let data: Field = DataField::new("245", [Subfield::new('a', "T")], None, None)
            .unwrap()
            .into();
        assert!(data.is_data_field());
        assert_eq!(data.tag(), "245");
        assert_eq!(data.to_raw(), b"  \x1faT\x1e");
    }

    #[test]
    fn test_default_exclude_drops_source_code() {
        let field: Field = DataField::new(
            "650",
            [
                Subfield::new('a', "Cats"),
                Subfield::new('v', "Juvenile fiction."),
                Subfield::new('2', "lcsh"),
            ],
            None,
            Some("0"),
        )
        .unwrap()
        .into();
        assert_eq!(
            field.format_field(&DEFAULT_FORMAT_EXCLUDE),
            "Cats -- Juvenile fiction."
        );
    }

    #[test]
    fn test_set_tag_validates() {
        let mut field: Field = ControlField::new("008", "x").unwrap().into();
        assert!(field.set_tag("0x").is_err());
        field.set_tag("007").unwrap();
        assert_eq!(field.tag(), "007");
    }
}
