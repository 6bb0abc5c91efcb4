//! Control field: a tag plus unstructured data.

use super::Tag;
use crate::constants::FIELD_TERMINATOR;
use crate::error::MarcError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlField {
    tag: Tag,
    data: String,
}

impl ControlField {
    /// Fails with `InvalidTag` unless `tag` is three alphanumerics.
    pub fn new(tag: &str, data: impl Into<String>) -> Result<Self, MarcError> {
        Ok(Self {
            tag: Tag::new(tag)?,
            data: data.into(),
        })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn set_tag(&mut self, tag: &str) -> Result<(), MarcError> {
        self.tag = Tag::new(tag)?;
        Ok(())
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `data ∥ FIELD_TERMINATOR`.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.data.len() + 1);
        raw.extend_from_slice(self.data.as_bytes());
        raw.push(FIELD_TERMINATOR);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_raw_form() {
        let field = ControlField::new("001", "ocm123").unwrap();
        assert_eq!(field.to_raw(), b"ocm123\x1e");
    }

    #[test]
    fn test_rejects_bad_tag() {
        let err = ControlField::new("1", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTag);
        let mut field = ControlField::new("005", "x").unwrap();
        assert!(field.set_tag("00").is_err());
        assert_eq!(field.tag(), "005");
    }

    #[test]
    fn test_emptiness() {
        let mut field = ControlField::new("003", "").unwrap();
        assert!(field.is_empty());
        field.set_data("0");
        assert!(!field.is_empty());
    }
}
