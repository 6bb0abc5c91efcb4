//! Validated three-character field tag.

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, MarcError};

/// A field tag: exactly three ASCII alphanumeric characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 3]);

impl Tag {
    /// Validates `tag` against `[0-9A-Za-z]{3}`.
    ///
    /// ```
    /// use marc21::Tag;
    ///
    /// assert!(Tag::new("245").is_ok());
    /// assert!(Tag::new("LDR").is_ok());
    /// assert!(Tag::new("24").is_err());
    /// assert!(Tag::new("24 ").is_err());
    /// ```
    pub fn new(tag: &str) -> Result<Self, MarcError> {
        match tag.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_alphanumeric) => Ok(Tag([a, b, c])),
            _ => Err(MarcError::new(ErrorKind::InvalidTag, &[("tag", tag)])),
        }
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII alphanumerics.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// Numeric value when the tag is all digits.
    pub fn number(&self) -> Option<u16> {
        if self.0.iter().all(u8::is_ascii_digit) {
            self.as_str().parse().ok()
        } else {
            None
        }
    }

    /// Control fields are exactly the tags whose integer value is below 10.
    pub fn is_control(&self) -> bool {
        matches!(self.number(), Some(n) if n < 10)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = MarcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::new(s)
    }
}

impl TryFrom<&str> for Tag {
    type Error = MarcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Tag::new(value)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_dispatch_matrix() {
        for (tag, control) in [
            ("001", true),
            ("008", true),
            ("009", true),
            ("010", false),
            ("245", false),
            ("00A", false),
            ("LDR", false),
        ] {
            assert_eq!(Tag::new(tag).unwrap().is_control(), control, "{tag}");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for tag in ["", "1", "12", "1234", "2 5", "24\u{e9}", "24-"] {
            let err = Tag::new(tag).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTag, "{tag}");
        }
    }

    #[test]
    fn test_compares_with_str() {
        let tag: Tag = "650".parse().unwrap();
        assert_eq!(tag, "650");
        assert_eq!(tag.to_string(), "650");
        assert_eq!(tag.number(), Some(650));
    }
}
