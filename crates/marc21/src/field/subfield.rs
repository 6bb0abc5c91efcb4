//! Subfield: a one-character code plus text data.

use std::fmt;

use crate::constants::SUBFIELD_INDICATOR;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subfield {
    code: char,
    data: String,
}

impl Subfield {
    pub fn new(code: char, data: impl Into<String>) -> Self {
        Self {
            code,
            data: data.into(),
        }
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn set_code(&mut self, code: char) {
        self.code = code;
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    /// True when the subfield carries no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `SUBFIELD_INDICATOR ∥ code ∥ data`.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(1 + self.code.len_utf8() + self.data.len());
        self.write_raw(&mut raw);
        raw
    }

    pub(crate) fn write_raw(&self, out: &mut Vec<u8>) {
        let mut code = [0u8; 4];
        out.push(SUBFIELD_INDICATOR);
        out.extend_from_slice(self.code.encode_utf8(&mut code).as_bytes());
        out.extend_from_slice(self.data.as_bytes());
    }
}

impl fmt::Display for Subfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.data)
    }
}
