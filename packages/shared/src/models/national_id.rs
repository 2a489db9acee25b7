use std::fmt;

pub const NATIONAL_ID_LEN: usize = 10;

/// A cédula: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

#[derive(Debug, PartialEq)]
pub enum NationalIdError {
    Empty,
    Malformed,
}

impl fmt::Display for NationalIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NationalIdError::Empty => write!(f, "La cédula es requerida"),
            NationalIdError::Malformed => {
                write!(f, "La cédula debe tener 10 dígitos numéricos")
            }
        }
    }
}

impl std::error::Error for NationalIdError {}

impl NationalId {
    pub fn parse(value: &str) -> Result<Self, NationalIdError> {
        if value.is_empty() {
            return Err(NationalIdError::Empty);
        }
        if value.len() != NATIONAL_ID_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NationalIdError::Malformed);
        }
        Ok(NationalId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
