//! 12-byte document identifiers.
//!
//! An [`ObjectId`] is the document store's content-addressable identifier:
//! a 4-byte big-endian timestamp (seconds since the Unix epoch) followed by
//! 8 bytes of machine/process/counter data. Its canonical textual form is
//! 24 hexadecimal digits.
//!
//! ```
//! use docsieve::ObjectId;
//!
//! let id = ObjectId::parse_str("6124e80f3f5fc839830c1f69").unwrap();
//! assert_eq!(id.timestamp(), 0x6124_e80f);
//! assert_eq!(id.to_string(), "6124e80f3f5fc839830c1f69");
//! ```

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static CANONICAL_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-fA-F]{24}$").expect("object id pattern compiles"));

/// Error returned when a string is not a canonical ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a 24 digit hexadecimal object id")]
pub struct ObjectIdError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }

    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parse the canonical 24-hex-digit form. Upper and lower case are accepted.
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if !CANONICAL_HEX.is_match(s) {
            return Err(ObjectIdError(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ObjectIdError(s.to_string()))?;
        }
        Ok(ObjectId(bytes))
    }

    /// Seconds since the Unix epoch encoded in the leading four bytes.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
    }
}
