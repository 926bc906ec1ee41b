use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use super::error::PrepareError;

/// Longest username accepted, in bytes.
pub const USERNAME_SIZE: usize = 32;
/// Longest email accepted, in bytes.
pub const EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
// Text columns keep one extra byte so a full-length value is still
// NUL terminated on disk.
const USERNAME_FIELD_SIZE: usize = USERNAME_SIZE + 1;
const EMAIL_FIELD_SIZE: usize = EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_FIELD_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_FIELD_SIZE + EMAIL_FIELD_SIZE;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RowRepr")]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

// Deserialized rows go through the same checks as `Row::new`
#[derive(Deserialize)]
struct RowRepr {
    id: u32,
    username: String,
    email: String,
}

impl TryFrom<RowRepr> for Row {
    type Error = PrepareError;

    fn try_from(repr: RowRepr) -> Result<Self, Self::Error> {
        Row::new(repr.id, &repr.username, &repr.email)
    }
}

impl Row {
    /// Text columns are NUL terminated on disk, so they may not contain NUL.
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self, PrepareError> {
        if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
            return Err(PrepareError::StringTooLong);
        }
        if username.contains('\0') || email.contains('\0') {
            return Err(PrepareError::SyntaxError);
        }
        Ok(Row {
            id,
            username: username.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Packs the row into the first `ROW_SIZE` bytes of `dst`.
    ///
    /// Unused bytes of the text columns are zeroed. Panics if `dst` is
    /// shorter than `ROW_SIZE`.
    pub fn serialize(&self, dst: &mut [u8]) {
        let dst = &mut dst[..ROW_SIZE];
        LittleEndian::write_u32(&mut dst[ID_OFFSET..USERNAME_OFFSET], self.id);
        write_text(&mut dst[USERNAME_OFFSET..EMAIL_OFFSET], &self.username);
        write_text(&mut dst[EMAIL_OFFSET..ROW_SIZE], &self.email);
    }

    /// Unpacks a row from the first `ROW_SIZE` bytes of `src`.
    ///
    /// The bytes are trusted: lengths were checked when the row was built.
    pub fn deserialize(src: &[u8]) -> Self {
        let src = &src[..ROW_SIZE];
        Self {
            id: LittleEndian::read_u32(&src[ID_OFFSET..USERNAME_OFFSET]),
            username: read_text(&src[USERNAME_OFFSET..EMAIL_OFFSET]),
            email: read_text(&src[EMAIL_OFFSET..ROW_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.id, self.username, self.email)
    }
}

fn write_text(field: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field[bytes.len()..].fill(0);
}

fn read_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into()
}
