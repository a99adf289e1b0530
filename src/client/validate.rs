use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::{ClientError, Result};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ -]+$").expect("name pattern compiles"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^8 \([0-9]{3}\) [0-9]{3}-[0-9]{2}-[0-9]{2}$").expect("phone pattern compiles")
});

/// One of the five fields of a client record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    OwnershipType,
    Address,
    Phone,
}

impl Field {
    /// Canonical key used in JSON documents and mappings
    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "client_id",
            Field::Name => "name",
            Field::OwnershipType => "ownership_type",
            Field::Address => "address",
            Field::Phone => "phone",
        }
    }

    /// Label used in the human-readable summary line
    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::OwnershipType => "Ownership Type",
            Field::Address => "Address",
            Field::Phone => "Phone",
        }
    }

    pub fn invalid_message(&self) -> &'static str {
        match self {
            Field::Id => "Invalid client ID.",
            Field::Name => "Invalid name.",
            Field::OwnershipType => "Invalid ownership type.",
            Field::Address => "Invalid address.",
            Field::Phone => "Invalid phone number.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client_id" | "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "ownership_type" | "ownershipType" => Ok(Field::OwnershipType),
            "address" => Ok(Field::Address),
            "phone" => Ok(Field::Phone),
            _ => Err(ClientError::UnknownField(s.to_string())),
        }
    }
}

pub fn is_valid_id(id: i64) -> bool {
    id > 0
}

/// Latin or Cyrillic letters, spaces and hyphens; nothing else
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && NAME_RE.is_match(name)
}

pub fn is_valid_ownership_type(ownership_type: &str) -> bool {
    is_valid_name(ownership_type)
}

pub fn is_valid_address(address: &str) -> bool {
    !address.is_empty()
}

/// Matches exactly `8 (XXX) XXX-XX-XX`
pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty() && PHONE_RE.is_match(phone)
}

/// Check one textual value against its field's predicate.
///
/// Id text must first parse as an integer; anything else is a format error.
pub fn validate_field(field: Field, value: &str) -> Result<()> {
    let valid = match field {
        Field::Id => is_valid_id(parse_id_text(value)?),
        Field::Name => is_valid_name(value),
        Field::OwnershipType => is_valid_ownership_type(value),
        Field::Address => is_valid_address(value),
        Field::Phone => is_valid_phone(value),
    };

    ensure(field, valid)
}

/// Parse id text. Integers outside the `i64` range are rejected as invalid
/// ids, the same as out-of-range numbers in JSON.
pub(crate) fn parse_id_text(text: &str) -> Result<i64> {
    text.parse::<i64>().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            log::debug!("id {text} is out of range");
            ClientError::InvalidField(Field::Id)
        }
        _ => ClientError::IdNotInteger(text.to_string()),
    })
}

pub(crate) fn ensure(field: Field, valid: bool) -> Result<()> {
    if valid {
        return Ok(());
    }
    log::debug!("rejected value for field {}", field.key());
    Err(ClientError::InvalidField(field))
}
