use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::validate::{
    ensure, is_valid_address, is_valid_id, is_valid_name, is_valid_ownership_type,
    is_valid_phone, parse_id_text, Field,
};
use crate::error::{ClientError, Result};

/// Indent width used by [`ClientRecord::to_json`]
pub const DEFAULT_JSON_INDENT: usize = 4;

/// A business client with five validated fields.
///
/// Every field is checked on construction and on each setter call, so a
/// `ClientRecord` never holds an invalid value. Equality and hashing only
/// look at the phone number; use [`ClientRecord::same_fields`] to compare
/// all five fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ClientRecord {
    #[serde(rename = "client_id")]
    id: i64,
    name: String,
    ownership_type: String,
    address: String,
    phone: String,
}

impl ClientRecord {
    /// Build a record, validating fields in declaration order.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        ownership_type: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        let (name, ownership_type, address, phone) =
            (name.into(), ownership_type.into(), address.into(), phone.into());

        ensure(Field::Id, is_valid_id(id))?;
        ensure(Field::Name, is_valid_name(&name))?;
        ensure(Field::OwnershipType, is_valid_ownership_type(&ownership_type))?;
        ensure(Field::Address, is_valid_address(&address))?;
        ensure(Field::Phone, is_valid_phone(&phone))?;

        Ok(Self {
            id,
            name,
            ownership_type,
            address,
            phone,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ownership_type(&self) -> &str {
        &self.ownership_type
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Current value of a field rendered as text
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.to_string(),
            Field::Name => self.name.clone(),
            Field::OwnershipType => self.ownership_type.clone(),
            Field::Address => self.address.clone(),
            Field::Phone => self.phone.clone(),
        }
    }

    pub fn set_id(&mut self, id: i64) -> Result<()> {
        ensure(Field::Id, is_valid_id(id))?;
        self.id = id;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        ensure(Field::Name, is_valid_name(&name))?;
        self.name = name;
        Ok(())
    }

    pub fn set_ownership_type(&mut self, ownership_type: impl Into<String>) -> Result<()> {
        let ownership_type = ownership_type.into();
        ensure(Field::OwnershipType, is_valid_ownership_type(&ownership_type))?;
        self.ownership_type = ownership_type;
        Ok(())
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Result<()> {
        let address = address.into();
        ensure(Field::Address, is_valid_address(&address))?;
        self.address = address;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<()> {
        let phone = phone.into();
        ensure(Field::Phone, is_valid_phone(&phone))?;
        self.phone = phone;
        Ok(())
    }

    /// Compare every field, unlike `==` which only compares phones
    pub fn same_fields(&self, other: &ClientRecord) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.ownership_type == other.ownership_type
            && self.address == other.address
            && self.phone == other.phone
    }

    /// Parse `"<id>, <name>, <ownership type>, <address>, <phone>"`
    pub fn from_delimited(s: &str) -> Result<Self> {
        let parts = split_segments(s, 5)?;
        let id = parse_id_text(parts[0])?;
        log::debug!("parsed comma-separated client {id}");
        Self::new(id, parts[1], parts[2], parts[3], parts[4])
    }

    /// Write the comma-separated form accepted by [`ClientRecord::from_delimited`].
    ///
    /// Fails for values containing a comma or surrounding whitespace, since
    /// those would not come back unchanged.
    pub fn to_delimited_string(&self) -> Result<String> {
        for field in [Field::Name, Field::OwnershipType, Field::Address, Field::Phone] {
            let value = self.get(field);
            if value.contains(',') || value.trim() != value {
                return Err(ClientError::NotDelimitable(field));
            }
        }

        Ok(format!(
            "{}, {}, {}, {}, {}",
            self.id, self.name, self.ownership_type, self.address, self.phone
        ))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        let Value::Object(map) = value else {
            return Err(ClientError::NotAnObject);
        };
        let record = Self::try_from(map)?;
        log::debug!("parsed JSON client {}", record.id);
        Ok(record)
    }

    /// Pretty JSON with the canonical keys, non-ASCII text left unescaped
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with_indent(DEFAULT_JSON_INDENT)
    }

    pub fn to_json_with_indent(&self, indent: usize) -> Result<String> {
        pretty_json(self, indent)
    }

    /// Canonical key to value mapping, in canonical key order
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(Field::Id.key().to_string(), Value::from(self.id));
        map.insert(Field::Name.key().to_string(), Value::from(self.name.as_str()));
        map.insert(
            Field::OwnershipType.key().to_string(),
            Value::from(self.ownership_type.as_str()),
        );
        map.insert(Field::Address.key().to_string(), Value::from(self.address.as_str()));
        map.insert(Field::Phone.key().to_string(), Value::from(self.phone.as_str()));
        map
    }

    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<Map<String, Value>> for ClientRecord {
    type Error = ClientError;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let id = lookup(&map, Field::Id);
        let name = required(&map, Field::Name)?;
        let ownership_type = required(&map, Field::OwnershipType)?;
        let address = required(&map, Field::Address)?;
        let phone = required(&map, Field::Phone)?;

        Self::new(
            json_id(id)?,
            json_text(name, Field::Name)?,
            json_text(ownership_type, Field::OwnershipType)?,
            json_text(address, Field::Address)?,
            json_text(phone, Field::Phone)?,
        )
    }
}

impl FromStr for ClientRecord {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_delimited(s)
    }
}

impl fmt::Display for ClientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client {}, {}: {}, {}: {}, {}: {}, {}: {}",
            self.name,
            Field::Id.label(),
            self.id,
            Field::OwnershipType.label(),
            self.ownership_type,
            Field::Address.label(),
            self.address,
            Field::Phone.label(),
            self.phone
        )
    }
}

impl PartialEq for ClientRecord {
    fn eq(&self, other: &Self) -> bool {
        self.phone == other.phone
    }
}

impl Eq for ClientRecord {}

impl Hash for ClientRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phone.hash(state);
    }
}

pub(crate) fn pretty_json<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Split on commas and trim, requiring exactly `expected` segments
pub(crate) fn split_segments(s: &str, expected: usize) -> Result<Vec<&str>> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(ClientError::SegmentCount {
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

/// Look up a field by canonical key, falling back to its camelCase alias
pub(crate) fn lookup(map: &Map<String, Value>, field: Field) -> Option<&Value> {
    let alias = match field {
        Field::Id => Some("id"),
        Field::OwnershipType => Some("ownershipType"),
        _ => None,
    };
    map.get(field.key())
        .or_else(|| alias.and_then(|alias| map.get(alias)))
}

pub(crate) fn required(map: &Map<String, Value>, field: Field) -> Result<&Value> {
    lookup(map, field).ok_or(ClientError::MissingKey(field.key()))
}

/// An absent or non-integer id fails id validation
pub(crate) fn json_id(value: Option<&Value>) -> Result<i64> {
    value
        .and_then(Value::as_i64)
        .ok_or(ClientError::InvalidField(Field::Id))
}

pub(crate) fn json_text(value: &Value, field: Field) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ClientError::InvalidField(field))
}
