use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::record::{
    json_id, json_text, lookup, pretty_json, required, split_segments, ClientRecord,
    DEFAULT_JSON_INDENT,
};
use super::validate::{
    ensure, is_valid_id, is_valid_name, is_valid_phone, parse_id_text, Field,
};
use crate::error::{ClientError, Result};

/// The older three-field client shape: id, name and phone.
///
/// Kept so that data written in that shape can still be read. Equality is
/// by phone, as with [`ClientRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct ClientBrief {
    #[serde(rename = "client_id")]
    id: i64,
    name: String,
    phone: String,
}

impl ClientBrief {
    pub fn new(id: i64, name: impl Into<String>, phone: impl Into<String>) -> Result<Self> {
        let (name, phone) = (name.into(), phone.into());
        ensure(Field::Id, is_valid_id(id))?;
        ensure(Field::Name, is_valid_name(&name))?;
        ensure(Field::Phone, is_valid_phone(&phone))?;
        Ok(Self { id, name, phone })
    }

    pub fn from_record(record: &ClientRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            phone: record.phone().to_string(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        let Value::Object(map) = value else {
            return Err(ClientError::NotAnObject);
        };
        let id = lookup(&map, Field::Id);
        let name = required(&map, Field::Name)?;
        let phone = required(&map, Field::Phone)?;

        Self::new(
            json_id(id)?,
            json_text(name, Field::Name)?,
            json_text(phone, Field::Phone)?,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        pretty_json(self, DEFAULT_JSON_INDENT)
    }

    /// `client_id`, `name` and `phone`, in that order
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(Field::Id.key().to_string(), Value::from(self.id));
        map.insert(Field::Name.key().to_string(), Value::from(self.name.as_str()));
        map.insert(Field::Phone.key().to_string(), Value::from(self.phone.as_str()));
        map
    }

    /// Write `"<id>, <name>, <phone>"`, refusing names that would not parse back
    pub fn to_delimited_string(&self) -> Result<String> {
        if self.name.trim() != self.name {
            return Err(ClientError::NotDelimitable(Field::Name));
        }
        Ok(format!("{}, {}, {}", self.id, self.name, self.phone))
    }
}

impl FromStr for ClientBrief {
    type Err = ClientError;

    /// Parse `"<id>, <name>, <phone>"`
    fn from_str(s: &str) -> Result<Self> {
        let parts = split_segments(s, 3)?;
        let id = parse_id_text(parts[0])?;
        Self::new(id, parts[1], parts[2])
    }
}

impl From<&ClientRecord> for ClientBrief {
    fn from(record: &ClientRecord) -> Self {
        Self::from_record(record)
    }
}

impl fmt::Display for ClientBrief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client {}, ID: {}, Phone: {}",
            self.name, self.id, self.phone
        )
    }
}

impl PartialEq for ClientBrief {
    fn eq(&self, other: &Self) -> bool {
        self.phone == other.phone
    }
}

impl Eq for ClientBrief {}
