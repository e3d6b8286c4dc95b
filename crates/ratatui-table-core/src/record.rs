use crate::error::RecordError;
use crate::value::Value;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

/// Field name under which a record's [`RecordId`] is exposed to columns.
pub const ID_FIELD: &str = "id";

/// Stable row key of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Integer(i) => write!(f, "{i}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(i: i64) -> Self {
        RecordId::Integer(i)
    }
}

impl From<i32> for RecordId {
    fn from(i: i32) -> Self {
        RecordId::Integer(i as i64)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl From<&RecordId> for Value {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Integer(i) => Value::Integer(*i),
            RecordId::Text(s) => Value::Text(s.clone()),
        }
    }
}

/// One row of data: an id plus an open-ended set of named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: RecordId,
    id_value: Value,
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        let id = id.into();
        Self {
            id_value: Value::from(&id),
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field. Setting [`ID_FIELD`] is ignored; the id is fixed at construction.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == ID_FIELD {
            return;
        }
        self.fields.insert(key, value.into());
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the value stored under `key`, or `None` if the record has no such field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == ID_FIELD {
            return Some(&self.id_value);
        }
        self.fields.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        std::iter::once((ID_FIELD, &self.id_value))
            .chain(self.fields.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

pub fn records_from_json_str(input: &str) -> Result<Vec<Record>, RecordError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    records_from_json_value(value)
}

pub fn records_from_reader(reader: impl Read) -> Result<Vec<Record>, RecordError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    records_from_json_value(value)
}

/// Converts a JSON array of objects into records.
///
/// Each object needs an integer or string `id`, unique across the array.
pub fn records_from_json_value(value: serde_json::Value) -> Result<Vec<Record>, RecordError> {
    let serde_json::Value::Array(items) = value else {
        log::warn!("rejecting record set: top-level JSON is not an array");
        return Err(RecordError::NotAnArray);
    };

    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = record_from_json(index, item).inspect_err(|err| {
            log::warn!("rejecting record set: {err}");
        })?;
        if !seen.insert(record.id.clone()) {
            log::warn!("rejecting record set: duplicate id `{}`", record.id);
            return Err(RecordError::DuplicateId { id: record.id });
        }
        out.push(record);
    }
    log::debug!("loaded {} records", out.len());
    Ok(out)
}

fn record_from_json(index: usize, item: serde_json::Value) -> Result<Record, RecordError> {
    let serde_json::Value::Object(mut map) = item else {
        return Err(RecordError::NotAnObject { index });
    };
    let id = match map.remove(ID_FIELD) {
        None => return Err(RecordError::MissingId { index }),
        Some(serde_json::Value::String(s)) => RecordId::Text(s),
        Some(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(i) => RecordId::Integer(i),
            None => return Err(RecordError::InvalidId { index }),
        },
        Some(_) => return Err(RecordError::InvalidId { index }),
    };

    let mut record = Record::new(id);
    for (key, value) in map {
        record.fields.insert(key, Value::from(value));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_readable_as_a_field() {
        let r = Record::new(7).with("name", "Bob");
        assert_eq!(r.get("id"), Some(&Value::Integer(7)));
        assert_eq!(r.get("name"), Some(&Value::from("Bob")));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn set_cannot_overwrite_id() {
        let r = Record::new("a").with("id", 99);
        assert_eq!(r.id(), &RecordId::from("a"));
        assert_eq!(r.get("id"), Some(&Value::from("a")));
    }

    #[test]
    fn loads_json_records() {
        let records =
            records_from_json_str(r#"[{"id":1,"name":"Bob"},{"id":"x","age":3.5}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), &RecordId::Integer(1));
        assert_eq!(records[1].get("age"), Some(&Value::Float(3.5)));
        assert_eq!(records[1].get("name"), None);
    }

    #[test]
    fn rejects_bad_record_sets() {
        assert!(matches!(
            records_from_json_str(r#"{"id":1}"#),
            Err(RecordError::NotAnArray)
        ));
        assert!(matches!(
            records_from_json_str(r#"[{"id":1}, 3]"#),
            Err(RecordError::NotAnObject { index: 1 })
        ));
        assert!(matches!(
            records_from_json_str(r#"[{"name":"x"}]"#),
            Err(RecordError::MissingId { index: 0 })
        ));
        assert!(matches!(
            records_from_json_str(r#"[{"id":1.5}]"#),
            Err(RecordError::InvalidId { index: 0 })
        ));
        assert!(matches!(
            records_from_json_str(r#"[{"id":1},{"id":1}]"#),
            Err(RecordError::DuplicateId { id: RecordId::Integer(1) })
        ));
        assert!(matches!(
            records_from_json_str("[{"),
            Err(RecordError::Json(_))
        ));
    }
}
