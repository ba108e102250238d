//! Record access: how the view reads a key value out of a record.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

///
/// FieldValues
///
/// Named field access for records held by an indexed view.
/// Records are only ever compared through the value this returns for the
/// key field, never structurally.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn get_value(&self, field: &str) -> Option<Value> {
        (**self).get_value(field)
    }
}

impl FieldValues for BTreeMap<String, Value> {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl<S: std::hash::BuildHasher> FieldValues for HashMap<String, Value, S> {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

///
/// Row
///
/// Map-backed record with deterministic field order.
/// Deserializes from a flat JSON object.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FieldValues for Row {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.fields.get(field).cloned()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_deserialize_from_json_objects() {
        let rows: Vec<Row> = serde_json::from_str(r#"[{"id": 1, "name": "ann"}, {"id": 2}]"#)
            .expect("rows should deserialize");

        assert_eq!(rows[0].get_value("name"), Some(Value::from("ann")));
        assert_eq!(rows[1].get_value("id"), Some(Value::Int(2)));
        assert_eq!(rows[1].get_value("name"), None);
    }

    #[test]
    fn maps_and_references_are_records() {
        let mut map = HashMap::new();
        map.insert("id".to_string(), Value::Int(9));
        let by_ref = &map;

        assert_eq!(by_ref.get_value("id"), Some(Value::Int(9)));
    }

    #[test]
    fn rows_collect_from_pairs() {
        let row: Row = [("id", Value::Int(1)), ("tag", Value::Null)]
            .into_iter()
            .collect();

        assert_eq!(row.fields().count(), 2);
        assert_eq!(row.get("tag"), Some(&Value::Null));
    }
}
