use crate::{error::IndexError, record::FieldValues, value::Value};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

///
/// KeyField
///
/// Name of the record field the view orders and searches by.
/// Never empty; fixed for the lifetime of a view.
///

#[derive(Clone, Debug, Deref, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyField(String);

impl KeyField {
    pub fn new(name: impl Into<String>) -> Result<Self, IndexError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IndexError::invalid_index("key field name must not be empty"));
        }

        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read this field from a record; missing fields read as `Null`.
    pub fn read<R: FieldValues + ?Sized>(&self, record: &R) -> Value {
        record.get_value(&self.0).unwrap_or(Value::Null)
    }

    /// Read this field from a record, failing if it is absent.
    pub fn require<R: FieldValues + ?Sized>(&self, record: &R) -> Result<Value, IndexError> {
        record
            .get_value(&self.0)
            .ok_or_else(|| IndexError::missing_key_field(&self.0))
    }
}

impl TryFrom<String> for KeyField {
    type Error = IndexError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<&str> for KeyField {
    type Error = IndexError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<KeyField> for String {
    fn from(field: KeyField) -> Self {
        field.0
    }
}

impl AsRef<str> for KeyField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Row;

    #[test]
    fn blank_names_are_rejected() {
        assert!(KeyField::new("").is_err());
        assert!(KeyField::new("  ").is_err());
        assert_eq!(KeyField::new("id").expect("field").as_str(), "id");
    }

    #[test]
    fn missing_fields_read_as_null_but_fail_require() {
        let field = KeyField::new("id").expect("field");
        let row = Row::new().with("name", "ann");

        assert_eq!(field.read(&row), Value::Null);
        assert!(field.require(&row).is_err());
    }
}
