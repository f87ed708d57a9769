use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::ModelError;
use crate::utils::FtrDateTime;

pub const UNIQUE_IDENTIFIER: &str = "unique_identifier";
pub const CREATED_BY: &str = "created_by";
pub const CREATED_AT: &str = "created_at";
pub const CREATED_ORGANISATION: &str = "created_organisation";
pub const LAST_UPDATED_AT: &str = "last_updated_at";
pub const SYNCED: &str = "synced";

/// Generic key/value document shared by every record type
///
/// Keys are strings, values are arbitrary JSON. Storing `null` under a key
/// removes the key, so an absent field and a null field read the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseModel {
    fields: Map<String, Value>,
}

impl BaseModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized document; the top-level value must be an object
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ModelError::ParseError(format!(
                "expected a JSON object, found {}",
                other
            ))),
        }
    }

    pub fn create_unique_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Store `value` under `key`
    ///
    /// The unique identifier can only be written while it is still unset.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        if key == UNIQUE_IDENTIFIER && self.fields.contains_key(UNIQUE_IDENTIFIER) {
            return Err(ModelError::ImmutableField(key.to_string()));
        }
        self.set(key, value.into());
        Ok(())
    }

    /// Unchecked write for keys the caller knows are not the identifier
    pub(crate) fn set(&mut self, key: &str, value: Value) {
        match value {
            Value::Null => {
                self.fields.shift_remove(key);
            }
            value => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String form of the value under `key`; numbers and booleans are coerced
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Null => None,
            value => Some(coerce_string(value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of the document restricted to `keys`; keys not present are skipped
    pub fn project<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Map<String, Value> {
        keys.into_iter()
            .filter_map(|key| {
                self.fields
                    .get(key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect()
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.fields.get(UNIQUE_IDENTIFIER).and_then(Value::as_str)
    }

    pub fn created_by(&self) -> Option<String> {
        self.get_string(CREATED_BY)
    }

    pub fn set_created_by(&mut self, created_by: &str) {
        self.set(CREATED_BY, Value::from(created_by));
    }

    pub fn last_updated_at(&self) -> Option<String> {
        self.get_string(LAST_UPDATED_AT)
    }

    pub fn set_last_updated_at(&mut self, at: &FtrDateTime) {
        self.set(LAST_UPDATED_AT, Value::from(at.default_format()));
    }

    pub fn is_synced(&self) -> bool {
        as_flag(self.fields.get(SYNCED))
    }

    pub fn set_synced(&mut self, synced: bool) {
        self.set(SYNCED, Value::Bool(synced));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// Text form of a JSON value: strings verbatim, everything else as JSON text
pub(crate) fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Boolean reading of a stored flag; documents from older clients carry "true" or 1
pub(crate) fn as_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag == "true",
        Some(Value::Number(flag)) => flag.as_i64() == Some(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(BaseModel::from_json(r#"{"a":1}"#).is_ok());
        assert!(matches!(
            BaseModel::from_json("[1,2]"),
            Err(ModelError::ParseError(_))
        ));
        assert!(matches!(
            BaseModel::from_json("{not json"),
            Err(ModelError::JsonError(_))
        ));
    }

    #[test]
    fn test_put_null_removes_key() {
        let mut model = BaseModel::new();
        model.put("name", "kid").unwrap();
        assert!(model.contains_key("name"));
        model.put("name", Value::Null).unwrap();
        assert!(!model.contains_key("name"));
    }

    #[test]
    fn test_unique_id_is_write_once() {
        let mut model = BaseModel::new();
        model.put(UNIQUE_IDENTIFIER, BaseModel::create_unique_id()).unwrap();
        let id = model.unique_id().unwrap().to_string();

        let err = model.put(UNIQUE_IDENTIFIER, "other").unwrap_err();
        assert!(matches!(err, ModelError::ImmutableField(_)));
        assert_eq!(model.unique_id(), Some(id.as_str()));
    }

    #[test]
    fn test_get_string_coerces_scalars() {
        let model = BaseModel::from_json(r#"{"a":1,"b":true,"c":"x","d":null}"#).unwrap();
        assert_eq!(model.get_string("a").as_deref(), Some("1"));
        assert_eq!(model.get_string("b").as_deref(), Some("true"));
        assert_eq!(model.get_string("c").as_deref(), Some("x"));
        assert_eq!(model.get_string("d"), None);
        assert_eq!(model.get_string("missing"), None);
    }

    #[test]
    fn test_project_skips_absent_keys() {
        let model = BaseModel::from_json(r#"{"a":"1","b":"2","c":"3"}"#).unwrap();
        let projected = model.project(["a", "c", "z"]);
        assert_eq!(Value::Object(projected), json!({"a": "1", "c": "3"}));
    }

    #[test]
    fn test_document_keeps_key_order() {
        let json = r#"{"zeta":"1","alpha":"2","mid":{"y":1,"b":2}}"#;
        let mut model = BaseModel::from_json(json).unwrap();
        assert_eq!(model.to_json_string(), json);
        assert_eq!(model.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);

        model.put("zeta", Value::Null).unwrap();
        model.put("added", "3").unwrap();
        assert_eq!(model.keys().collect::<Vec<_>>(), vec!["alpha", "mid", "added"]);
    }

    #[test]
    fn test_synced_flag() {
        let mut model = BaseModel::new();
        assert!(!model.is_synced());
        model.set_synced(true);
        assert!(model.is_synced());
        assert_eq!(model.get(SYNCED), Some(&Value::Bool(true)));

        let legacy = BaseModel::from_json(r#"{"synced":"true"}"#).unwrap();
        assert!(legacy.is_synced());
    }
}
