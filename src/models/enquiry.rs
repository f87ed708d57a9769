use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::{Cursor, EnquiryColumn, PrimitiveType};
use crate::models::base::{coerce_string, UNIQUE_IDENTIFIER};
use crate::models::{BaseModel, Child, ModelError};
use crate::services::{ChildRepository, StoreError};
use crate::utils::FtrDateTime;

/// Keys that never take part in a reconstructed criteria object
pub const NONE_CRITERIA_FIELDS: [&str; 6] = [
    "enquirer_name",
    "created_at",
    "created_by",
    "created_organisation",
    "synced",
    "unique_identifier",
];

/// An enquiry lodged by someone looking for a missing child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Enquiry {
    model: BaseModel,
}

impl Default for Enquiry {
    fn default() -> Self {
        Self::new()
    }
}

impl Enquiry {
    /// Fresh enquiry carrying only a newly generated unique identifier
    pub fn new() -> Self {
        let mut model = BaseModel::new();
        model.set(UNIQUE_IDENTIFIER, Value::from(BaseModel::create_unique_id()));
        Self { model }
    }

    pub fn with_fields(created_by: &str, enquirer_name: &str, criteria: &Map<String, Value>) -> Self {
        let mut enquiry = Self {
            model: BaseModel::new(),
        };
        enquiry.model.set_created_by(created_by);
        enquiry.set_enquirer_name(enquirer_name);
        enquiry.set_criteria(criteria);
        enquiry
            .model
            .set(UNIQUE_IDENTIFIER, Value::from(BaseModel::create_unique_id()));
        enquiry.model.set_last_updated_at(&FtrDateTime::now());
        enquiry
    }

    /// Hydrate from a table row
    ///
    /// Every schema column must be present in the cursor; the check runs
    /// before any cell is read.
    pub fn from_cursor<C: Cursor + ?Sized>(cursor: &C) -> Result<Self, ModelError> {
        let mut indexes = Vec::with_capacity(EnquiryColumn::ALL.len());
        for column in EnquiryColumn::ALL {
            let index = cursor.column_index(column.column_name()).ok_or_else(|| {
                ModelError::IllegalArgument(format!(
                    "Column {} does not exist",
                    column.column_name()
                ))
            })?;
            indexes.push((column, index));
        }

        let mut model = BaseModel::new();
        for (column, index) in indexes {
            let value = match column.primitive_type() {
                PrimitiveType::Boolean => Value::Bool(cursor.get_int(index)? == 1),
                PrimitiveType::Text => cursor.get_string(index)?.map_or(Value::Null, Value::String),
            };
            model.put(column.column_name(), value)?;
        }

        Ok(Self { model })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(Self {
            model: BaseModel::from_json(json)?,
        })
    }

    fn set_column(&mut self, column: EnquiryColumn, value: Value) {
        debug_assert_ne!(column, EnquiryColumn::UniqueIdentifier);
        self.model.set(column.column_name(), value);
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.model.unique_id()
    }

    pub fn created_by(&self) -> Option<String> {
        self.model.created_by()
    }

    pub fn last_updated_at(&self) -> Option<String> {
        self.model.last_updated_at()
    }

    pub fn is_synced(&self) -> bool {
        self.model.is_synced()
    }

    pub fn set_synced(&mut self, synced: bool) {
        self.model.set_synced(synced);
    }

    pub fn enquirer_name(&self) -> Option<String> {
        self.model
            .get_string(EnquiryColumn::EnquirerName.column_name())
    }

    pub fn set_enquirer_name(&mut self, enquirer_name: &str) {
        self.set_column(EnquiryColumn::EnquirerName, Value::from(enquirer_name));
    }

    /// Search criteria as a serialized JSON object
    ///
    /// Records written before the `criteria` column existed kept their search
    /// fields at the top level. When no parseable criteria object is stored,
    /// the criteria are rebuilt from every key outside
    /// [`NONE_CRITERIA_FIELDS`].
    pub fn criteria(&self) -> String {
        let criteria = match self.stored_criteria() {
            Some(criteria) => criteria,
            None => self.reconstructed_criteria(),
        };
        Value::Object(criteria).to_string()
    }

    fn stored_criteria(&self) -> Option<Map<String, Value>> {
        let raw = coerce_string(self.model.get(EnquiryColumn::Criteria.column_name())?);
        match serde_json::from_str(&raw) {
            Ok(Value::Object(criteria)) => Some(criteria),
            _ => None,
        }
    }

    fn reconstructed_criteria(&self) -> Map<String, Value> {
        self.model
            .as_map()
            .iter()
            .filter(|(key, _)| !NONE_CRITERIA_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), Value::String(coerce_string(value))))
            .collect()
    }

    pub fn set_criteria(&mut self, criteria: &Map<String, Value>) {
        let serialized = Value::Object(criteria.clone()).to_string();
        self.set_column(EnquiryColumn::Criteria, Value::String(serialized));
    }

    /// Raw `potential_matches` column; an absent column is an error, not an empty list
    pub fn matching_child_ids(&self) -> Result<String, ModelError> {
        let column = EnquiryColumn::PotentialMatches.column_name();
        self.model
            .get_string(column)
            .ok_or_else(|| ModelError::ParseError(format!("No key {}", column)))
    }

    pub fn set_matching_child_ids(&mut self, ids: &[String]) {
        let serialized = Value::from(ids.to_vec()).to_string();
        self.set_column(EnquiryColumn::PotentialMatches, Value::String(serialized));
    }

    fn potential_match_ids(&self) -> Result<Vec<String>, ModelError> {
        let raw = self.matching_child_ids()?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Children listed in `potential_matches`, resolved through `repository`
    ///
    /// Any failure to read the id list yields no matches and skips the
    /// repository. Errors from the repository itself are returned.
    pub async fn potential_matches<R: ChildRepository>(
        &self,
        repository: &R,
    ) -> Result<Vec<Child>, StoreError> {
        match self.potential_match_ids() {
            Ok(ids) => repository.get_children_by_ids(ids).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Projection onto the enquiries table columns
    pub fn values(&self) -> Map<String, Value> {
        self.model.project(EnquiryColumn::column_names())
    }

    pub fn is_valid(&self) -> bool {
        self.enquirer_name().is_some_and(|name| !name.is_empty())
    }

    pub fn model(&self) -> &BaseModel {
        &self.model
    }

    pub fn to_json_string(&self) -> String {
        self.model.to_json_string()
    }
}
