use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{BaseModel, ModelError};

/// Server-assigned document id; potential matches refer to children by it
pub const CHILD_ID: &str = "_id";
pub const CHILD_NAME: &str = "name";

/// Child record as stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Child {
    model: BaseModel,
}

impl Child {
    pub fn new(id: &str, name: &str) -> Self {
        let mut model = BaseModel::new();
        model.set(CHILD_ID, Value::from(id));
        model.set(CHILD_NAME, Value::from(name));
        Self { model }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(Self {
            model: BaseModel::from_json(json)?,
        })
    }

    pub fn id(&self) -> Option<String> {
        self.model.get_string(CHILD_ID)
    }

    pub fn name(&self) -> Option<String> {
        self.model.get_string(CHILD_NAME)
    }

    pub fn model(&self) -> &BaseModel {
        &self.model
    }

    pub fn to_json_string(&self) -> String {
        self.model.to_json_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_from_json() {
        let child = Child::from_json(r#"{"_id":"c1","name":"Amani","age":"7"}"#).unwrap();
        assert_eq!(child.id().as_deref(), Some("c1"));
        assert_eq!(child.name().as_deref(), Some("Amani"));
        assert_eq!(child.model().get_string("age").as_deref(), Some("7"));
    }
}
