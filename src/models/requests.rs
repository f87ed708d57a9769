use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Input for registering a new enquiry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEnquiry {
    #[validate(length(min = 1))]
    pub created_by: String,
    #[validate(length(min = 1))]
    pub enquirer_name: String,
    #[serde(default)]
    pub criteria: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enquiry_validation() {
        let request: NewEnquiry =
            serde_json::from_str(r#"{"created_by":"user","enquirer_name":"Faith"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.criteria.is_empty());

        let missing_name = NewEnquiry {
            enquirer_name: String::new(),
            ..request
        };
        let errors = missing_name.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("enquirer_name"));
    }
}
