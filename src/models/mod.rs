// Model exports
pub mod base;
pub mod child;
pub mod enquiry;
pub mod error;
pub mod requests;

pub use base::BaseModel;
pub use child::Child;
pub use enquiry::{Enquiry, NONE_CRITERIA_FIELDS};
pub use error::ModelError;
pub use requests::NewEnquiry;
