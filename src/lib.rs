//! RapidFTR Enquiry - enquiry records for family tracing and reunification
//!
//! This library provides the enquiry document model used by the RapidFTR
//! case-management app, together with the local SQLite storage it is
//! persisted in and the child lookup used to resolve potential matches.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use database::{Cursor, EnquiryColumn};
pub use models::{BaseModel, Child, Enquiry, ModelError, NewEnquiry};
pub use services::{ChildRepository, EnquiryRepository, SqliteChildRepository, SqliteClient, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let enquiry = Enquiry::new();
        assert!(enquiry.unique_id().is_some());
        assert_eq!(EnquiryColumn::ALL.len(), 10);
    }
}
