// Service exports
pub mod children;
pub mod enquiries;
pub mod sqlite;

pub use children::{ChildRepository, SqliteChildRepository};
pub use enquiries::EnquiryRepository;
pub use sqlite::{SqliteClient, StoreError};
