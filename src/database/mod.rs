// Storage-facing exports
pub mod cursor;
pub mod schema;

pub use cursor::Cursor;
pub use schema::{EnquiryColumn, PrimitiveType, CHILD_TABLE, ENQUIRY_TABLE};
