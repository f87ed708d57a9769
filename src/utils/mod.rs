// Utility exports
pub mod datetime;

pub use datetime::FtrDateTime;
