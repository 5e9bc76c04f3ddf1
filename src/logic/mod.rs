pub mod error;
pub mod field_service;

pub use error::FieldError;
pub use field_service::*;
