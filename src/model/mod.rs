pub mod common;
pub mod field;
pub mod filter;
pub mod form;

pub use common::*;
pub use field::{Field, FieldAttributes, FieldUpdate, FieldWithFormName, NewField};
pub use filter::*;
pub use form::*;
