//! Core domain concepts shared by every validator.
//!
//! - [`path::FieldPath`]: where in a candidate an issue was found
//! - [`error::ValidationError`]: structured validation failure

pub mod error;
pub mod path;
