//! Input models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod code;
pub mod validation;

pub use code::{slugify, CompanyCode};
pub use validation::ValidationError;
