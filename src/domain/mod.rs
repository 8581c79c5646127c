//! Domain layer: aliases, validation and errors
//!
//! This layer is independent of external concerns (no parser, no terminal, no config loading).

pub mod alias;
pub mod error;
pub mod validate;

pub use alias::Alias;
pub use error::{DomainError, DomainResult, Origin, ValidationError, ViolationKind};
