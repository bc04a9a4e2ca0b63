//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod errors;
#[cfg(test)]
pub mod test_support;
