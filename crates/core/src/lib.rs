//! Domain layer for the landing-page rows store.
//!
//! Everything here is pure: row/card models, the error taxonomy, input
//! sanitization, validation, and the ordering algorithm. Persistence and
//! scheduling live in `landing-store`.

pub mod audit;
pub mod error;
pub mod model;
pub mod ordering;
pub mod roles;
pub mod sanitize;
pub mod types;
pub mod validation;
