//! Authentication primitives.
//!
//! - [`jwt`]: signing and verifying bearer tokens.

pub mod jwt;
