//! Panel session tokens.

pub mod jwt;
