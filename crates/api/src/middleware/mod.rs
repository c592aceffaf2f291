//! Request extractors guarding panel routes.

pub mod auth;
pub mod rbac;
