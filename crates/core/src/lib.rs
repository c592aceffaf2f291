//! Domain types and rules for the staff administration panel.
//!
//! Nothing in this crate performs I/O: the backend client and the HTTP
//! service both build on these definitions.

pub mod email;
pub mod error;
pub mod navigation;
pub mod notice;
pub mod profile;
pub mod roles;
pub mod types;
