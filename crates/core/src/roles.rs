//! Well-known role name constants.
//!
//! Roles live in the `profiles.role` column and are assigned outside the panel.

pub const ROLE_ADMIN: &str = "admin";

/// Whether `role` grants access to the administration space.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
