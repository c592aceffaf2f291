//! Browser navigation targets the front-end is sent to.

/// Login form.
pub const LOGIN_PATH: &str = "/admin/login";
/// Shown when an authenticated subject lacks the admin role.
pub const PERMISSIONS_PATH: &str = "/admin/permissions";
/// Profile directory, the default landing page after login.
pub const PROFILES_PATH: &str = "/admin/profiles";
/// Path the password-reset e-mail links back to, relative to the public origin.
pub const PASSWORD_PATH: &str = "/password";

/// Editor page for one profile.
pub fn profile_path(user_id: &str) -> String {
    format!("{PROFILES_PATH}/{user_id}")
}

/// Where to send the browser after a successful admin login.
///
/// `return_to` is honoured only when it is a same-site absolute path;
/// anything else (absent, relative, scheme-qualified, protocol-relative)
/// falls back to the profile directory.
pub fn resolve_return_to(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) if is_local_path(path) => path.to_string(),
        _ => PROFILES_PATH.to_string(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
