//! User-facing notices shown by the front-end as transient toasts.
//!
//! Every notice has a title and a description in each supported locale.
//! Polish is the operators' language and the default.

use std::str::FromStr;

use serde::Serialize;

/// Language the notices are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pl,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pl" => Ok(Locale::Pl),
            "en" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{other}' (expected 'pl' or 'en')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginFailed,
    PermissionDenied,
    ProfileSaved,
    ProfileSaveFailed,
    ResetEmailMissing,
    ResetEmailInvalid,
    ResetRequestFailed,
    ResetEmailSent,
}

/// A notice rendered for one locale, ready to serialize into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNotice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    pub fn level(self) -> NoticeLevel {
        match self {
            Notice::ProfileSaved | Notice::ResetEmailSent => NoticeLevel::Success,
            _ => NoticeLevel::Error,
        }
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Notice::LoginFailed, Locale::Pl) => "Błąd logowania",
            (Notice::LoginFailed, Locale::En) => "Login failed",
            (Notice::PermissionDenied, Locale::Pl) => "Brak uprawnień",
            (Notice::PermissionDenied, Locale::En) => "No permission",
            (Notice::ProfileSaved, Locale::Pl) => "Zaktualizowano pomyślnie",
            (Notice::ProfileSaved, Locale::En) => "Updated successfully",
            (Notice::ProfileSaveFailed, Locale::Pl) => "Wystąpił błąd",
            (Notice::ProfileSaveFailed, Locale::En) => "Something went wrong",
            (
                Notice::ResetEmailMissing | Notice::ResetEmailInvalid | Notice::ResetRequestFailed,
                Locale::Pl,
            ) => "Błąd",
            (
                Notice::ResetEmailMissing | Notice::ResetEmailInvalid | Notice::ResetRequestFailed,
                Locale::En,
            ) => "Error",
            (Notice::ResetEmailSent, Locale::Pl) => "Reset hasła",
            (Notice::ResetEmailSent, Locale::En) => "Password reset",
        }
    }

    pub fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Notice::LoginFailed, Locale::Pl) => {
                "Mamy problem z logowaniem, spróbuj ponownie, może złe hasło?"
            }
            (Notice::LoginFailed, Locale::En) => {
                "We could not log you in. Try again, maybe the password is wrong?"
            }
            (Notice::PermissionDenied, Locale::Pl) => "Nie masz dostępu do tej przestrzeni",
            (Notice::PermissionDenied, Locale::En) => "You do not have access to this area",
            (Notice::ProfileSaved, Locale::Pl) => "Pomyślnie zaktualizowano użytkownika",
            (Notice::ProfileSaved, Locale::En) => "The user was updated",
            (Notice::ProfileSaveFailed, Locale::Pl) => "Wystąpił błąd podczas zapisywania",
            (Notice::ProfileSaveFailed, Locale::En) => "An error occurred while saving",
            (Notice::ResetEmailMissing, Locale::Pl) => "Podaj email aby zresetować hasło",
            (Notice::ResetEmailMissing, Locale::En) => "Enter your email to reset the password",
            (Notice::ResetEmailInvalid, Locale::Pl) => "Podaj poprawny email",
            (Notice::ResetEmailInvalid, Locale::En) => "Enter a valid email",
            (Notice::ResetRequestFailed, Locale::Pl) => "Może już wysłałeś prośbę o reset",
            (Notice::ResetRequestFailed, Locale::En) => "Maybe you already requested a reset",
            (Notice::ResetEmailSent, Locale::Pl) => "Sprawdź skrzynkę email",
            (Notice::ResetEmailSent, Locale::En) => "Check your inbox",
        }
    }

    pub fn render(self, locale: Locale) -> RenderedNotice {
        RenderedNotice {
            level: self.level(),
            title: self.title(locale),
            description: self.description(locale),
        }
    }
}
