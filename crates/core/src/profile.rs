//! Profile entity and the update DTO used by the editor.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Name of the backing table in the backend's query layer.
pub const PROFILES_TABLE: &str = "profiles";

/// One row of the `profiles` table.
///
/// `name` and `surname` are nullable in storage and rendered as `""` when
/// null. A null `active` column is read as `false`, which sorts the row
/// among the inactive entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, serialize_with = "none_as_empty")]
    pub name: Option<String>,
    #[serde(default, serialize_with = "none_as_empty")]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
}

/// Full overwrite of the editable profile fields.
///
/// Role is deliberately absent: a `role` key in an incoming JSON body is
/// dropped during deserialization and can never reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub active: bool,
}

impl Profile {
    /// Apply an editor submission. Only name, surname and active change.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.name = Some(update.name.clone());
        self.surname = Some(update.surname.clone());
        self.active = update.active;
    }
}

/// Order a directory listing with inactive profiles first.
///
/// The sort is stable, so rows sharing an `active` value keep the order the
/// backend returned them in.
pub fn order_by_active(profiles: &mut [Profile]) {
    profiles.sort_by_key(|p| p.active);
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}
