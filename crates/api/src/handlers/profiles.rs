//! Handlers for the `/admin/profiles` resource (directory and editor).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::Json;
use panel_core::notice::Notice;
use panel_core::profile::{order_by_active, Profile, ProfileUpdate};
use serde::{Deserialize, Serialize};

use crate::cache::QueryKey;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

/// One profile, or `null` when no row exists for the id.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileDetail {
    pub profile: Option<Profile>,
}

/// GET /api/v1/admin/profiles
///
/// Every profile, inactive ones first.
pub async fn list_profiles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let profiles = state
        .cache
        .ensure(QueryKey::profiles(), || async {
            let mut rows = state.backend.list_profiles().await?;
            order_by_active(&mut rows);
            Ok::<_, AppError>(rows)
        })
        .await?;

    Ok(Json(DataResponse { data: profiles }))
}

/// GET /api/v1/admin/profiles/{id}
///
/// An unknown id answers 200 with a null profile.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ProfileDetail>>> {
    let detail = state
        .cache
        .ensure(QueryKey::profile(&id), || async {
            let profile = state.backend.find_profile(&id).await?;
            Ok::<_, AppError>(ProfileDetail { profile })
        })
        .await?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/admin/profiles/{id}
///
/// Overwrite name, surname and active. Role is not part of the payload and
/// cannot change here. A successful write invalidates every cached read.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<ProfileUpdate>,
) -> AppResult<Json<NoticeResponse<ProfileDetail>>> {
    let locale = state.config.locale;

    let stored = state
        .backend
        .update_profile(&id, &input)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = %id, error = %e, "Profile update failed");
            AppError::Backend(e).with_notice(Notice::ProfileSaveFailed.render(locale))
        })?;

    state.cache.invalidate_all().await;

    tracing::info!(
        user_id = %id,
        updated_by = %admin.user_id,
        matched = stored.is_some(),
        "Profile updated"
    );

    Ok(Json(NoticeResponse {
        data: ProfileDetail { profile: stored },
        notice: Notice::ProfileSaved.render(locale),
    }))
}
