//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Responses that the
//! front-end announces to the operator also carry a `notice`.

use panel_core::notice::RenderedNotice;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "notice": {...} }` for operations that end in a toast.
#[derive(Debug, Serialize)]
pub struct NoticeResponse<T: Serialize> {
    pub data: T,
    pub notice: RenderedNotice,
}
