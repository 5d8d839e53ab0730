//! Shared response envelope types for API handlers.
//!
//! All success responses use a `{ "data": ... }` envelope. Errors use
//! `{ "success": false, "error": ..., "code": ... }` (see [`crate::error`]).

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
