//! Shared response envelope.

use serde::Serialize;

/// `{ "data": T }` envelope wrapping every JSON response body.
///
/// Endpoints that answer 202 or 204 send no body and skip the envelope;
/// errors use the `{ "error", "code" }` shape instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
