//! Shared response envelope types for API handlers.
//!
//! The vote and results endpoints keep the shapes the poll client already
//! consumes (`{ "ok": true }`, `{ "results": [...] }`). Everything else uses
//! the `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "results": T }` body of `GET /api/results/{roundId}`.
#[derive(Debug, Serialize)]
pub struct ResultsResponse<T: Serialize> {
    pub results: T,
}

/// `{ "ok": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
