use crate::auth::AuthGate;
use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams, Debug)]
pub struct RecvParams {
    /// The number parameter
    number: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/recvMessage",
    params(RecvParams),
    responses(
        (status = 200, description = "Echo of the received number"),
        (status = 400, description = "Missing number parameter"),
        (status = 401, description = "Missing or invalid credentials"),
    ),
    security(("basic_auth" = [])),
    tag = "messages",
)]
/// Receive a message for the specified number.
///
/// Echoes the identifier back; no inbound protocol interaction happens here.
#[instrument(skip(auth, headers))]
pub async fn recv_message(
    auth: Extension<Arc<AuthGate>>,
    headers: HeaderMap,
    Query(params): Query<RecvParams>,
) -> Response {
    if let Err(err) = auth.authorize(&headers) {
        return err.into_response();
    }

    let number = match params.number.as_deref() {
        Some(number) if !number.is_empty() => number,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "number parameter is required" })),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(json!({ "message": format!("Received number: {number}") })),
    )
        .into_response()
}
