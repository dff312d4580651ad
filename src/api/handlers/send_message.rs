use crate::{
    api::handlers::valid_number,
    auth::AuthGate,
    gateway::{jid_for, MessageGateway},
};
use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// The message request body.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageRequest {
    /// Recipient number, digits only
    #[schema(example = "6281234567890")]
    pub number: String,
    /// Message text
    #[schema(example = "Hello, World!")]
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/sendMessage",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Message handed to the gateway"),
        (status = 400, description = "Malformed body or non-numeric recipient"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Gateway failed to deliver"),
    ),
    security(("basic_auth" = [])),
    tag = "messages",
)]
/// Send a text message to a numeric recipient through the gateway.
#[instrument(skip(auth, gateway, headers, body))]
pub async fn send_message(
    auth: Extension<Arc<AuthGate>>,
    gateway: Extension<Arc<dyn MessageGateway>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(err) = auth.authorize(&headers) {
        return err.into_response();
    }

    // Parse by hand so the parser error text reaches the client verbatim.
    let request: MessageRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    if !valid_number(&request.number) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "not a number" })),
        )
            .into_response();
    }

    debug!("request: {:?}", request);

    match gateway
        .send_text(&jid_for(&request.number), &request.message)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "response": format!("Sent to {}: {}", request.number, request.message)
            })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
