use crate::{auth::AuthGate, gateway::MessageGateway};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
mod openapi;

/// Build the application router.
///
/// All documented routes live under `/api/v1`; the Swagger UI and the health
/// probe sit outside the versioned prefix.
#[must_use]
pub fn router(auth: Arc<AuthGate>, gateway: Arc<dyn MessageGateway>) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);

    let v1 = Router::new()
        .route("/sendMessage", post(handlers::send_message))
        .route("/recvMessage", get(handlers::recv_message));

    Router::new()
        .merge(
            SwaggerUi::new("/swagger")
                .url("/swagger/openapi.json", openapi::ApiDoc::openapi()),
        )
        .nest("/api/v1", v1)
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(auth))
                .layer(Extension(gateway)),
        )
}

/// Bind the listener and serve until the process is stopped.
/// # Errors
/// Returns an error if the server fails to start
pub async fn new(
    port: u16,
    auth: Arc<AuthGate>,
    gateway: Arc<dyn MessageGateway>,
) -> Result<()> {
    let app = router(auth, gateway);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
