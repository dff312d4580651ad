use crate::api::handlers;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::send_message::send_message,
        handlers::recv_message::recv_message,
        handlers::health::health,
    ),
    components(schemas(handlers::send_message::MessageRequest)),
    modifiers(&SecurityAddon),
    tags(
        (name = "messages", description = "Send and receive text messages"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_declares_basic_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("basic_auth"));
    }

    #[test]
    fn test_openapi_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/sendMessage"));
        assert!(doc.paths.paths.contains_key("/api/v1/recvMessage"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
