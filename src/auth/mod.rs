//! Basic Authentication against a single credential pair.
//!
//! Credentials are loaded once at startup from a `username:password` file and
//! injected into the [`AuthGate`]; nothing in this module is mutable after
//! construction.

use anyhow::{anyhow, Context, Result};
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use base64ct::{Base64, Encoding};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::path::Path;
use thiserror::Error;

/// The username/password pair all API requests are checked against.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }

    /// Load credentials from a `username:password` file.
    ///
    /// The file content is trimmed and split on `:`; anything other than
    /// exactly two non-empty fields is an error. Embedded colons are not
    /// escaped, a password containing `:` cannot be represented.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Malformed credentials file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let parts: Vec<&str> = content.trim().split(':').collect();

        match parts.as_slice() {
            [username, password] if !username.is_empty() && !password.is_empty() => Ok(Self {
                username: (*username).to_string(),
                password: SecretString::from(*password),
            }),
            _ => Err(anyhow!("expected exactly one 'username:password' pair")),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Why a request was rejected, one fixed message per failure mode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,
    #[error("Invalid Authorization header")]
    InvalidHeader,
    #[error("Invalid username or password")]
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Validates the `Authorization` header of inbound requests.
#[derive(Debug)]
pub struct AuthGate {
    credentials: Credentials,
}

impl AuthGate {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Check the request's Basic Authentication header.
    ///
    /// Callers must stop processing and return the error response on `Err`.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the header is missing, not decodable as
    /// base64, or does not match the stored credentials.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidHeader)?;

        // A missing "Basic " prefix is not rejected outright, the raw value
        // simply fails to decode or match.
        let token = header.strip_prefix("Basic ").unwrap_or(header);

        let decoded = Base64::decode_vec(token).map_err(|_| AuthError::InvalidHeader)?;

        // Non-UTF-8 payloads can never match the stored pair.
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidCredentials)?;

        let fields: Vec<&str> = decoded.split(':').collect();

        match fields.as_slice() {
            [username, password]
                if *username == self.credentials.username
                    && *password == self.credentials.password.expose_secret() =>
            {
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> AuthGate {
        AuthGate::new(Credentials::new(
            "alice".to_string(),
            SecretString::from("secret"),
        ))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(payload: &str) -> String {
        format!("Basic {}", Base64::encode_string(payload.as_bytes()))
    }

    #[test]
    fn test_parse_valid_pair() {
        let credentials = Credentials::parse("alice:secret\n").unwrap();
        assert_eq!(credentials.username(), "alice");
        assert_eq!(credentials.password.expose_secret(), "secret");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let credentials = Credentials::parse("  bob:hunter2  \n").unwrap();
        assert_eq!(credentials.username(), "bob");
        assert_eq!(credentials.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        assert!(Credentials::parse("alicesecret").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_colon() {
        assert!(Credentials::parse("alice:sec:ret").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        assert!(Credentials::parse(":secret").is_err());
        assert!(Credentials::parse("alice:").is_err());
        assert!(Credentials::parse(":").is_err());
        assert!(Credentials::parse("").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pesan-creds-{}", std::process::id()));
        std::fs::write(&path, "alice:secret\n").unwrap();
        let credentials = Credentials::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(credentials.username(), "alice");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Credentials::load(Path::new("/nonexistent/credentials.txt")).is_err());
    }

    #[test]
    fn test_authorize_missing_header() {
        assert_eq!(
            gate().authorize(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn test_authorize_invalid_base64() {
        assert_eq!(
            gate().authorize(&headers_with("Basic not-base64!")),
            Err(AuthError::InvalidHeader)
        );
    }

    #[test]
    fn test_authorize_wrong_password() {
        assert_eq!(
            gate().authorize(&headers_with(&basic("alice:wrong"))),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authorize_wrong_username() {
        assert_eq!(
            gate().authorize(&headers_with(&basic("mallory:secret"))),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authorize_case_sensitive() {
        assert_eq!(
            gate().authorize(&headers_with(&basic("Alice:secret"))),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authorize_extra_colon_rejected() {
        assert_eq!(
            gate().authorize(&headers_with(&basic("alice:secret:extra"))),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authorize_valid() {
        assert_eq!(gate().authorize(&headers_with(&basic("alice:secret"))), Ok(()));
    }

    #[test]
    fn test_authorize_without_basic_prefix() {
        // The raw value is decoded as-is; valid base64 that matches still passes.
        let token = Base64::encode_string(b"alice:secret");
        assert_eq!(gate().authorize(&headers_with(&token)), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::MissingHeader.to_string(),
            "Authorization header is missing"
        );
        assert_eq!(
            AuthError::InvalidHeader.to_string(),
            "Invalid Authorization header"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
