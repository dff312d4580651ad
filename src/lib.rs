//! # Pesan (Messaging Gateway API)
//!
//! `pesan` exposes a small authenticated HTTP API for sending text messages
//! through an external messaging-protocol daemon. The daemon owns the hard
//! protocol work (device pairing, encryption, session state); this service
//! owns request routing, Basic Authentication and input validation, and a
//! single outbound call per request.
//!
//! ## Authentication
//!
//! Every API request carries `Authorization: Basic <base64(username:password)>`,
//! checked against a single credential pair loaded from a local file at
//! startup. There is no reload mechanism; changing the file requires a
//! process restart.

pub mod api;
pub mod auth;
pub mod cli;
pub mod gateway;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
