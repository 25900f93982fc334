//! HTTP gateway for the people admin screens.
//!
//! Decodes nested contact form submissions, forwards them to the upstream
//! people API as JSON, and serves list/read endpoints with response shaping.

pub mod client;
pub mod handlers;
pub mod router;
pub mod server;
