//! # embedgate-server
//!
//! HTTP gate for origin-bound embed access.
//!
//! Two endpoints share one validation ladder (method, embed id,
//! allowlist, origin) and then diverge:
//! - `GET /embed/token` mints a short-lived token bound to the
//!   requesting (embed, origin) pair
//! - `GET /embed/content` redeems such a token for the embed's content
//!
//! Every response, including every rejection, carries CORS headers that
//! echo the caller's origin so the embedding page can read the
//! structured error instead of hitting an opaque network block.

pub mod content;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use content::{ContentSource, StaticContent};
pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use server::GateServer;
pub use state::AppState;
