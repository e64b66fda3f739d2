//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Request ID (assign `x-request-id` before anything logs)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Session layer (tower-sessions, in-memory store; holds the cart)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
pub use session::create_session_layer;
