//! Control API: request parsing, handlers, responses, and the status page.
//!
//! ```text
//!   HttpServer (adapter) ──▶ request::parse ──▶ handlers::handle ──▶ AppService
//!                        ◀── ApiResponse ◀──────────────┘
//! ```
//!
//! Handlers run synchronously inside the control loop pass that accepted
//! the connection, so a remote change can never interleave with a
//! button-driven one.

pub mod handlers;
pub mod page;
pub mod request;
pub mod response;

pub use handlers::handle;
pub use request::{ApiRequest, ThresholdParams};
pub use response::ApiResponse;
