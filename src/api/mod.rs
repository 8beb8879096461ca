//! API layer shared by the HTTP server and the serverless handler.
//!
//! - routes: method + path to [`Route`]
//! - handlers: [`dispatch`] from a route and body to a [`Reply`]
//! - messages: the response envelope and CORS headers
//! - context: [`AppContext`], the state handlers run against

pub mod context;
mod handlers;
pub mod messages;
pub mod routes;

pub use context::{AppContext, AppManager};
pub use handlers::dispatch;
pub use messages::{ApiResponse, CORS_HEADERS, Reply};
pub use routes::Route;
