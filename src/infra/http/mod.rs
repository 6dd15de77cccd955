pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};
pub use middleware::{RequestContext, log_responses, set_request_context};
