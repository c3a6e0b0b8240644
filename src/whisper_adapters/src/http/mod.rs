pub mod middleware;
pub mod routes;

pub use middleware::{SessionToken, require_session};
