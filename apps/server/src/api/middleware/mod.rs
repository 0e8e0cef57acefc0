//! Middleware for the API layer

mod layers;
mod request_id;

pub use layers::{compression, cors};
pub use request_id::request_id_middleware;
