//! HTTP REST transport

pub mod response;
pub mod server;

pub use response::{ApiError, ApiResponse};
pub use server::{router, HttpServer};
