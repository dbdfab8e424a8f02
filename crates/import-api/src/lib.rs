pub mod client;
pub mod endpoint;
pub mod errors;
pub mod http;

pub use client::HttpAdminClient;
pub use errors::ApiError;
