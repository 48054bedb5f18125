pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod resources;
pub mod transport;

pub use client::{ApiClient, RequestOptions};
pub use error::ApiError;
pub use query::QueryParams;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
