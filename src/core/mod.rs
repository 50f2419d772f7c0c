pub mod api_backend;
pub mod client;
pub mod clusters;
pub mod experiments;
pub mod graphql;
pub mod machines;
pub mod models;
pub mod networks;
pub mod ssh_keys;

pub use crate::domain::ports::{Backend, BackendResponse, Method, RequestParams};
pub use crate::utils::error::Result;
