//! Typed client for the Paperspace control-plane APIs: machines, clusters,
//! networks, experiments, the model registry (REST) and SSH keys (GraphQL).

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use config::ClientConfig;
pub use core::{api_backend::ApiBackend, client::Client, graphql::GraphqlClient};
pub use domain::model::*;
pub use domain::ports::{Backend, BackendResponse, Method, RequestParams};
pub use utils::error::{ApiError, PaperspaceError, Result};
