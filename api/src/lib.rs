mod action;
mod error;
mod extractor;
mod init;
mod middleware;

pub mod models;
pub mod openapi;
pub mod routers;

pub use init::{setup_config, setup_db, setup_router, setup_router_with_notifier};
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every successful response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
        }
    }
}
