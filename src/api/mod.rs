// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod config;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use config::ApiConfig;
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, WordCloudResponse};
pub use http_server::{create_app, start_server, AppState};
