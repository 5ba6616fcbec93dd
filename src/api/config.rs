// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server configuration

use std::env;
use std::net::SocketAddr;

use crate::scrape::SchemaKind;

/// Configuration for the HTTP API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (default: 127.0.0.1)
    pub host: String,
    /// Bind port (default: 8080)
    pub port: u16,
    /// Item schema served by the routes (default: books)
    pub schema: SchemaKind,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            schema: env::var("SCHEMA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.schema),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr().map(|_| ())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            schema: SchemaKind::Books,
        }
    }
}
