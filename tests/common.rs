// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, test configuration and router construction over the mock source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutrition_facts_server`

use axum::Router;
use nutrition_facts_server::{
    config::{Environment, ServerConfig, UsdaApiConfig},
    external::MockUsdaClient,
    server::{build_router, ServerResources},
};
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration that never reaches the network
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        http_host: "127.0.0.1".to_owned(),
        environment: Environment::Testing,
        log_level: "warn".to_owned(),
        usda: UsdaApiConfig::default(),
        cors_origins: vec!["*".to_owned()],
    }
}

/// Shared resources backed by the fixture source
pub fn mock_resources(mock: MockUsdaClient) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(), Arc::new(mock)))
}

/// Full application router over the default fixtures
pub fn mock_router() -> Router {
    build_router(mock_resources(MockUsdaClient::new()))
}
