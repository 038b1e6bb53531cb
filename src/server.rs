// ABOUTME: HTTP server assembly: shared resources, router, middleware stack and serving
// ABOUTME: Wires the food data source into health and food routes behind tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::external::{FoodDataSource, UsdaClient, UsdaClientConfig};
use crate::middleware::{create_request_span, setup_cors, RequestIdGenerator};
use crate::routes::{FoodRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::Router;
#[cfg(not(unix))]
use std::future::pending;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by every route handler
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Source of food records
    pub food_source: Arc<dyn FoodDataSource>,
}

impl ServerResources {
    /// Bundle configuration and a food data source
    #[must_use]
    pub fn new(config: ServerConfig, food_source: Arc<dyn FoodDataSource>) -> Self {
        Self {
            config: Arc::new(config),
            food_source,
        }
    }

    /// Resources backed by the live USDA client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_usda_client(config: ServerConfig) -> AppResult<Self> {
        let client = UsdaClient::new(UsdaClientConfig::from(&config.usda))?;
        Ok(Self::new(config, Arc::new(client)))
    }
}

/// Build the application router with its middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(FoodRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

/// Bind and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(
        address = %address,
        food_source = resources.food_source.name(),
        "HTTP server listening"
    );

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
