// ABOUTME: Main library entry point for the nutrition facts server
// ABOUTME: Serves normalized USDA FoodData Central nutrition panels over a JSON HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Facts Server
//!
//! Looks up foods in USDA `FoodData` Central and returns render-ready
//! nutrition-facts panels. Interpretation of the raw records lives in the
//! `nutrition_core` crate; this crate supplies the upstream client, the
//! search-box rules, configuration and the HTTP surface.
//!
//! ## Architecture
//!
//! - **External**: `FoodDataSource` seam with the live USDA client and a mock
//! - **Search**: query validation and drop-down options
//! - **Routes**: health and food endpoints
//! - **Server**: router assembly, middleware and serving
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_facts_server::config::environment::ServerConfig;
//! use nutrition_facts_server::server::{self, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::with_usda_client(config)?;
//!     server::run(Arc::new(resources)).await
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// External food data sources
pub mod external;

/// Structured logging setup and event helpers
pub mod logging;

/// HTTP middleware (request ids, tracing spans, CORS)
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Search-box query handling
pub mod search;

/// Router assembly and serving
pub mod server;
