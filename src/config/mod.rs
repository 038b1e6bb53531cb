// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server and USDA client configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the nutrition facts server.
//!
//! All settings come from environment variables; see [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, ServerConfig, UsdaApiConfig};
