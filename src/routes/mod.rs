// ABOUTME: Route module organization for the nutrition facts server HTTP endpoints
// ABOUTME: Groups health and food routes, each exposing a router over shared resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the nutrition facts server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the search module and the normalization core.

/// Food search and detail routes
pub mod foods;
/// Health check and system status routes
pub mod health;

/// Food route handlers
pub use foods::FoodRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
