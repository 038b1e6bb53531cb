// ABOUTME: Nutrition facts server binary entry point
// ABOUTME: Loads configuration, initializes logging and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Facts Server Binary
//!
//! Starts the HTTP API backed by USDA `FoodData` Central.

use anyhow::Result;
use clap::Parser;
use nutrition_facts_server::{
    config::environment::ServerConfig,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutrition-facts-server")]
#[command(about = "Nutrition facts API over USDA FoodData Central")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.http_host = host;
    }

    info!("{}", config.summary());

    let resources = ServerResources::with_usda_client(config)?;

    if let Err(e) = server::run(Arc::new(resources)).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
