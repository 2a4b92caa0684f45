//! Backend health check.

use anyhow::Result;
use colored::Colorize;
use subgate::prelude::*;

use super::backend;
use crate::config::Config;

pub async fn run(config: &Config) -> Result<bool> {
    let backend = backend(config)?;
    let healthy = backend.health_check().await?;
    if healthy {
        println!("{} {} is up", "✓".green(), config.backend.base_url);
    } else {
        println!("{} {} is not reachable", "✗".red(), config.backend.base_url);
    }
    Ok(healthy)
}
