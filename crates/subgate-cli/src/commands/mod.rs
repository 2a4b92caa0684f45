//! CLI command implementations.

pub mod check;
pub mod init;
pub mod open;
pub mod ping;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use subgate::prelude::*;

use crate::config::Config;

/// Where the user identity comes from on the command line.
#[derive(Debug, Clone, Default)]
pub struct IdentityArgs {
    /// Host launch context as JSON, `{"user": {"id": .., "username": ..}}`.
    pub init_data: Option<String>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

impl IdentityArgs {
    /// Host context wins when given; otherwise the explicit flags.
    pub fn source(&self) -> Box<dyn IdentitySource> {
        match &self.init_data {
            Some(json) => Box::new(HostContext::from_json(json)),
            None => Box::new(StaticIdentity::new(self.user_id, self.username.clone())),
        }
    }
}

pub fn backend(config: &Config) -> Result<HttpBackend> {
    HttpBackend::new(config.client_config())
        .with_context(|| format!("Failed to set up client for {}", config.backend.base_url))
}

pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
