//! Run the gate once and report the decision.

use anyhow::Result;
use colored::Colorize;
use subgate::prelude::*;
use subgate::runtime::present;

use super::{backend, spinner, IdentityArgs};
use crate::config::Config;
use crate::render;

/// Returns whether access was granted.
pub async fn run(config: &Config, identity: &IdentityArgs, json: bool) -> Result<bool> {
    let backend = backend(config)?;
    let identity = identity.source().identity();

    let state = {
        let bar = identity
            .is_authenticated()
            .then(|| spinner("Checking subscription..."));
        let mut gate = GateController::new(&identity, &backend);
        let state = gate.evaluate().await.clone();
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        state
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary(&state, config))?);
        return Ok(state.is_granted());
    }

    let mut page = Page::new(config.app.default_view);
    present(&state, &mut page, &config.app_settings().gate);

    match &state {
        GateState::Granted => println!("{} Access granted", "✓".green()),
        GateState::Denied(missing) => {
            println!("{} Access denied: {} channel(s) not joined", "✗".red(), missing.len());
            render::page(&page);
        }
        _ => render::page(&page),
    }

    Ok(state.is_granted())
}

fn summary(state: &GateState, config: &Config) -> serde_json::Value {
    let links = match state {
        GateState::Denied(missing) => join_links(missing, &config.links.join_base),
        _ => Vec::new(),
    };
    let error = match state {
        GateState::Failed(e) => Some(e.to_string()),
        _ => None,
    };
    serde_json::json!({
        "state": state.name(),
        "links": links,
        "error": error,
    })
}
