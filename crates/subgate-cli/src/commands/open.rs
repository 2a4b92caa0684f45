//! Open the app: gate, load every view, then take commands from stdin.

use anyhow::{bail, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use subgate::prelude::*;

use super::{backend, spinner, IdentityArgs};
use crate::config::Config;
use crate::render;

/// A line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Send(Message),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Help);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Input::Quit,
        "help" | "?" => Input::Help,
        "retry" => Input::Send(Message::Retry),
        "complete" | "done" => {
            let Some(raw) = words.next() else {
                bail!("usage: complete <task id>");
            };
            let id: i64 = raw
                .trim_start_matches('#')
                .parse()
                .map_err(|_| anyhow::anyhow!("not a task id: {}", raw))?;
            Input::Send(Message::CompleteTask(TaskId(id)))
        }
        other => Input::Send(Message::NavigateTo(other.parse::<ViewKey>()?)),
    };
    Ok(input)
}

fn help() {
    let views: Vec<&str> = ViewKey::ALL.iter().map(|k| k.as_str()).collect();
    println!("Commands: {} | complete <id> | retry | quit", views.join(" | "));
}

pub async fn run(
    config: &Config,
    identity: &IdentityArgs,
    view: Option<ViewKey>,
    once: bool,
    json: bool,
) -> Result<bool> {
    let backend = backend(config)?;
    let source = identity.source();
    let mut settings = config.app_settings();
    if let Some(view) = view {
        settings.default_view = view;
    }

    let mut app = App::new(backend, &*source, settings);

    let bar = app
        .identity()
        .is_authenticated()
        .then(|| spinner("Checking subscription..."));
    app.start().await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(app.page())?);
        return Ok(app.state().is_granted());
    }

    if once {
        render::all_views(app.page());
        return Ok(app.state().is_granted());
    }

    render::page(app.page());
    interact(&mut app).await?;
    Ok(app.state().is_granted())
}

async fn interact<B: Backend>(app: &mut App<B>) -> Result<()> {
    let stdin = std::io::stdin();
    loop {
        // Only a granted session or a failed one can go anywhere.
        match app.state() {
            GateState::Granted | GateState::Failed(_) => {}
            _ => return Ok(()),
        }

        print!("{} ", ">".blue());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let message = match parse_input(&line) {
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Help) => {
                help();
                continue;
            }
            Ok(Input::Send(message)) => message,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        if let Err(e) = app.dispatch(message).await {
            println!("{}", e.to_string().red());
        }
        println!();
        render::page(app.page());
    }
}
