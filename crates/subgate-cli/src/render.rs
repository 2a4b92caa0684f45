//! Terminal rendering of the page.

use colored::Colorize;
use subgate::prelude::*;
use subgate::runtime::{NewsCard, ProfileCard, TaskBoard};

/// Draw whatever the user would see right now.
pub fn page(page: &Page) {
    gate(&page.gate);
    if page.body_visible {
        nav(page);
        println!();
        view(page, page.views.active());
    }
}

/// Draw every view in turn, regardless of which one is active.
pub fn all_views(page: &Page) {
    gate(&page.gate);
    if !page.body_visible {
        return;
    }
    for key in ViewKey::ALL {
        println!("{}", format!("== {} ==", key.label()).bold());
        view(page, key);
        println!();
    }
}

fn gate(panel: &GatePanel) {
    match panel {
        GatePanel::Hidden | GatePanel::Checking => {}
        GatePanel::Notice { message } => println!("{}", message.yellow()),
        GatePanel::Remediation { links } => {
            println!("{}", "Subscribe to these channels to continue:".yellow().bold());
            for link in links {
                println!("  {} {} {}", "•".blue(), link.text, link.href.dimmed());
            }
            println!();
            println!("Reopen the app after joining.");
        }
        GatePanel::Failure { message, retryable } => {
            println!("{} {}", "✗".red(), "Could not check your subscription.".red().bold());
            println!("  {}", message.dimmed());
            if *retryable {
                println!("  Type {} to try again.", "retry".bold());
            }
        }
    }
}

fn nav(page: &Page) {
    let buttons: Vec<String> = page
        .nav()
        .into_iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label).green().bold().to_string()
            } else {
                format!(" {} ", b.label)
            }
        })
        .collect();
    println!("{}", buttons.join(" "));
}

fn view(page: &Page, key: ViewKey) {
    match key {
        ViewKey::Tasks => pane(&page.tasks, tasks),
        ViewKey::Profile => pane(&page.profile, profile),
        ViewKey::News => pane(&page.news, |items| news(items)),
    }
}

fn pane<T>(pane: &Pane<T>, draw: impl Fn(&T)) {
    match pane {
        Pane::Empty => println!("{}", "Loading...".dimmed()),
        Pane::Ready(value) => draw(value),
        Pane::Failed(reason) => println!("{} {}", "Failed to load:".red(), reason),
    }
}

fn tasks(board: &TaskBoard) {
    if let Some(notice) = &board.notice {
        println!("{}", notice.cyan());
        println!();
    }
    if board.cards.is_empty() {
        println!("{}", "No tasks yet.".dimmed());
    }
    for card in &board.cards {
        println!("{} {}", format!("#{}", card.id).dimmed(), card.title.bold());
        if !card.description.is_empty() {
            println!("  {}", card.description);
        }
        println!("  Type: {} | Rarity: {}", card.task_type, card.rarity);
        println!("  Reward: {} PRO#", card.reward_tokens);
        println!("  Status: {}", card.status);
        if card.action_enabled {
            println!("  {}", format!("complete {}", card.id).green());
        } else {
            println!("  {}", "Mark Complete (done)".dimmed());
        }
    }
}

fn profile(card: &ProfileCard) {
    println!("Telegram ID: {}", card.telegram_id);
    println!("Username: {}", card.username);
    println!("Referral link: {}", card.referral_link.underline());
    println!("Tokens: {}", card.tokens);
    println!("Token rate: {}", card.token_rate);
    println!("Support: {}", card.support_link);
}

fn news(items: &[NewsCard]) {
    if items.is_empty() {
        println!("{}", "No news.".dimmed());
    }
    for item in items {
        println!("{}", item.title.bold());
        if !item.content.is_empty() {
            println!("  {}", item.content);
        }
        if let Some(media) = &item.media {
            println!("  {}: {}", media.label, media.href.underline());
        }
        if let Some(button) = &item.button {
            println!("  [{}] {}", button.label, button.href.dimmed());
        }
    }
}
