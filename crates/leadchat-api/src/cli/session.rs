//! Session inspection CLI commands: history and captured leads.

use anyhow::{Context, Result};
use console::style;

use leadchat_core::lead::repository::LeadRepository;
use leadchat_types::chat::TurnRole;

use crate::state::AppState;

/// Print a session's stored turns, oldest first.
pub async fn history(state: &AppState, session: &str, json: bool) -> Result<()> {
    let turns = state
        .pipeline
        .history(session)
        .await
        .with_context(|| format!("Failed to load history for '{session}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!();
        println!(
            "  {} No turns stored for session '{}'.",
            style("i").blue().bold(),
            style(session).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    for turn in &turns {
        let role = match turn.role {
            TurnRole::User => style("user").yellow().bold(),
            TurnRole::Assistant => style("assistant").cyan().bold(),
        };
        println!(
            "  {} {} {}",
            style(turn.created_at.format("%Y-%m-%d %H:%M:%S")).dim(),
            role,
            turn.message
        );
    }
    println!();

    Ok(())
}

/// Print the leads captured in a session.
pub async fn leads(state: &AppState, session: &str, json: bool) -> Result<()> {
    let leads = state
        .pipeline
        .leads()
        .list_leads(session)
        .await
        .with_context(|| format!("Failed to load leads for '{session}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
        return Ok(());
    }

    if leads.is_empty() {
        println!();
        println!(
            "  {} No leads captured in session '{}'.",
            style("i").blue().bold(),
            style(session).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    for lead in &leads {
        println!(
            "  {} {}  {}  {}  {}",
            style(lead.created_at.format("%Y-%m-%d %H:%M:%S")).dim(),
            lead.name.as_deref().unwrap_or("-"),
            lead.email.as_deref().unwrap_or("-"),
            lead.phone.as_deref().unwrap_or("-"),
            if lead.followed_up {
                style("followed up").green()
            } else {
                style("pending").yellow()
            }
        );
    }
    println!();

    Ok(())
}
