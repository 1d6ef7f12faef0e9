//! One-shot chat from the terminal.

use anyhow::Result;
use console::style;

use leadchat_core::chat::pipeline::LeadOutcome;
use leadchat_types::chat::ChatRequest;

use crate::state::AppState;

/// Run `message` through the full pipeline and print the reply.
///
/// ```bash
/// leadchat ask "Do you have any openings?" --session s1
/// ```
pub async fn ask(state: &AppState, session: &str, message: &str, json: bool) -> Result<()> {
    let request = ChatRequest {
        session_id: Some(session.to_string()),
        message: Some(message.to_string()),
    };

    let reply = state.pipeline.handle(&request).await;

    if json {
        let lead = reply.outcome.lead();
        let out = serde_json::json!({
            "response": reply.response,
            "lead": lead,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("bot").cyan().bold(), reply.response);
    if let LeadOutcome::Captured(lead) = &reply.outcome {
        println!();
        println!(
            "  {} Lead captured ({})",
            style("✓").green(),
            style(lead.id).dim()
        );
    }
    println!();

    Ok(())
}
