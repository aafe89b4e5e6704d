//! Position CLI subcommands.
//!
//! Reads and writes the stored position of an explicitly named session,
//! going through the same validation as the HTTP API.

use anyhow::{bail, Result};
use clap::Subcommand;
use console::style;

use rover_types::position::SessionId;
use rover_types::validation::validate_position;

use crate::http::response::PositionResponse;
use crate::state::AppState;

/// Position subcommands.
#[derive(Subcommand)]
pub enum PositionCommand {
    /// Show the saved position of a session.
    Show {
        /// Session identifier.
        session: String,
    },

    /// Save (create or overwrite) the position of a session.
    Save {
        /// Session identifier.
        session: String,

        /// X coordinate (1-200).
        #[arg(allow_negative_numbers = true)]
        x: i64,

        /// Y coordinate (1-200).
        #[arg(allow_negative_numbers = true)]
        y: i64,

        /// Heading: N, E, S or W.
        direction: String,
    },
}

/// Handle a position subcommand.
pub async fn handle_position_command(
    cmd: PositionCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        PositionCommand::Show { session } => show_position(state, &session, json).await,
        PositionCommand::Save {
            session,
            x,
            y,
            direction,
        } => save_position(state, &session, x, y, &direction, json).await,
    }
}

async fn show_position(state: &AppState, session: &str, json: bool) -> Result<()> {
    let session_id = SessionId::new(session)?;
    let position = state.position_service.get(&session_id).await?;

    if json {
        let body = PositionResponse::from_lookup(position.as_ref());
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match position {
        Some(p) => {
            println!();
            println!(
                "  {} Session {}",
                style("◆").cyan().bold(),
                style(&p.session_id).bold()
            );
            println!("  x: {}  y: {}  direction: {}", p.x, p.y, style(p.direction).green());
            println!(
                "  {}",
                style(format!("updated {}", p.updated_at.to_rfc3339())).dim()
            );
            println!();
        }
        None => {
            println!(
                "  {} No position saved for session '{}'",
                style("∅").dim(),
                session
            );
        }
    }

    Ok(())
}

async fn save_position(
    state: &AppState,
    session: &str,
    x: i64,
    y: i64,
    direction: &str,
    json: bool,
) -> Result<()> {
    let session_id = SessionId::new(session)?;

    let payload = serde_json::json!({ "x": x, "y": y, "direction": direction });
    let input = match validate_position(&payload) {
        Ok(input) => input,
        Err(errors) => {
            if json {
                let body = serde_json::json!({ "success": false, "errors": errors });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                for field in errors.fields() {
                    for reason in errors.reasons(field) {
                        eprintln!("  {} {}", style("✗").red(), reason);
                    }
                }
            }
            bail!("invalid position");
        }
    };

    state.position_service.save(&session_id, &input).await?;

    if json {
        let body = serde_json::json!({ "success": true, "position": input });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!(
            "  {} Saved ({}, {}) facing {} for session '{}'",
            style("✓").green(),
            input.x,
            input.y,
            input.direction,
            session
        );
    }

    Ok(())
}
