//! Emit command: one-shot transition detection.
//!
//! Builds a before/after presence pair from flags, runs the same detection
//! the live service uses, and prints (optionally appends) the resulting
//! session line. Useful for exercising the log format by hand.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use gw_core::{Activity, ActivityKind, PresenceSnapshot, Status, SubjectId, detect_transition};
use gw_gateway::FileHistory;

pub async fn run(
    subject: SubjectId,
    name: &str,
    was_playing: Option<&str>,
    now_playing: Option<&str>,
    log: Option<&Path>,
) -> Result<()> {
    let snapshot = |game: Option<&str>| PresenceSnapshot {
        subject,
        display_name: name.to_string(),
        status: Status::Online,
        activity: game.map(|g| Activity {
            kind: ActivityKind::Playing,
            name: g.to_string(),
        }),
    };

    let previous = snapshot(was_playing);
    let current = snapshot(now_playing);

    match detect_transition(&previous, &current, Utc::now()) {
        Some(event) => {
            let line = event.to_line();
            if let Some(path) = log {
                FileHistory::new(path)
                    .append(&line)
                    .await
                    .context("failed to append to session log")?;
            }
            println!("{line}");
        }
        None => tracing::info!("no session transition detected"),
    }
    Ok(())
}
