// External player launch - the terminal can't show video, so hand the URL
// to whatever player the config names and forget about it

use anyhow::{Context, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::PlayerConfig;

/// What happened when playback was handed off
#[derive(Debug)]
pub enum LaunchOutcome {
    Started,
    /// No player configured; the URL is only shown
    Disabled,
    Failed(anyhow::Error),
}

impl LaunchOutcome {
    /// A failed launch leaves nothing playing, so the player pane stays closed
    pub fn opens_player(&self) -> bool {
        !matches!(self, LaunchOutcome::Failed(_))
    }
}

/// Program and arguments for playing `url`, or `None` when launching is disabled
pub fn player_invocation(player: &PlayerConfig, url: &str) -> Option<(String, Vec<String>)> {
    let program = player.command()?;
    let mut args = player.args.clone();
    args.push(url.to_string());
    Some((program.to_string(), args))
}

/// Spawn the configured player detached. Returns false when no player is configured.
pub fn launch(player: &PlayerConfig, url: &str) -> Result<bool> {
    let Some((program, args)) = player_invocation(player, url) else {
        return Ok(false);
    };

    // Child is dropped right away; the player outlives this handle
    Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start player '{}'", program))?;

    info!("Launched {} for {}", program, url);
    Ok(true)
}

/// `launch`, folded into an outcome the UI can act on
pub fn try_launch(player: &PlayerConfig, url: &str) -> LaunchOutcome {
    match launch(player, url) {
        Ok(true) => LaunchOutcome::Started,
        Ok(false) => LaunchOutcome::Disabled,
        Err(e) => {
            warn!("Player launch failed: {:#}", e);
            LaunchOutcome::Failed(e)
        }
    }
}
