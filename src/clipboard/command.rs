use super::ClipboardService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Pipes text into a system clipboard tool such as `wl-copy`, `pbcopy` or
/// `xclip -selection clipboard`.
pub struct CommandClipboard {
    command: Option<String>,
}

impl CommandClipboard {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ClipboardService for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let command = self
            .command
            .as_deref()
            .ok_or_else(|| Error::Clipboard("no clipboard command configured".to_string()))?;

        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::Clipboard("empty clipboard command".to_string()))?;

        tracing::debug!("Writing {} bytes to clipboard via {}", text.len(), program);

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Clipboard(format!("failed to start {}: {}", program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::Clipboard(format!("{} exited with {}", program, status)));
        }
        Ok(())
    }
}
