use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Show `text` through `pager`, printing it directly when no pager is set
/// or the pager cannot be run.
pub async fn page(text: &str, pager: Option<&str>) {
    let Some(pager) = pager.map(str::trim).filter(|p| !p.is_empty()) else {
        print!("{text}");
        return;
    };

    if let Err(e) = run_pager(text, pager).await {
        log::warn!("Pager {} failed: {}", pager, e);
        print!("{text}");
    }
}

async fn run_pager(text: &str, pager: &str) -> std::io::Result<()> {
    let mut parts = pager.split_whitespace();
    let program = parts.next().unwrap_or_default();

    let mut child = Command::new(program).args(parts).stdin(Stdio::piped()).spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
    }

    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("exited with {status}")))
    }
}
