//! `ynity summarize <path>`: run the summarization pipeline on a file.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use ynity_types::summary::SummaryMode;

use crate::state::AppState;

pub async fn summarize_file(state: &AppState, path: &Path, mode: &str, json: bool) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mode = SummaryMode::from_keyword(mode);

    if !json {
        eprintln!(
            "  {} Summarizing {} ({} chars, mode: {})",
            style("⏳").bold(),
            style(path.display()).cyan(),
            text.chars().count(),
            style(mode).yellow()
        );
    }

    let summary = state.summarizer.summarize(&text, mode).await?;

    if json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "mode": mode,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("{summary}");
    }
    Ok(())
}
