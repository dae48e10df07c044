//! `ynity status`: where things live and where requests go.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let conversations: (i64,) = sqlx_count(state, "conversations").await?;
    let chapters: (i64,) = sqlx_count(state, "chapters").await?;
    let config = &state.config;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "public_dir": state.public_dir.display().to_string(),
            "conversations": conversations.0,
            "chapters": chapters.0,
            "agents": config.agents,
            "summarizer_model": config.summarizer.model,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} v{}", style("Ynity").bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  {:<16}{}", style("Data").dim(), state.data_dir.display());
    println!("  {:<16}{}", style("Artifacts").dim(), state.public_dir.display());
    println!("  {:<16}{}", style("Conversations").dim(), conversations.0);
    println!("  {:<16}{}", style("Chapters").dim(), chapters.0);
    println!();
    println!("  {:<16}{}", style("Coach agent").dim(), config.agents.coach_url);
    println!("  {:<16}{}", style("QA agent").dim(), config.agents.assistant_url);
    println!("  {:<16}{}", style("Image agent").dim(), config.agents.image_url);
    println!("  {:<16}{}", style("Chapter agent").dim(), config.agents.chapter_url);
    println!("  {:<16}{}", style("Summarizer").dim(), config.summarizer.model);
    println!();
    Ok(())
}

async fn sqlx_count(state: &AppState, table: &'static str) -> Result<(i64,)> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    Ok(sqlx::query_as(&query).fetch_one(&state.db_pool.reader).await?)
}
