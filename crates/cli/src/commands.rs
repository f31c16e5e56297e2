//! CLI command implementations.
//!
//! Each command opens its own [`Record`] against the shared store and
//! prints a short result line on success.

use std::sync::Arc;

use anyhow::{Context, Result};
use postable::{ContentStore, PostId, Record, RecordDefaults};
use tracing::info;

/// Shared context for all commands.
pub struct CommandContext {
    pub store: Arc<dyn ContentStore>,
    pub defaults: RecordDefaults,
}

impl CommandContext {
    fn open(&self, record_type: &str, id: PostId) -> Result<Record> {
        let mut record = Record::with_defaults(Arc::clone(&self.store), self.defaults.clone());
        record
            .initialize_or_load(record_type, Some(id))
            .with_context(|| format!("failed to load {record_type} {id}"))?;
        Ok(record)
    }
}

/// Create a record and print its id.
pub fn cmd_new(ctx: &CommandContext, record_type: &str, title: Option<&str>) -> Result<()> {
    let mut record = Record::with_defaults(Arc::clone(&ctx.store), ctx.defaults.clone());
    record
        .initialize_or_load(record_type, None)
        .with_context(|| format!("failed to create {record_type} record"))?;

    if let Some(title) = title {
        record.set_title(title).save().context("failed to save title")?;
    }

    let id = record.id().context("created record has no id")?;
    info!(id, record_type, "record created");
    println!("{id}");
    Ok(())
}

/// Print a record as pretty JSON.
pub fn cmd_show(ctx: &CommandContext, record_type: &str, id: PostId) -> Result<()> {
    let record = ctx.open(record_type, id)?;
    let post = record.post().context("record has no document")?;
    println!(
        "{}",
        serde_json::to_string_pretty(post).context("serialize document")?
    );
    Ok(())
}

/// Set the title and save.
pub fn cmd_title(
    ctx: &CommandContext,
    record_type: &str,
    id: PostId,
    title: &str,
) -> Result<()> {
    let mut record = ctx.open(record_type, id)?;
    record.set_title(title).save().context("failed to save title")?;
    println!("{id}: {}", record.title());
    Ok(())
}

/// Set an arbitrary status and save.
pub fn cmd_status(
    ctx: &CommandContext,
    record_type: &str,
    id: PostId,
    status: &str,
) -> Result<()> {
    let mut record = ctx.open(record_type, id)?;
    record.set_status(status).save().context("failed to save status")?;
    info!(id, status, "status changed");
    println!("{id}: {}", record.status());
    Ok(())
}

/// Publish a record.
pub fn cmd_publish(ctx: &CommandContext, record_type: &str, id: PostId) -> Result<()> {
    let mut record = ctx.open(record_type, id)?;
    record.publish().context("failed to publish")?;
    info!(id, "record published");
    println!("{id}: {}", record.status());
    Ok(())
}

/// Move a record back to draft.
pub fn cmd_draft(ctx: &CommandContext, record_type: &str, id: PostId) -> Result<()> {
    let mut record = ctx.open(record_type, id)?;
    record.draft().context("failed to move to draft")?;
    info!(id, "record moved to draft");
    println!("{id}: {}", record.status());
    Ok(())
}

/// List every stored document.
pub fn cmd_list(ctx: &CommandContext) -> Result<()> {
    let documents = ctx.store.all();
    if documents.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("{:<8} {:<16} {:<12} TITLE", "ID", "TYPE", "STATUS");
    println!("{}", "-".repeat(60));
    for doc in documents {
        println!(
            "{:<8} {:<16} {:<12} {}",
            doc.id,
            doc.post_type,
            doc.status.as_str(),
            doc.title
        );
    }
    Ok(())
}
