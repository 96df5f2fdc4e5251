//! PDF report command.

use std::path::{Path, PathBuf};

use console::style;

use crate::config::Settings;
use crate::report;

/// Render the PDF report for a stored classification and write it to disk.
pub async fn cmd_report(
    settings: &Settings,
    id: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let classification = ctx
        .classifications()
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("classification {} not found", id))?;

    let bytes = report::render(&classification)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("waste_report_{}.pdf", classification.report_id())));
    std::fs::write(&path, &bytes)?;

    println!(
        "{} Wrote {} ({} bytes)",
        style("✓").green(),
        path.display(),
        bytes.len()
    );
    Ok(())
}
