//! History listing command.

use console::style;

use crate::config::Settings;
use crate::utils::format_confidence;

/// List stored classifications, newest first.
pub async fn cmd_history(settings: &Settings, limit: usize) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let classifications = ctx.classifications().recent(limit).await?;
    if classifications.is_empty() {
        println!("{} No classifications stored yet", style("→").cyan());
        return Ok(());
    }

    for c in &classifications {
        let category = c
            .predicted_category
            .map(|cat| cat.display_name())
            .unwrap_or("Pending");
        println!(
            "{}  {}  {}  {}  {}  {}",
            style(c.report_id()).bold(),
            c.created_at.format("%Y-%m-%d %H:%M"),
            style(category).green(),
            format_confidence(c.confidence_score),
            c.state.code(),
            style(&c.id).dim()
        );
    }

    println!(
        "\n{} {} classification(s)",
        style("✓").green(),
        classifications.len()
    );
    Ok(())
}
