//! Project initialization command.

use std::path::Path;

use console::style;

use crate::config::{Settings, CONFIG_FILE_NAME};
use crate::gemini::GeminiClient;

/// Write a starter config, create the media directory, and set up the
/// database schema.
pub async fn cmd_init(
    config_path: Option<&Path>,
    settings: &Settings,
    force: bool,
) -> anyhow::Result<()> {
    let path = config_path.unwrap_or(Path::new(CONFIG_FILE_NAME));

    if Settings::write_starter_config(path, force)? {
        println!("{} Wrote {}", style("✓").green(), path.display());
    } else {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("→").cyan(),
            path.display()
        );
    }

    std::fs::create_dir_all(&settings.media_dir)?;
    println!(
        "{} Media directory ready at {}",
        style("✓").green(),
        settings.media_dir.display()
    );

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    println!(
        "{} Database ready at {}",
        style("✓").green(),
        settings.database_path.display()
    );

    if settings.gemini.api_key.is_some() {
        let client = GeminiClient::new(settings.gemini.clone());
        match client.test_connection().await {
            Ok(_) => println!("{} Gemini API connection successful", style("✓").green()),
            Err(e) => println!("{} Gemini API check failed: {}", style("✗").red(), e),
        }
    } else {
        println!(
            "{} GEMINI_API_KEY not set; analysis requests will fail until it is",
            style("→").cyan()
        );
    }

    Ok(())
}
