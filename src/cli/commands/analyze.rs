//! One-shot analysis command.

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::gemini::GeminiClient;
use crate::models::Classification;
use crate::services::WasteAnalyzer;
use crate::utils::format_confidence;

/// Analyze an image file from the terminal and store the result.
pub async fn cmd_analyze(
    settings: &Settings,
    image_path: &Path,
    state_code: &str,
) -> anyhow::Result<()> {
    let data = std::fs::read(image_path)
        .with_context(|| format!("failed to read image {}", image_path.display()))?;
    let filename = image_path.file_name().and_then(|n| n.to_str());

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    std::fs::create_dir_all(&settings.media_dir)?;

    let analyzer = WasteAnalyzer::new(
        ctx.classifications(),
        GeminiClient::new(settings.gemini.clone()),
        settings.media_dir.clone(),
    );

    println!(
        "{} Analyzing {} for state {}...",
        style("→").cyan(),
        image_path.display(),
        state_code.to_ascii_uppercase()
    );

    let classification = analyzer
        .analyze_with_code(&data, filename, state_code)
        .await?;

    print_classification(&classification);
    println!(
        "\n{} Stored as {} (PDF: ecowaste report {})",
        style("✓").green(),
        classification.id,
        classification.id
    );

    Ok(())
}

/// Print the analysis result to the terminal.
fn print_classification(c: &Classification) {
    let category = c
        .predicted_category
        .map(|cat| cat.display_name())
        .unwrap_or("Pending");

    println!();
    println!(
        "  {}  {}",
        style(category).green().bold(),
        style(format_confidence(c.confidence_score)).dim()
    );
    println!("  State: {} ({})", c.state.name(), c.state.code());

    if let Some(description) = &c.waste_description {
        println!("\n  {}", description);
    }

    let sections: [(&str, &Option<String>); 10] = [
        ("Disposal", &c.disposal_instructions),
        ("State regulations", &c.state_specific_laws),
        ("Facilities", &c.authorized_facilities),
        ("Health hazards", &c.health_hazards),
        ("Environmental risks", &c.environmental_risks),
        ("Precautions", &c.precautions),
        ("Protective equipment", &c.protective_equipment),
        ("Emergency procedures", &c.emergency_procedures),
        ("Recyclability", &c.recyclability_info),
        ("Cost", &c.cost_implications),
    ];

    for (label, value) in sections {
        if let Some(value) = value {
            println!("\n  {}", style(label).bold());
            println!("  {}", value);
        }
    }
}
