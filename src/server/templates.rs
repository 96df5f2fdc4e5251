//! HTML templates for the web interface.

use crate::models::{Classification, IndianState};
use crate::utils::{format_confidence, html_escape};

/// Base HTML template shared by every page.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - EcoWaste</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">EcoWaste</a>
            <a href="/analyze">analyze</a>
            <a href="/history">history</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        html_escape(title),
        content
    )
}

/// Render the home page: totals plus the most recent classifications.
pub fn home_page(total: u64, recent: &[Classification]) -> String {
    let mut content = format!(
        r#"
    <p class="lead">Upload a photo of waste material and get AI-assisted
    classification and state-specific disposal guidance.</p>
    <p><a class="btn" href="/analyze">Analyze waste</a></p>
    <div class="stats">
        <div class="stat"><span class="stat-value">{}</span> classifications so far</div>
    </div>
    "#,
        total
    );

    if recent.is_empty() {
        content.push_str("<p class=\"empty\">Nothing analyzed yet.</p>");
    } else {
        content.push_str("<h2>Recent classifications</h2>");
        content.push_str(&classification_table(recent));
    }

    content
}

/// Render the upload form, optionally with an error banner from a failed
/// submission.
pub fn analyze_page(error: Option<&str>) -> String {
    let banner = match error {
        Some(msg) => format!(r#"<div class="error-banner">{}</div>"#, html_escape(msg)),
        None => String::new(),
    };

    let mut options = String::new();
    for state in IndianState::ALL {
        options.push_str(&format!(
            r#"<option value="{}">{}</option>
"#,
            state.code(),
            html_escape(state.name())
        ));
    }

    format!(
        r#"
    {}
    <form class="analyze-form" method="post" action="/analyze" enctype="multipart/form-data">
        <label for="image">Waste photo (jpg, png, bmp, webp; max 10 MB)</label>
        <input type="file" id="image" name="image" accept=".jpg,.jpeg,.png,.bmp,.webp" required>

        <label for="state">State or union territory</label>
        <select id="state" name="state" required>
            <option value="">Select a state</option>
            {}
        </select>

        <button type="submit" class="btn">Analyze</button>
    </form>
    <p class="hint">Analysis contacts the vision API and usually takes a few seconds.</p>
    "#,
        banner, options
    )
}

/// Render the full history listing.
pub fn history_page(classifications: &[Classification]) -> String {
    if classifications.is_empty() {
        return "<p class=\"empty\">No classifications yet. <a href=\"/analyze\">Analyze one</a>.</p>"
            .to_string();
    }
    classification_table(classifications)
}

/// Render the post-analysis results page.
pub fn results_page(classification: &Classification) -> String {
    format!(
        r#"
    {}
    {}
    <p class="actions">
        <a class="btn" href="/download/{}">Download PDF report</a>
        <a href="/detail/{}">Permanent record</a>
        <a href="/analyze">Analyze another</a>
    </p>
    "#,
        summary_card(classification),
        guidance_sections(classification),
        classification.id,
        classification.id,
    )
}

/// Render the stored-record detail page, raw response included.
pub fn detail_page(classification: &Classification) -> String {
    let raw = match &classification.raw_response {
        Some(raw) => format!(
            r#"
    <details class="raw-response">
        <summary>Raw API response</summary>
        <pre>{}</pre>
    </details>
    "#,
            html_escape(raw)
        ),
        None => String::new(),
    };

    format!(
        r#"
    {}
    {}
    {}
    <p class="actions">
        <a class="btn" href="/download/{}">Download PDF report</a>
        <a href="/history">Back to history</a>
    </p>
    "#,
        summary_card(classification),
        guidance_sections(classification),
        raw,
        classification.id,
    )
}

/// Render a "not found" body.
pub fn not_found_page() -> String {
    "<p>Classification not found.</p>".to_string()
}

/// Render an error body.
pub fn error_page(message: &str) -> String {
    format!("<p class=\"error-banner\">{}</p>", html_escape(message))
}

/// Summary card with image, category, and confidence.
fn summary_card(classification: &Classification) -> String {
    let category = classification
        .predicted_category
        .map(|c| c.display_name())
        .unwrap_or("Pending");
    let description = classification
        .waste_description
        .as_deref()
        .unwrap_or("No description available");

    format!(
        r#"
    <div class="summary-card">
        <img class="waste-image" src="/media/{}" alt="Analyzed waste image">
        <table class="kv-table">
            <tr><th>Report ID</th><td>{}</td></tr>
            <tr><th>Category</th><td><span class="badge">{}</span></td></tr>
            <tr><th>Confidence</th><td>{}</td></tr>
            <tr><th>State</th><td>{} ({})</td></tr>
            <tr><th>Analyzed</th><td>{}</td></tr>
        </table>
        <p class="description">{}</p>
    </div>
    "#,
        classification.image_path.display(),
        classification.report_id(),
        html_escape(category),
        format_confidence(classification.confidence_score),
        html_escape(classification.state.name()),
        classification.state.code(),
        classification.created_at.format("%Y-%m-%d %H:%M UTC"),
        html_escape(description),
    )
}

/// The disposal/risk/safety/additional sections, skipping empty fields.
fn guidance_sections(classification: &Classification) -> String {
    let mut out = String::new();

    section(
        &mut out,
        "Disposal Instructions",
        &[
            ("General Method", &classification.disposal_instructions),
            ("State-Specific Regulations", &classification.state_specific_laws),
            ("Authorized Facilities", &classification.authorized_facilities),
        ],
    );
    section(
        &mut out,
        "Risk Assessment",
        &[
            ("Health Hazards", &classification.health_hazards),
            ("Environmental Risks", &classification.environmental_risks),
        ],
    );
    section(
        &mut out,
        "Safety Measures",
        &[
            ("Precautions", &classification.precautions),
            ("Protective Equipment", &classification.protective_equipment),
            ("Emergency Procedures", &classification.emergency_procedures),
        ],
    );
    section(
        &mut out,
        "Additional Information",
        &[
            ("Recyclability", &classification.recyclability_info),
            ("Cost Implications", &classification.cost_implications),
        ],
    );

    out
}

fn section(out: &mut String, heading: &str, fields: &[(&str, &Option<String>)]) {
    if fields.iter().all(|(_, value)| value.is_none()) {
        return;
    }

    out.push_str(&format!("<section><h2>{}</h2>", heading));
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!(
                r#"<h3>{}</h3><p>{}</p>"#,
                label,
                html_escape(value)
            ));
        }
    }
    out.push_str("</section>");
}

/// Shared table for home/history listings.
fn classification_table(classifications: &[Classification]) -> String {
    let mut rows = String::new();

    for c in classifications {
        let category = c
            .predicted_category
            .map(|cat| cat.display_name())
            .unwrap_or("Pending");

        rows.push_str(&format!(
            r#"
        <tr>
            <td><a href="/detail/{}">{}</a></td>
            <td><span class="badge">{}</span></td>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
        </tr>
        "#,
            c.id,
            c.report_id(),
            html_escape(category),
            html_escape(c.state.name()),
            format_confidence(c.confidence_score),
            c.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    format!(
        r#"
    <table class="listing">
        <thead>
            <tr>
                <th>Report</th>
                <th>Category</th>
                <th>State</th>
                <th>Confidence</th>
                <th>Analyzed</th>
            </tr>
        </thead>
        <tbody>
            {}
        </tbody>
    </table>
    "#,
        rows
    )
}
