//! PDF report generation for classification results.
//!
//! Builds an A4 report with lopdf content streams: a title header, a
//! metadata block, the classification summary, then the disposal, risk,
//! safety, and additional-information sections. Sections whose fields were
//! never filled in are skipped, so a pending classification still renders.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

use crate::models::Classification;
use crate::utils::format_confidence;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 56.0;

const BODY_SIZE: f64 = 10.5;
const LABEL_SIZE: f64 = 11.0;
const HEADING_SIZE: f64 = 14.0;
const TITLE_SIZE: f64 = 20.0;

/// Errors raised while assembling the PDF.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to assemble PDF: {0}")]
    Pdf(String),
}

/// Render a classification into PDF bytes.
pub fn render(classification: &Classification) -> Result<Vec<u8>, ReportError> {
    let mut composer = Composer::new();

    composer.title("Waste Analysis Report");
    composer.gap(6.0);

    composer.meta_line("Report ID", &classification.report_id());
    composer.meta_line(
        "Analysis Date",
        &classification
            .created_at
            .format("%B %d, %Y at %H:%M UTC")
            .to_string(),
    );
    composer.meta_line(
        "State/Region",
        &format!(
            "{} ({})",
            classification.state.name(),
            classification.state.code()
        ),
    );
    if let Some(name) = classification.image_path.file_name() {
        composer.meta_line("Image File", &name.to_string_lossy());
    }

    composer.heading("Classification Summary");
    let category = classification
        .predicted_category
        .map(|c| c.display_name())
        .unwrap_or("Pending analysis");
    composer.labeled("Waste Category", category);
    composer.labeled(
        "Confidence Level",
        &format_confidence(classification.confidence_score),
    );
    if let Some(description) = &classification.waste_description {
        composer.labeled("Description", description);
    }

    composer.section(
        "Disposal Instructions",
        &[
            ("General Disposal Method", &classification.disposal_instructions),
            ("State-Specific Regulations", &classification.state_specific_laws),
            ("Authorized Facilities", &classification.authorized_facilities),
        ],
    );
    composer.section(
        "Risk Assessment",
        &[
            ("Health Hazards", &classification.health_hazards),
            ("Environmental Risks", &classification.environmental_risks),
        ],
    );
    composer.section(
        "Safety Measures",
        &[
            ("Precautions", &classification.precautions),
            ("Protective Equipment", &classification.protective_equipment),
            ("Emergency Procedures", &classification.emergency_procedures),
        ],
    );
    composer.section(
        "Additional Information",
        &[
            ("Recyclability", &classification.recyclability_info),
            ("Cost Implications", &classification.cost_implications),
        ],
    );

    composer.heading("Important Disclaimer");
    composer.paragraph(
        "This analysis is generated using AI technology and is provided for \
         informational purposes only. Always consult with local waste management \
         authorities and follow official disposal guidelines for your region. The \
         accuracy of this analysis depends on the quality of the provided image \
         and may not be 100% accurate in all cases.",
    );
    composer.gap(10.0);
    composer.paragraph(
        "For more information about waste disposal in your area, contact your \
         local municipal corporation or the Pollution Control Board of your state.",
    );

    assemble(composer.finish())
}

/// Turn per-page operation lists into a complete PDF document.
fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let page_count = pages.len();
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    Ok(buffer)
}

/// Flows text down the page, breaking onto a new page when the cursor
/// reaches the bottom margin.
struct Composer {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f64,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(std::mem::take(&mut self.current));
        self.pages
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.break_page();
        }
    }

    fn gap(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn text_line(&mut self, font: &str, size: f64, text: &str) {
        self.y -= size;
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![MARGIN.into(), self.y.into()]),
            Operation::new("Tj", vec![Object::string_literal(sanitize(text))]),
            Operation::new("ET", vec![]),
        ]);
        self.y -= size * 0.45;
    }

    fn title(&mut self, text: &str) {
        self.text_line("F2", TITLE_SIZE, text);
        self.rule();
    }

    fn heading(&mut self, text: &str) {
        self.ensure_room(HEADING_SIZE * 3.0);
        self.gap(12.0);
        self.text_line("F2", HEADING_SIZE, text);
        self.rule();
    }

    fn rule(&mut self) {
        self.current.extend([
            Operation::new("w", vec![0.7.into()]),
            Operation::new("RG", vec![0.2.into(), 0.3.into(), 0.35.into()]),
            Operation::new("m", vec![MARGIN.into(), self.y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), self.y.into()]),
            Operation::new("S", vec![]),
        ]);
        self.y -= 8.0;
    }

    fn meta_line(&mut self, label: &str, value: &str) {
        self.ensure_room(LABEL_SIZE * 2.0);
        self.text_line("F1", BODY_SIZE, &format!("{}: {}", label, value));
    }

    fn labeled(&mut self, label: &str, value: &str) {
        self.ensure_room(LABEL_SIZE * 2.0);
        self.text_line("F2", LABEL_SIZE, &format!("{}:", label));
        self.paragraph(value);
    }

    fn paragraph(&mut self, text: &str) {
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (BODY_SIZE * 0.5)) as usize;
        for line in wrap_text(text, max_chars) {
            self.ensure_room(BODY_SIZE * 2.0);
            self.text_line("F1", BODY_SIZE, &line);
        }
        self.gap(4.0);
    }

    /// Render a section heading plus its labeled paragraphs, skipping fields
    /// that were never filled in. Sections with no content are omitted
    /// entirely.
    fn section(&mut self, heading: &str, fields: &[(&str, &Option<String>)]) {
        if fields.iter().all(|(_, value)| value.is_none()) {
            return;
        }
        self.heading(heading);
        for (label, value) in fields {
            if let Some(value) = value {
                self.labeled(label, value);
            }
        }
    }
}

/// Helvetica is Latin-1 only; replace anything it cannot encode.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 256 { c } else { '?' })
        .collect()
}

/// Greedy word wrap with a hard split for overlong words.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if word.len() > max_chars {
            let mut rest = word;
            while rest.len() > max_chars {
                let (head, tail) = rest.split_at(max_chars);
                lines.push(head.to_string());
                rest = tail;
            }
            line = rest.to_string();
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
