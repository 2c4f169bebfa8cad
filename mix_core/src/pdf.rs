//! # PDF Generation Module
//!
//! Renders a mix design report to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - Step text goes in as Typst string literals, so no markup escaping is needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! The report only reads the `MixResult`; it never recomputes anything.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mix_core::pdf::render_mix_pdf;
//! use mix_core::{compute, MixInputs};
//!
//! let inputs = MixInputs::default();
//! let result = compute(&inputs).unwrap();
//! let pdf_bytes = render_mix_pdf(&inputs, &result, "Jane Engineer", "25-014").unwrap();
//! std::fs::write("mix_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::mix_design::{BatchQuantities, MixInputs, MixResult, MixStep};
use crate::errors::{CalcError, CalcResult};
use crate::units::CubicYards;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the mix design report
const MIX_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[ACI 211.1 Mix Design]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[ACI 211.1 Mix Design Report]
    #v(4pt)
    #text(size: 12pt)[{{SUBTITLE}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{{ENGINEER}}],
      [Job ID:], [{{JOB_ID}}],
      [Generated:], [{{DATE}}],
    )
  ],
  [
    *Method*
    #v(4pt)
    ACI 211.1 Standard Practice for Selecting Proportions for Normal,
    Heavyweight, and Mass Concrete (absolute volume method)
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
{{INPUT_ROWS}}
)

#v(12pt)

== Final Proportions

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, right),
  table.header([*Material*], [*Per yd#super[3] (lb)*], [*Batch {{BATCH_VOLUME}} yd#super[3] (lb)*]),
{{PROPORTION_ROWS}}
)

#v(6pt)
Air content: {{AIR_PCT}} % #h(1fr) w/c = {{WC_RATIO}} #h(1fr) Unit weight: {{UNIT_WEIGHT}} lb/ft#super[3]

{{WATER_NOTE}}

#pagebreak()

== Calculation Steps

{{STEP_BLOCKS}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Proportions are a starting point for trial batches. \
  Verify by trial mixtures and testing before use in construction.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a mix design to PDF.
///
/// # Arguments
///
/// * `inputs` - The inputs the result was computed from
/// * `result` - The calculation results
/// * `engineer` - Engineer name for the report
/// * `job_id` - Job/project ID
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - If Typst compilation or PDF rendering fails
pub fn render_mix_pdf(inputs: &MixInputs, result: &MixResult, engineer: &str, job_id: &str) -> CalcResult<Vec<u8>> {
    let batch = result.batch_quantities(CubicYards(inputs.batch_volume_yd3));

    let subtitle = format!(
        "{} psi {} concrete, {} exposure",
        inputs.strength_psi, inputs.concrete_type, inputs.exposure
    );
    let water_note = if result.has_negative_batch_water() {
        "#text(fill: rgb(\"#a94442\"))[*Note:* aggregate surface moisture exceeds the design water; \
         adjusted batch water is negative.]"
    } else {
        ""
    };

    let source = MIX_TEMPLATE
        .replace("{{SUBTITLE}}", &escape_typst(&subtitle))
        .replace("{{ENGINEER}}", &escape_typst(engineer))
        .replace("{{JOB_ID}}", &escape_typst(job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{INPUT_ROWS}}", &build_input_rows(inputs))
        .replace("{{BATCH_VOLUME}}", &format!("{}", inputs.batch_volume_yd3))
        .replace("{{PROPORTION_ROWS}}", &build_proportion_rows(result, &batch))
        .replace("{{AIR_PCT}}", &format!("{}", result.air_content_pct))
        .replace("{{WC_RATIO}}", &format!("{:.2}", result.water_cement_ratio))
        .replace("{{UNIT_WEIGHT}}", &format!("{:.1}", result.unit_weight_pcf))
        .replace("{{WATER_NOTE}}", water_note)
        .replace("{{STEP_BLOCKS}}", &build_step_blocks(&result.steps));

    debug!(bytes = source.len(), "compiling mix design report");

    // Compile the Typst document
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    // Render to PDF
    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '/' => "\\/".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Quote text as a Typst string literal
fn typst_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Table row with literal cells
fn table_row(cells: &[&str]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| format!("[#{}]", typst_str(c))).collect();
    format!("  {},", cells.join(", "))
}

fn build_input_rows(inputs: &MixInputs) -> String {
    let rows: [(&str, String, &str); 15] = [
        ("Target strength", inputs.strength_psi.to_string(), "psi"),
        ("Concrete type", inputs.concrete_type.to_string(), ""),
        ("Exposure", inputs.exposure.to_string(), ""),
        ("Slump", format!("{}-{}", inputs.slump_min_in, inputs.slump_max_in), "in"),
        ("Maximum aggregate size", inputs.max_agg_size_in.to_string(), "in"),
        ("Cement specific gravity", inputs.cement_sg.to_string(), ""),
        ("Coarse aggregate specific gravity", inputs.ca_sg.to_string(), ""),
        ("Coarse aggregate absorption", inputs.ca_absorption_pct.to_string(), "%"),
        ("Coarse aggregate dry-rodded unit weight", inputs.ca_druw_pcf.to_string(), "lb/ft³"),
        ("Coarse aggregate surface moisture", inputs.ca_moisture_pct.to_string(), "%"),
        ("Fine aggregate specific gravity", inputs.fa_sg.to_string(), ""),
        ("Fine aggregate absorption", inputs.fa_absorption_pct.to_string(), "%"),
        ("Fine aggregate fineness modulus", inputs.fa_fineness_modulus.to_string(), ""),
        ("Fine aggregate surface moisture", inputs.fa_moisture_pct.to_string(), "%"),
        ("Batch volume", inputs.batch_volume_yd3.to_string(), "yd³"),
    ];

    rows.iter()
        .map(|(label, value, unit)| table_row(&[*label, value.as_str(), *unit]))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_proportion_rows(result: &MixResult, batch: &BatchQuantities) -> String {
    let rows = [
        ("Water (adjusted)", result.water_lb, batch.water_lb),
        ("Cement", result.cement_lb, batch.cement_lb),
        ("Coarse aggregate (stockpile)", result.coarse_agg_lb, batch.coarse_agg_lb),
        ("Fine aggregate (stockpile)", result.fine_agg_lb, batch.fine_agg_lb),
        ("Total", result.total_weight_lb(), batch.total_lb()),
    ];

    rows.iter()
        .map(|(label, per_yd3, batch_lb)| {
            let per_yd3 = format!("{:.1}", per_yd3);
            let batch_lb = format!("{:.1}", batch_lb);
            table_row(&[*label, per_yd3.as_str(), batch_lb.as_str()])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_step_blocks(steps: &[MixStep]) -> String {
    steps
        .iter()
        .map(|step| {
            format!(
                "=== Step {}: #{}\n\n*Result:* #{}\n\n#block(width: 100%, fill: rgb(\"#f7f7f7\"), inset: 8pt, radius: 2pt)[#raw({}, block: true)]\n\n#v(6pt)\n",
                step.id,
                typst_str(&step.title),
                typst_str(&step.value),
                typst_str(&step.calculation)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::mix_design::compute;

    #[test]
    fn test_typst_str_escaping() {
        assert_eq!(typst_str("a \"b\"\nc\\d"), "\"a \\\"b\\\"\\nc\\\\d\"");
    }

    #[test]
    fn test_escape_typst_markup() {
        assert_eq!(escape_typst("Job #12 *draft*"), "Job \\#12 \\*draft\\*");
    }

    #[test]
    fn test_step_blocks_cover_all_steps() {
        let result = compute(&MixInputs::default()).unwrap();
        let blocks = build_step_blocks(&result.steps);
        for step in &result.steps {
            assert!(blocks.contains(&format!("=== Step {}:", step.id)));
            assert!(blocks.contains(&typst_str(&step.title)));
        }
    }

    #[test]
    fn test_pdf_generation() {
        let inputs = MixInputs::default();
        let result = compute(&inputs).unwrap();
        let pdf = render_mix_pdf(&inputs, &result, "Test Engineer", "TEST-001");

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_pdf_generation_negative_water() {
        let inputs = MixInputs {
            fa_moisture_pct: 30.0,
            slump_max_in: 2.0,
            ..MixInputs::default()
        };
        let result = compute(&inputs).unwrap();
        assert!(result.has_negative_batch_water());

        let pdf = render_mix_pdf(&inputs, &result, "Test Engineer", "TEST-002");
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }
}
