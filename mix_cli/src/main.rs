//! # Mix Design CLI
//!
//! Command-line front end for ACI 211.1 concrete mix proportioning.
//!
//! ```bash
//! # Start from the default inputs
//! mix-design template > mix.json
//!
//! # Nine-step calculation and final proportions
//! mix-design compute mix.json
//!
//! # PDF report
//! mix-design report mix.json -o mix.pdf --engineer "J. Smith" --job-id 24-017
//! ```

mod explain;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mix_core::pdf::render_mix_pdf;
use mix_core::tables::RECOMMENDED_SLUMPS;
use mix_core::units::CubicYards;
use mix_core::{compute, CalcError, MixInputs, MixResult};

use crate::explain::{explain_or_fallback, GeminiExplainer};

/// ACI 211.1 concrete mix design calculator.
#[derive(Parser)]
#[command(name = "mix-design")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the nine-step calculation for an inputs file.
    Compute {
        /// Path to a MixInputs JSON file.
        inputs: PathBuf,

        /// Print the full result as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Write a PDF report for an inputs file.
    Report {
        /// Path to a MixInputs JSON file.
        inputs: PathBuf,

        /// Output PDF path.
        #[arg(short, long)]
        output: PathBuf,

        /// Engineer name for the report header.
        #[arg(long, default_value = "")]
        engineer: String,

        /// Job identifier for the report header and footer.
        #[arg(long, default_value = "")]
        job_id: String,
    },

    /// Explain calculation steps with a language model.
    Explain {
        /// Path to a MixInputs JSON file.
        inputs: PathBuf,

        /// Step to explain (1-9). All steps when omitted.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
        step: Option<u8>,
    },

    /// Print default inputs as JSON.
    Template,

    /// Print recommended slumps by construction type.
    Slumps,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compute { inputs, json } => {
            let inputs = load_inputs(&inputs)?;
            let result = compute(&inputs)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&inputs, &result);
            }
            Ok(())
        }
        Commands::Report {
            inputs: path,
            output,
            engineer,
            job_id,
        } => {
            let inputs = load_inputs(&path)?;
            let result = compute(&inputs)?;
            let pdf = render_mix_pdf(&inputs, &result, &engineer, &job_id)?;
            std::fs::write(&output, pdf).map_err(|e| {
                CalcError::file_error("write", output.display().to_string(), e.to_string())
            })?;
            tracing::info!(path = %output.display(), "report written");
            println!("Report written to {}", output.display());
            Ok(())
        }
        Commands::Explain { inputs, step } => {
            let inputs = load_inputs(&inputs)?;
            let result = compute(&inputs)?;
            let service = GeminiExplainer::from_env()?;
            tracing::debug!(model = service.model(), "explanation service configured");

            for s in result.steps.iter().filter(|s| step.map_or(true, |id| s.id == id)) {
                let text = explain_or_fallback(&service, s, &inputs).await;
                println!("═══════════════════════════════════════");
                println!("  STEP {}: {}", s.id, s.title.to_uppercase());
                println!("═══════════════════════════════════════");
                println!("  {}", s.value);
                println!();
                println!("{}", text);
                println!();
            }
            Ok(())
        }
        Commands::Template => {
            println!("{}", serde_json::to_string_pretty(&MixInputs::default())?);
            Ok(())
        }
        Commands::Slumps => {
            println!("Recommended slumps (ACI 211.1 Table 6.3.1)");
            println!();
            println!("  {:<50} {:>6} {:>6}", "Type of construction", "Min", "Max");
            for s in RECOMMENDED_SLUMPS.iter() {
                println!("  {:<50} {:>5}\" {:>5}\"", s.construction, s.min_in, s.max_in);
            }
            Ok(())
        }
    }
}

fn load_inputs(path: &Path) -> Result<MixInputs> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let inputs = serde_json::from_str(&text)
        .map_err(CalcError::from)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(inputs)
}

fn print_summary(inputs: &MixInputs, result: &MixResult) {
    println!("═══════════════════════════════════════");
    println!("  ACI 211.1 MIX DESIGN");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Strength:  {} psi", inputs.strength_psi);
    println!("  Type:      {}", inputs.concrete_type);
    println!("  Exposure:  {}", inputs.exposure);
    println!("  Slump:     {}-{} in", inputs.slump_min_in, inputs.slump_max_in);
    println!("  Max agg:   {} in", inputs.max_agg_size_in);
    println!();

    for step in &result.steps {
        println!("Step {}: {}", step.id, step.title);
        println!("  {}", step.value);
        for line in step.calculation.lines() {
            println!("    {}", line);
        }
        println!();
    }

    let batch = result.batch_quantities(CubicYards(inputs.batch_volume_yd3));

    println!("═══════════════════════════════════════");
    println!("  FINAL PROPORTIONS");
    println!("═══════════════════════════════════════");
    println!("  {:<16} {:>10} {:>12}", "", "per yd³", format!("{} yd³", batch.volume_yd3));
    println!("  {:<16} {:>10.1} {:>12.1}", "Water", result.water_lb, batch.water_lb);
    println!("  {:<16} {:>10.1} {:>12.1}", "Cement", result.cement_lb, batch.cement_lb);
    println!("  {:<16} {:>10.1} {:>12.1}", "Coarse agg", result.coarse_agg_lb, batch.coarse_agg_lb);
    println!("  {:<16} {:>10.1} {:>12.1}", "Fine agg", result.fine_agg_lb, batch.fine_agg_lb);
    println!("  {:<16} {:>10.1} {:>12.1}", "Total", result.total_weight_lb(), batch.total_lb());
    println!();
    println!("  Air content:  {}%", result.air_content_pct);
    println!("  w/c:          {:.2}", result.water_cement_ratio);
    println!("  Unit weight:  {:.1} lb/ft³", result.unit_weight_pcf);

    if result.has_negative_batch_water() {
        println!();
        println!("  [WARN] Aggregate surface moisture exceeds the design water; batch water is negative.");
    }
}

/// Print an error and, when it is a calculation error, its structured JSON.
fn report_error(e: &anyhow::Error) {
    eprintln!("Error: {:#}", e);
    if let Some(calc) = e.downcast_ref::<CalcError>() {
        if let Ok(json) = serde_json::to_string_pretty(calc) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explain_step_range() {
        assert!(Cli::try_parse_from(["mix-design", "explain", "mix.json", "--step", "9"]).is_ok());
        assert!(Cli::try_parse_from(["mix-design", "explain", "mix.json", "--step", "10"]).is_err());
    }

    #[test]
    fn test_template_round_trips() {
        let json = serde_json::to_string_pretty(&MixInputs::default()).unwrap();
        let back: MixInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MixInputs::default());
    }

    #[test]
    fn test_load_inputs_missing_file_is_file_error() {
        let err = load_inputs(Path::new("/nonexistent/mix.json")).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc.error_code(), "FILE_ERROR");
    }
}
