//! Extract command - pull a quotation record out of a single workbook.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use qex_core::{Extraction, QexConfig, Quotation};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input workbook (xlsx/xls/xlsb/ods)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Issuing company name, excluded from client-name candidates
    #[arg(long)]
    issuer: Option<String>,

    /// Re-check the record and print any structural issues
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per line item)
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(issuer) = &args.issuer {
        config.extraction.issuer_name = issuer.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let extraction = qex_core::extract_file(&args.input, &config)?;

    for warning in &extraction.warnings {
        eprintln!("{} {}", style("warning:").yellow(), warning);
    }

    if args.validate {
        let issues = extraction.quotation.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_quotation(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Wrote {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load the config file if given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<QexConfig> {
    match config_path {
        Some(path) => Ok(QexConfig::from_file(std::path::Path::new(path))?),
        None => Ok(QexConfig::default()),
    }
}

/// Render the extracted record in the requested format.
pub fn format_quotation(extraction: &Extraction, format: OutputFormat) -> anyhow::Result<String> {
    let quotation = &extraction.quotation;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(quotation)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record([
                "ref_no", "date", "client", "sr_no", "description", "quantity", "unit", "rate",
                "gst_percent", "amount",
            ])?;
            for item in &quotation.items {
                writer.write_record([
                    quotation.ref_no.clone(),
                    quotation.date.to_string(),
                    quotation.client_name.clone(),
                    item.sr_no.to_string(),
                    item.description.clone(),
                    item.quantity.to_string(),
                    item.unit.clone(),
                    item.rate.to_string(),
                    item.gst_percent.to_string(),
                    item.amount.to_string(),
                ])?;
            }
            Ok(String::from_utf8(writer.into_inner()?)?)
        }
        OutputFormat::Text => Ok(text_summary(quotation, extraction.processing_time_ms)),
    }
}

fn text_summary(quotation: &Quotation, elapsed_ms: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("Quotation {}\n", quotation.ref_no));
    out.push_str(&format!("  Date:     {}\n", quotation.date));
    out.push_str(&format!("  Client:   {}\n", quotation.client_name));
    out.push_str(&format!("  Terms:    {}\n", quotation.payment_terms));
    out.push_str(&format!("  Validity: {}\n", quotation.offer_validity));
    out.push_str(&format!("  Items ({}):\n", quotation.items.len()));
    for item in &quotation.items {
        out.push_str(&format!(
            "    {:>3}. {} x{} {} @ {} = {}\n",
            item.sr_no, item.description, item.quantity, item.unit, item.rate, item.amount
        ));
    }
    out.push_str(&format!("  Subtotal: {}\n", quotation.subtotal));
    out.push_str(&format!("  Total:    {}\n", quotation.grand_total));
    out.push_str(&format!("  ({} ms)\n", elapsed_ms));
    out
}
