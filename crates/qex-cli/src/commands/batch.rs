//! Batch command - extract quotations from many workbooks.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::extract::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input workbooks (e.g. "quotes/*.xlsx")
    #[arg(required = true)]
    pattern: String,

    /// Directory for per-file JSON output (default: alongside inputs)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a CSV summary of all results to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Issuing company name, excluded from client-name candidates
    #[arg(long)]
    issuer: Option<String>,

    /// Keep going after individual failures
    #[arg(long, default_value_t = true)]
    continue_on_error: bool,
}

struct FileOutcome {
    path: PathBuf,
    ref_no: Option<String>,
    client: Option<String>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(issuer) = &args.issuer {
        config.extraction.issuer_name = issuer.clone();
    }

    let inputs: Vec<PathBuf> = glob::glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .collect();
    if inputs.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in &inputs {
        pb.set_message(
            input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match qex_core::extract_file(input, &config) {
            Ok(extraction) => {
                if let Some(dir) = &args.output_dir {
                    let name = input
                        .file_stem()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "quotation".to_string());
                    let out = dir.join(format!("{}.json", name));
                    fs::write(&out, serde_json::to_string_pretty(&extraction.quotation)?)?;
                }
                outcomes.push(FileOutcome {
                    path: input.clone(),
                    ref_no: Some(extraction.quotation.ref_no.clone()),
                    client: Some(extraction.quotation.client_name.clone()),
                    error: None,
                });
            }
            Err(e) => {
                warn!("{}: {}", input.display(), e);
                outcomes.push(FileOutcome {
                    path: input.clone(),
                    ref_no: None,
                    client: None,
                    error: Some(e.to_string()),
                });
                if !args.continue_on_error {
                    pb.abandon();
                    anyhow::bail!("{}: {}", input.display(), e);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &outcomes)?;
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    let succeeded = outcomes.len() - failed;
    println!(
        "{} {} extracted, {} {} failed",
        style(succeeded).green(),
        if succeeded == 1 { "file" } else { "files" },
        style(failed).red(),
        if failed == 1 { "file" } else { "files" },
    );
    for outcome in outcomes.iter().filter(|o| o.error.is_some()) {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            outcome.path.display(),
            outcome.error.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}

fn write_summary(path: &PathBuf, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["file", "status", "ref_no", "client", "error"])?;
    for outcome in outcomes {
        let path = outcome.path.display().to_string();
        writer.write_record([
            path.as_str(),
            if outcome.error.is_none() { "ok" } else { "failed" },
            outcome.ref_no.as_deref().unwrap_or(""),
            outcome.client.as_deref().unwrap_or(""),
            outcome.error.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
