//! `rubric` — evaluate instruction-following benchmark responses.

mod dataset;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rubric", version, about = "Constraint-verification harness for instruction-following evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score model responses against a benchmark dataset
    Eval {
        /// JSONL test cases (prompt, instruction_id_list, kwargs)
        #[arg(long)]
        input_data: PathBuf,

        /// JSONL model responses (prompt, response)
        #[arg(long)]
        input_response_data: PathBuf,

        /// Write the full JSON report here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Model name to record in the report
        #[arg(long)]
        model_name: Option<String>,
    },

    /// List every registered constraint id
    Ids,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match Cli::parse().command {
        Command::Eval {
            input_data,
            input_response_data,
            output,
            model_name,
        } => {
            let cases = dataset::read_test_cases(&input_data)
                .with_context(|| format!("loading test cases from {}", input_data.display()))?;
            let responses = dataset::read_responses(&input_response_data).with_context(|| {
                format!("loading responses from {}", input_response_data.display())
            })?;
            tracing::info!(
                cases = cases.len(),
                responses = responses.len(),
                "dataset loaded"
            );

            let report = report::evaluate(&cases, &responses, model_name);
            println!("{}", report.summary());

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&report)?;
                fs::write(&path, json)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                println!("report saved to {}", path.display());
            }
        }
        Command::Ids => {
            for id in rubric_core::registered_ids() {
                println!("{id}");
            }
        }
    }
    Ok(())
}
