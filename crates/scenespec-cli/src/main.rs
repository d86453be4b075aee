use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scenespec_core::{
    BusinessContext, CompileRequest, ExtractedFields, FollowupAnswer, Pipeline, PipelineConfig,
};

/// SceneSpec - compile robotics deployment notes into scene specifications
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON pipeline configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract intake fields from notes and print the follow-up questions
    Intake {
        /// File containing the deployment notes; "-" reads stdin
        #[arg(value_name = "NOTES")]
        notes: PathBuf,
    },

    /// Full loop: intake, ask the follow-up questions on the terminal,
    /// then run both compiler stages
    Run {
        /// File containing the deployment notes; "-" reads stdin
        #[arg(value_name = "NOTES")]
        notes: PathBuf,

        /// Business priority (1-5), fixed by the customer
        #[arg(short, long, value_name = "VALUE")]
        business_value: u8,
    },

    /// Run both compiler stages against a completed intake
    Compile {
        /// File containing the deployment notes; "-" reads stdin
        #[arg(value_name = "NOTES")]
        notes: PathBuf,

        /// JSON file with the intake extraction fields
        #[arg(short, long, value_name = "FILE")]
        extracted: PathBuf,

        /// JSON file with the operator's follow-up answers
        #[arg(short, long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Business priority (1-5), fixed by the customer
        #[arg(short, long, value_name = "VALUE")]
        business_value: u8,
    },
}

fn read_notes(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read notes from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes from {}", path.display()))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf, what: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} from {}", what, path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(
            path.to_str()
                .context("Configuration path is not valid UTF-8")?,
        )?,
        None => PipelineConfig::default(),
    };
    let pipeline = Pipeline::from_env(&config)?;

    match cli.command {
        Commands::Intake { notes } => {
            let notes = read_notes(&notes)?;
            let report = pipeline.intake(&notes).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Run {
            notes,
            business_value,
        } => {
            let notes = read_notes(&notes)?;
            let report = pipeline.intake(&notes).await?;

            let mut intake_followups = Vec::new();
            for followup in &report.followups {
                eprintln!("{}", followup.question);
                let mut answer = String::new();
                std::io::stdin()
                    .read_line(&mut answer)
                    .context("Failed to read answer")?;
                let answer = answer.trim();
                if answer.is_empty() {
                    continue;
                }
                intake_followups.push(FollowupAnswer {
                    field: followup.field,
                    question: followup.question.clone(),
                    answer: answer.to_string(),
                });
            }
            tracing::info!(
                asked = report.followups.len(),
                answered = intake_followups.len(),
                "follow-up answers collected"
            );

            let compiled = pipeline
                .compile(&CompileRequest {
                    notes,
                    intake_extracted: report.extracted,
                    intake_followups,
                    business_context: BusinessContext {
                        priority_customer_business_value: business_value,
                    },
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        }
        Commands::Compile {
            notes,
            extracted,
            answers,
            business_value,
        } => {
            let notes = read_notes(&notes)?;
            let intake_extracted: ExtractedFields = read_json(&extracted, "intake extraction")?;
            let intake_followups: Vec<FollowupAnswer> = match &answers {
                Some(path) => read_json(path, "follow-up answers")?,
                None => Vec::new(),
            };

            let report = pipeline
                .compile(&CompileRequest {
                    notes,
                    intake_extracted,
                    intake_followups,
                    business_context: BusinessContext {
                        priority_customer_business_value: business_value,
                    },
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
