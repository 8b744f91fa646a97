use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use inbox_classifier::api;
use inbox_classifier::classifier::Classifier;
use inbox_classifier::config::{ServiceConfig, TrainConfig};
use inbox_classifier::extract::{extract_text, validate_upload};
use inbox_classifier::training;

#[derive(Parser)]
#[command(name = "inbox-classifier", version, about = "Triage Portuguese emails into Produtivo / Improdutivo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long, env = "CLASSIFIER_HOST")]
        host: Option<String>,
        /// Port to bind
        #[arg(long, env = "CLASSIFIER_PORT")]
        port: Option<u16>,
        /// Trained model artifact
        #[arg(long, env = "CLASSIFIER_MODEL_PATH")]
        model: Option<PathBuf>,
    },
    /// Classify a single message and print the result as JSON
    Classify {
        /// Trained model artifact
        #[arg(long, env = "CLASSIFIER_MODEL_PATH")]
        model: Option<PathBuf>,
        /// Read the message from a .txt, .pdf or .eml file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Message text
        text: Option<String>,
    },
    /// Fit a model from a labelled CSV and save the artifact
    Train {
        /// CSV with `text,label` columns
        #[arg(long, env = "CLASSIFIER_DATASET_PATH")]
        dataset: Option<PathBuf>,
        /// Output artifact path
        #[arg(long, env = "CLASSIFIER_MODEL_PATH")]
        model: Option<PathBuf>,
        /// Shuffle seed for the held-out split
        #[arg(long, env = "CLASSIFIER_TRAIN_SEED")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve { host, port, model } => {
            let mut config = ServiceConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(model) = model {
                config.model_path = model;
            }

            eprintln!("📬 Inbox Classifier v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("   Model: {}", config.model_path.display());
            eprintln!("   API: http://{}/classify", config.bind_addr());

            let classifier = Arc::new(Classifier::new(config.model_path.clone()));
            api::serve(&config, classifier)
                .await
                .context("HTTP server failed")?;
        }
        Command::Classify { model, file, text } => {
            let config = ServiceConfig::from_env();
            let model_path = model.unwrap_or(config.model_path);

            let content = match (file, text) {
                (Some(path), _) => {
                    let data = std::fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let filename = path.file_name().and_then(|n| n.to_str());
                    let kind = validate_upload(filename, &data, config.max_upload_bytes)?;
                    extract_text(kind, &data)?
                }
                (None, Some(text)) => text,
                (None, None) => anyhow::bail!("Provide message text or --file"),
            };

            let classifier = Classifier::new(model_path);
            let result = tokio::task::spawn_blocking(move || classifier.classify(&content)).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Train {
            dataset,
            model,
            seed,
        } => {
            let mut config = TrainConfig::from_env();
            if let Some(dataset) = dataset {
                config.dataset_path = dataset;
            }
            if let Some(model) = model {
                config.model_path = model;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }

            let outcome = tokio::task::spawn_blocking(move || training::train(&config)).await??;
            eprintln!(
                "Trained on {} rows {:?}, saved to {}",
                outcome.rows,
                outcome.class_counts,
                outcome.model_path.display()
            );
            match outcome.report {
                Some(report) => println!("{report}"),
                None => eprintln!("Evaluation skipped (dataset too small)"),
            }
        }
    }

    Ok(())
}
