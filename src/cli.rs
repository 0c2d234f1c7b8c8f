//! Command-line interface for the career predictor.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::{Predictor, PredictorConfig};
use crate::answers::QuestionnaireAnswer;
use crate::model_loader::ServingMode;
use crate::refine::Preferences;
use crate::trainer::{self, print_report, Config, ModelVariant};

#[derive(Parser, Debug)]
#[command(name = "career-predictor")]
#[command(about = "Career prediction from questionnaire answers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// Artifact directory (overrides [output].model_dir)
    #[arg(long, global = true)]
    pub model_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the enhanced and basic models
    Train {
        /// Train only the basic (survey labels) model
        #[arg(long)]
        basic: bool,

        /// Add the industry role catalog and train deeper trees
        #[arg(long)]
        industry: bool,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Survey CSV (overrides [data].csv_path)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Write the expanded dataset without training
    Expand {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        out: PathBuf,

        /// Add the industry role catalog
        #[arg(long)]
        industry: bool,
    },
    /// Predict career roles for an answers JSON file
    Predict {
        #[arg(long)]
        answers: String,

        /// Number of ranked roles to show
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Work preferences JSON for refined suggestions
        #[arg(long)]
        preferences: Option<String>,
    },
    /// Show what the loaded artifact set contains
    Inspect,
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = &cli.model_dir {
        config.output.model_dir = dir.clone();
    }

    match cli.command {
        Commands::Train {
            basic,
            industry,
            seed,
            data,
        } => {
            if industry {
                config.use_industry_catalog();
            }
            let data = data.unwrap_or_else(|| PathBuf::from(&config.data.csv_path));
            let variants: &[ModelVariant] = if basic {
                &[ModelVariant::Basic]
            } else {
                &[ModelVariant::Enhanced, ModelVariant::Basic]
            };
            for &variant in variants {
                let report = trainer::train(seed, &data, &config, variant)
                    .with_context(|| format!("training {:?} model on {}", variant, data.display()))?;
                print_report(&report);
            }
            println!("To predict: career-predictor predict --answers answers.json\n");
            Ok(())
        }
        Commands::Expand {
            seed,
            data,
            out,
            industry,
        } => {
            if industry {
                config.expansion.industry_roles = true;
            }
            let summary = trainer::expand_to_csv(seed, &data, &out, &config)
                .with_context(|| format!("expanding {}", data.display()))?;
            println!("✓ Expanded dataset written to {}", out.display());
            println!(
                "  {} original + {} derived + {} synthetic rows, {} labels (was {})",
                summary.original_rows,
                summary.derived_rows,
                summary.synthetic_rows,
                summary.expanded_labels,
                summary.original_labels
            );
            Ok(())
        }
        Commands::Predict {
            answers,
            top,
            preferences,
        } => {
            let predictor = load_predictor(&config)?;
            let answer =
                QuestionnaireAnswer::load(&answers).with_context(|| format!("reading answers from {}", answers))?;

            let ranked = predictor.predict_ranked(&answer, top)?;
            println!("{}", "=".repeat(60));
            println!("{:<45} | {:>8}", "Career", "Prob %");
            println!("{}", "=".repeat(60));
            for item in &ranked {
                println!("{:<45} | {:>7.1}%", item.label, item.probability * 100.0);
            }
            println!("{}", "=".repeat(60));

            if let Some(path) = preferences {
                let json = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
                let preferences: Preferences =
                    serde_json::from_str(&json).with_context(|| format!("parsing preferences in {}", path))?;
                println!("\nSuggested roles:");
                for (rank, role) in predictor.predict_refined(&answer, &preferences)?.iter().enumerate() {
                    println!("  {}. {}", rank + 1, role);
                }
            }
            Ok(())
        }
        Commands::Inspect => {
            let predictor = load_predictor(&config)?;
            print!("{}", predictor.model_info());
            let model = predictor.model();
            println!(
                "  Trained with seed {} ({} train / {} test rows)",
                model.manifest.seed, model.manifest.train_rows, model.manifest.test_rows
            );
            println!("\nColumns:");
            for name in model.schema.feature_names() {
                println!("  - {}", name);
            }
            Ok(())
        }
    }
}

fn load_predictor(config: &Config) -> Result<Predictor> {
    let loader = PredictorConfig::new().with_model_dir(config.output.model_dir.clone());
    let predictor = Predictor::with_config(loader).context("loading model artifacts")?;
    if let ServingMode::Degraded { reason } = predictor.mode() {
        eprintln!("⚠ Serving basic model, predictions limited to survey roles ({})", reason);
    }
    Ok(predictor)
}
