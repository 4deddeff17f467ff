use crate::config::{ConfigOverrides, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};
use reviewscope_classifiers::ReviewReport;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reviewscope")]
#[command(
    author,
    version,
    about = "Product review sentiment analysis with an LSTM model"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI and HTTP API
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Listen address
        #[arg(short, long)]
        address: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Model weights (SafeTensors)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Tokenizer file
        #[arg(long)]
        tokenizer: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a single review and print the result
    Analyze {
        /// Review text (read from stdin when omitted)
        text: Option<String>,

        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Model weights (SafeTensors)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Tokenizer file
        #[arg(long)]
        tokenizer: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    /// CLI values that override the configuration file
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Serve {
                address,
                port,
                model,
                tokenizer,
                ..
            } => ConfigOverrides {
                address: address.clone(),
                port: *port,
                model: model.clone(),
                tokenizer: tokenizer.clone(),
            },
            Commands::Analyze {
                model, tokenizer, ..
            } => ConfigOverrides {
                model: model.clone(),
                tokenizer: tokenizer.clone(),
                ..Default::default()
            },
        }
    }
}

/// Human-readable report for the terminal
pub fn render_report(report: &ReviewReport) -> String {
    let sentiment = &report.sentiment;
    let insights = &report.insights;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Sentiment:    {} ({:.1}% confidence)",
        sentiment.label, insights.confidence_percent
    );
    let _ = writeln!(out, "Raw score:    {:.4}", sentiment.raw_score);
    let _ = writeln!(
        out,
        "Words:        {} ({:?} analysis)",
        insights.word_count, insights.analysis_depth
    );
    let _ = writeln!(out, "Strength:     {:?}", insights.strength);
    let _ = writeln!(out, "Confidence:   {:?}", insights.confidence_level);
    let _ = writeln!(out, "Reliability:  {:?}", insights.reliability);
    let _ = writeln!(out, "Input:        {:?}", insights.input_status);
    if let Some(accuracy) = insights.reported_accuracy {
        let _ = writeln!(out, "Model accuracy: {:.1}%", accuracy * 100.0);
    }

    out
}
