use clap::Parser;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reviewscope_classifiers::Analysis;
use reviewscope_web::cli::{render_report, Cli, Commands};
use reviewscope_web::config::AppConfig;
use reviewscope_web::server::{run_server, AppState};
use std::io::Read;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Commands::Serve {
            config, verbose, ..
        } => {
            init_logging(verbose);

            let config = AppConfig::load(&config, &overrides)?;
            let metrics = init_metrics()?;
            let analyzer = config.build_analyzer();

            // Warm the artifact cache; a failure is kept and reported per request
            let warm = analyzer.clone();
            match tokio::task::spawn_blocking(move || warm.artifacts().get()).await? {
                Ok(_) => info!("Model artifacts ready"),
                Err(e) => warn!("Serving without model artifacts: {}", e),
            }

            let addr = config.server.socket_addr()?;

            println!();
            println!("  ReviewScope: product review sentiment analysis");
            println!();
            println!("  Model:      {}", config.artifacts.model_path.display());
            println!("  Tokenizer:  {}", config.artifacts.tokenizer_path.display());
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(AppState::new(analyzer, metrics), addr).await?;
        }

        Commands::Analyze {
            text,
            config,
            json,
            verbose,
            ..
        } => {
            init_logging(verbose);

            let config = AppConfig::load(&config, &overrides)?;
            let review = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let analyzer = config.build_analyzer();
            match analyzer.analyze(&review)? {
                Analysis::Completed(report) if json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Analysis::Completed(report) => {
                    print!("{}", render_report(&report));
                }
                Analysis::Rejected(rejection) => {
                    eprintln!("Warning: {}", rejection);
                    std::process::exit(2);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "reviewscope=debug,reviewscope_web=debug,reviewscope_classifiers=debug,reviewscope_core=debug,tower_http=debug,warn"
    } else {
        "reviewscope=info,reviewscope_web=info,reviewscope_classifiers=info,tower_http=warn,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "reviewscope_analyses_total",
        "Total number of review submissions by outcome"
    );
    metrics::describe_histogram!(
        "reviewscope_inference_latency_us",
        metrics::Unit::Microseconds,
        "Model inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
