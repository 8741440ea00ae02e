use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use catalog::JsonFileStore;
use engine::{EngineError, RecommendationEngine, RecommendationRequest, Response};

/// CineRecs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Content-based movie recommendations over a catalog snapshot", long_about = None)]
struct Cli {
    /// The request as one serialized-JSON object, e.g.
    /// '{"search_keywords": "space pirates", "num_recommendations": 5}'
    request: String,

    /// Path to the catalog export (overrides CATALOG_PATH)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Render a human-readable listing instead of JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries exactly one response document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // A request that fails to parse is the only non-zero exit
    let request: RecommendationRequest = match serde_json::from_str(&cli.request) {
        Ok(request) => request,
        Err(err) => {
            emit(&Response::error(format!("invalid JSON request: {}", err)));
            return ExitCode::FAILURE;
        }
    };

    let store = match cli.catalog {
        Some(path) => Ok(JsonFileStore::new(path)),
        None => JsonFileStore::from_env(),
    };
    let response = match store {
        Ok(store) => RecommendationEngine::new(store).respond(&request),
        Err(err) => Response::error(EngineError::from(err)),
    };

    if cli.pretty {
        print_pretty(&response);
    } else {
        emit(&response);
    }
    ExitCode::SUCCESS
}

/// Print the response as a single JSON document on stdout
fn emit(response: &Response) {
    let body = serde_json::to_string(response)
        .unwrap_or_else(|err| format!(r#"{{"error": "failed to serialize response: {}"}}"#, err));
    println!("{}", body);
}

/// Helper to format recommendations for interactive use
fn print_pretty(response: &Response) {
    match response {
        Response::Recommendations { recommendations } => {
            println!("{}", "Recommendations:".bold().blue());
            for (rank, item) in recommendations.iter().enumerate() {
                let year = item
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "????".to_string());
                println!(
                    "{}. {} ({}) [{}] - similarity {:.4}",
                    (rank + 1).to_string().green(),
                    item.title,
                    year,
                    item.genres.join(", "),
                    item.similarity
                );
            }
        }
        Response::Message { message } => println!("{}", message.as_str().yellow()),
        Response::Error { error } => println!("{}", format!("Error: {}", error).red()),
    }
}
