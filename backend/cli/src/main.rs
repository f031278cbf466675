mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sightgate_gateway::{start_server, AppState, ModelConfig};
use sightgate_vision::GroqProvider;

use config::Config;

#[derive(Parser)]
#[command(name = "sightgate")]
#[command(about = "SightGate — vision inference HTTP backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the SightGate HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            logging::init_logger(&config.log_dir, &config.log_level);
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("SightGate is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        image_model = %config.image_model,
        video_model = %config.video_model,
        "Starting SightGate"
    );

    let api_key = config
        .groq_api_key
        .clone()
        .context("GROQ_API_KEY is not set")?;
    let mut provider = GroqProvider::new(api_key);
    if let Some(url) = &config.groq_base_url {
        provider = provider.with_base_url(url);
    }

    let state = Arc::new(AppState {
        provider: Arc::new(provider),
        http: reqwest::Client::new(),
        models: ModelConfig {
            image_model: config.image_model.clone(),
            video_model: config.video_model.clone(),
        },
    });

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;
    start_server(addr, state).await
}
