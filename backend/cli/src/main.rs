mod config;
mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use snapsight_clarifai::ClarifaiClient;
use snapsight_gateway::GatewayState;

use config::Config;

#[derive(Parser)]
#[command(name = "snapsight")]
#[command(about = "Snapsight — Clarifai-backed image analysis API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query the health endpoint of a running instance
    Status {
        /// Port the instance listens on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate a random API bearer token
    GenerateToken {
        /// Token length in characters
        #[arg(short, long, default_value_t = 48)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await?;
        }
        Commands::Status { port } => {
            let port = port.or_else(config::port_from_env).unwrap_or(8080);
            print_status(port).await?;
        }
        Commands::GenerateToken { length } => {
            println!("{}", token::generate_token(length));
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    if config.bearer_token.is_none() {
        warn!("API_BEARER_TOKEN is not set; analysis endpoints accept unauthenticated requests");
    }

    info!(model = %config.clarifai.model_id, "Starting snapsight");

    let state = GatewayState {
        provider: Arc::new(ClarifaiClient::new(config.clarifai)),
        bearer_token: config.bearer_token,
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;

    snapsight_gateway::start_server(addr, state).await
}

async fn print_status(port: u16) -> Result<()> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://localhost:{port}/health"))
        .send()
        .await
        .context("could not reach a running snapsight instance")?;

    let body: serde_json::Value = resp.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
