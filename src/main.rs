//! searchrelay HTTP server
//!
//! Starts an Axum web server hosting the Bing, Google and chat handlers.

use clap::Parser;
use searchrelay::{
    cli::{Cli, Command, generate_config_template},
    config::Config,
    handlers::AppState,
    telemetry,
};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    match cli.command {
        Some(Command::Config { output }) => {
            let template = generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template)?;
                    println!("Wrote configuration template to {}", path);
                }
                None => print!("{}", template),
            }
            Ok(())
        }
        Some(Command::Check) => {
            let config = Config::load(&cli.config)?;
            println!("Configuration is valid");
            let missing = config.missing_credentials();
            if missing.is_empty() {
                println!("All credentials are configured");
            } else {
                println!("Missing credentials: {}", missing.join(", "));
            }
            Ok(())
        }
        None => serve(&cli.config).await,
    }
}

async fn serve(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;

    telemetry::init(&config.observability);

    for name in config.missing_credentials() {
        tracing::warn!(
            credential = name,
            "Credential not configured; handlers that need it will answer 500"
        );
    }

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.server.port,
    ));

    let state = AppState::new(Arc::new(config))?;
    let app = searchrelay::app(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
