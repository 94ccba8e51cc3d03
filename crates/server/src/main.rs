use anyhow::Context;
use ikigai_server::{JournalConfig, JournalServer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Ikigai Journal - trading journal with identity-provider sessions

USAGE:
    ikigai-journal [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                  Server host (default: 0.0.0.0)
    PORT                  Server port (default: 3000)
    APP_ENV               development | production (production sets Secure cookies)
    IDENTITY_API_KEY      API key of the hosted identity provider
    SESSION_COOKIE_NAME   Session cookie name (default: __session)
    LOG_FORMAT            json for structured logs
    RUST_LOG              Log level filter

EXAMPLES:
    # Run against the hosted provider
    IDENTITY_API_KEY=... ikigai-journal

    # Run with a static token table for local development
    ikigai-journal --config config/dev.json

    # Run with custom port
    PORT=9000 ikigai-journal --config config/dev.json
"#
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ikigai_server=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            JournalConfig::from_file(&path)?
        }
        None => {
            tracing::info!("Using default configuration");
            JournalConfig::default()
        }
    };
    config
        .apply_env()
        .context("Invalid environment override")?;

    let server = JournalServer::from_config(config).context("Failed to start journal server")?;

    tracing::info!("Starting {}", server.config.name);
    tracing::info!("Available endpoints:");
    tracing::info!("  POST   /api/auth/session");
    tracing::info!("  GET    /api/auth/session");
    tracing::info!("  DELETE /api/auth/session");
    tracing::info!("  GET    /dashboard /trades /portfolio /analytics");

    server.run().await?;
    Ok(())
}
