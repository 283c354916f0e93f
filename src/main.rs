//! Greeting and health microservice entry point.

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use microservice::api::AppState;
use microservice::config::Config;
use microservice::metrics;
use microservice::server::serve;

/// Greeting and health JSON microservice.
#[derive(Parser, Debug)]
#[command(name = "microservice")]
#[command(about = "Serves /api/hello, /api/hello/{name} and /api/health")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    server: ServerArgs,
}

/// Overrides for the bind address.
#[derive(ClapArgs, Debug)]
struct ServerArgs {
    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve(ServerArgs),

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so the filter and format apply
    let config = Config::load()?;

    init_tracing(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve(server)) => cmd_serve(config, server).await,
        None => cmd_serve(config, args.server).await,
    }
}

/// Initialize the tracing subscriber.
fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("microservice=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json_logging() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MICROSERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}", config.bind_addr()?);
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format_lower());
    let metrics_status = if config.metrics_enabled {
        "Enabled"
    } else {
        "Disabled"
    };
    println!("  Metrics: {}", metrics_status);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until shutdown.
async fn cmd_serve(mut config: Config, overrides: ServerArgs) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let state = if config.metrics_enabled {
        let handle = metrics::install_recorder()?;
        metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
        info!("Metrics endpoint: /metrics");
        AppState::with_metrics(handle)
    } else {
        info!("Metrics endpoint: disabled");
        AppState::new()
    };

    info!("Starting microservice on {}:{}", config.host, config.port);

    serve(&config, state).await?;

    Ok(())
}
