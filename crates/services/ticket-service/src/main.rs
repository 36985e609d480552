//! Ticket Service - gRPC server for ticket management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_service_lib::config::{client_config_from_env, TicketServiceConfig};
use ticket_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "ticket-service")]
#[command(about = "Ticket management microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        /// Overrides GRPC_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GRPC_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Run the example client flow against a running server
    Demo {
        /// Overrides TICKET_SERVICE_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = TicketServiceConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            ticket_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            ticket_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::Demo { endpoint } => {
            let mut config = client_config_from_env();
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            ticket_service_lib::run_demo(config).await?;
        }
    }

    Ok(())
}
