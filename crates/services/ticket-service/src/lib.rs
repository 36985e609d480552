//! Ticket Service Library
//!
//! This crate provides ticket management over gRPC, backed by PostgreSQL.
//! The binary wires these pieces together; tests use them directly.

pub mod client;
pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use common::GrpcClientConfig;
use domain::{NewTicket, TicketPriority, TicketStatus, TicketUpdate};

use crate::client::TicketClient;
use crate::config::TicketServiceConfig;
use crate::grpc::TicketGrpcService;
use crate::infra::Database;
use crate::repository::TicketStore;
use crate::service::TicketManager;

/// Run the gRPC server until SIGINT/SIGTERM, then drain and close the pool.
pub async fn run_server(config: TicketServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create repository and service
    let ticket_repo = Arc::new(TicketStore::new(db.get_connection()));
    let ticket_service = Arc::new(TicketManager::new(ticket_repo));

    // Create gRPC service
    let grpc_service = TicketGrpcService::new(ticket_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Ticket service listening on {}", addr);

    // Client deadlines (grpc-timeout) are honored by tonic; this caps the rest
    Server::builder()
        .timeout(config.request_timeout())
        .add_service(proto::TicketServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Ticket service stopped accepting requests");
    db.close().await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = TicketServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    db.close().await?;
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Walk through create, get, update, list and delete against a running server.
pub async fn run_demo(config: GrpcClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = TicketClient::connect(&config).await?;
    info!("Connected to ticket service at {}", config.endpoint);

    let created = client
        .create_ticket(NewTicket {
            title: "Fix authentication bug".to_string(),
            description: Some("Users can't login with Google OAuth".to_string()),
            priority: TicketPriority::High,
            assignee_id: Some("user-123".to_string()),
            reporter_id: "demo".to_string(),
            tags: vec![
                "bug".to_string(),
                "authentication".to_string(),
                "urgent".to_string(),
            ],
        })
        .await?;
    println!("Created ticket: {} - {}", created.id, created.title);

    let fetched = client.get_ticket(&created.id).await?;
    println!(
        "Fetched ticket: {} [{} / {}] tags={:?}",
        fetched.title, fetched.status, fetched.priority, fetched.tags
    );

    let updated = client
        .update_ticket(
            &created.id,
            TicketUpdate {
                title: Some("Fix authentication bug - URGENT".to_string()),
                status: Some(TicketStatus::InProgress),
                ..Default::default()
            },
        )
        .await?;
    println!("Updated ticket: {} - status {}", updated.id, updated.status);

    let tickets = client.list_tickets(10).await?;
    println!("Found {} tickets:", tickets.len());
    for (i, ticket) in tickets.iter().enumerate() {
        println!("  {}. {} - {} [{}]", i + 1, ticket.id, ticket.title, ticket.status);
    }

    let deleted = client.delete_ticket(&created.id).await?;
    println!("Deleted ticket {}: success={}", created.id, deleted);

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
