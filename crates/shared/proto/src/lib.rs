//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC definitions for
//! TicketService: ticket CRUD with offset pagination.

/// Ticket service definitions.
pub mod ticket {
    tonic::include_proto!("ticket");
}

// Re-export commonly used items
pub use ticket::ticket_service_client::TicketServiceClient;
pub use ticket::ticket_service_server::{TicketService, TicketServiceServer};
