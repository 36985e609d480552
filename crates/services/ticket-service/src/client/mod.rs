//! gRPC client for a running ticket service.

mod ticket_client;

pub use ticket_client::TicketClient;
