//! Domain layer - Ticket entity and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The gRPC and storage layers translate to and from these types.

pub mod constants;
pub mod error;
pub mod ticket;

pub use constants::*;
pub use error::DomainError;
pub use ticket::{NewTicket, Ticket, TicketPriority, TicketStatus, TicketUpdate};
