//! Repository layer for data access.

pub mod entities;
mod ticket_repository;

pub use ticket_repository::{TicketRepository, TicketStore};

#[cfg(any(test, feature = "test-utils"))]
pub use ticket_repository::MockTicketRepository;
