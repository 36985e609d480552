//! Service layer - ticket use cases over the repository.

mod ticket_service;

pub use ticket_service::{TicketManager, TicketService};

#[cfg(any(test, feature = "test-utils"))]
pub use ticket_service::MockTicketService;
