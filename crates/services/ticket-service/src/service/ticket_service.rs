//! Ticket service - defaulting and bookkeeping around the repository.
//!
//! Assigns ids and timestamps, validates creation input and bounds list
//! requests. Storage details stay in the repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{clamp_page_size, DomainError, NewTicket, Ticket, TicketUpdate};

use crate::repository::TicketRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ticket service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Open a new ticket with a fresh id and status `OPEN`
    async fn create_ticket(&self, input: NewTicket) -> AppResult<Ticket>;

    /// Get ticket by ID
    async fn get_ticket(&self, id: &str) -> AppResult<Ticket>;

    /// First page of tickets, newest first.
    ///
    /// `page_size` is clamped to `1..=100`; anything outside means 50.
    async fn list_tickets(&self, page_size: i64) -> AppResult<Vec<Ticket>>;

    /// Apply a partial update
    async fn update_ticket(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket>;

    /// Permanently delete ticket
    async fn delete_ticket(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of TicketService using repository.
pub struct TicketManager {
    repo: Arc<dyn TicketRepository>,
}

impl TicketManager {
    /// Create new ticket service instance with repository
    pub fn new(repo: Arc<dyn TicketRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TicketService for TicketManager {
    async fn create_ticket(&self, input: NewTicket) -> AppResult<Ticket> {
        input
            .validate()
            .map_err(|e| AppError::from(DomainError::from(e)))?;

        let ticket = Ticket::open(Uuid::new_v4().to_string(), input, Utc::now());
        debug!(ticket_id = %ticket.id, priority = %ticket.priority, "Creating ticket");

        let created = self.repo.create(ticket).await?;
        info!(ticket_id = %created.id, "Ticket created");
        Ok(created)
    }

    async fn get_ticket(&self, id: &str) -> AppResult<Ticket> {
        self.repo.get_by_id(id).await
    }

    async fn list_tickets(&self, page_size: i64) -> AppResult<Vec<Ticket>> {
        let limit = clamp_page_size(page_size);
        // Page tokens are not supported; every call starts at the top
        self.repo.list(limit, 0).await
    }

    async fn update_ticket(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket> {
        let updated = self.repo.update(id, changes).await?;
        info!(ticket_id = %id, status = %updated.status, "Ticket updated");
        Ok(updated)
    }

    async fn delete_ticket(&self, id: &str) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(ticket_id = %id, "Ticket deleted");
        Ok(())
    }
}
