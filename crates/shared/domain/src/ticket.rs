//! Ticket domain entity and related types.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::constants::{
    PRIORITY_CRITICAL, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, STATUS_CLOSED,
    STATUS_IN_PROGRESS, STATUS_OPEN, STATUS_RESOLVED,
};

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => STATUS_OPEN,
            TicketStatus::InProgress => STATUS_IN_PROGRESS,
            TicketStatus::Resolved => STATUS_RESOLVED,
            TicketStatus::Closed => STATUS_CLOSED,
        }
    }
}

/// Unknown values decode to `Open`.
impl From<&str> for TicketStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_OPEN => TicketStatus::Open,
            STATUS_IN_PROGRESS => TicketStatus::InProgress,
            STATUS_RESOLVED => TicketStatus::Resolved,
            STATUS_CLOSED => TicketStatus::Closed,
            _ => TicketStatus::default(),
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        TicketStatus::from(s.as_str())
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => PRIORITY_LOW,
            TicketPriority::Medium => PRIORITY_MEDIUM,
            TicketPriority::High => PRIORITY_HIGH,
            TicketPriority::Critical => PRIORITY_CRITICAL,
        }
    }
}

/// Unknown values decode to `Medium`.
impl From<&str> for TicketPriority {
    fn from(s: &str) -> Self {
        match s {
            PRIORITY_LOW => TicketPriority::Low,
            PRIORITY_MEDIUM => TicketPriority::Medium,
            PRIORITY_HIGH => TicketPriority::High,
            PRIORITY_CRITICAL => TicketPriority::Critical,
            _ => TicketPriority::default(),
        }
    }
}

impl From<String> for TicketPriority {
    fn from(s: String) -> Self {
        TicketPriority::from(s.as_str())
    }
}

impl From<TicketPriority> for String {
    fn from(priority: TicketPriority) -> Self {
        priority.as_str().to_string()
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee_id: Option<String>,
    pub reporter_id: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a freshly opened ticket from creation input.
    ///
    /// Both timestamps are set to `now` and the status is always `Open`.
    pub fn open(id: String, input: NewTicket, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: TicketStatus::Open,
            priority: input.priority,
            assignee_id: input.assignee_id,
            reporter_id: input.reporter_id,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ticket creation data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct NewTicket {
    /// Short summary (required)
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub priority: TicketPriority,
    pub assignee_id: Option<String>,
    pub reporter_id: String,
    pub tags: Vec<String>,
}

/// Partial update of a ticket.
///
/// Each slot left as `None` keeps the stored value. `reporter_id` and the
/// timestamps are deliberately absent: they cannot be changed through an
/// update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TicketUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.tags.is_none()
    }
}
