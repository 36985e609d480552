//! Conversions between wire (protobuf) and domain representations.
//!
//! Enum mappings are total: `UNSPECIFIED` and unknown numeric values map to
//! the domain default. Proto3 strings cannot express absence, so an empty
//! string is read as "no value" and `None` is written as an empty string.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use domain::{Ticket, TicketPriority, TicketStatus, TicketUpdate};
use proto::ticket::{
    CreateTicketRequest, Ticket as ProtoTicket, TicketPriority as ProtoPriority,
    TicketStatus as ProtoStatus, UpdateTicketRequest,
};

/// Wire status to domain; unknown and unspecified become `Open`.
pub fn status_from_proto(value: i32) -> TicketStatus {
    match ProtoStatus::try_from(value) {
        Ok(ProtoStatus::Open) => TicketStatus::Open,
        Ok(ProtoStatus::InProgress) => TicketStatus::InProgress,
        Ok(ProtoStatus::Resolved) => TicketStatus::Resolved,
        Ok(ProtoStatus::Closed) => TicketStatus::Closed,
        Ok(ProtoStatus::Unspecified) | Err(_) => TicketStatus::Open,
    }
}

pub fn status_to_proto(status: TicketStatus) -> ProtoStatus {
    match status {
        TicketStatus::Open => ProtoStatus::Open,
        TicketStatus::InProgress => ProtoStatus::InProgress,
        TicketStatus::Resolved => ProtoStatus::Resolved,
        TicketStatus::Closed => ProtoStatus::Closed,
    }
}

/// Wire priority to domain; unknown and unspecified become `Medium`.
pub fn priority_from_proto(value: i32) -> TicketPriority {
    match ProtoPriority::try_from(value) {
        Ok(ProtoPriority::Low) => TicketPriority::Low,
        Ok(ProtoPriority::Medium) => TicketPriority::Medium,
        Ok(ProtoPriority::High) => TicketPriority::High,
        Ok(ProtoPriority::Critical) => TicketPriority::Critical,
        Ok(ProtoPriority::Unspecified) | Err(_) => TicketPriority::Medium,
    }
}

pub fn priority_to_proto(priority: TicketPriority) -> ProtoPriority {
    match priority {
        TicketPriority::Low => ProtoPriority::Low,
        TicketPriority::Medium => ProtoPriority::Medium,
        TicketPriority::High => ProtoPriority::High,
        TicketPriority::Critical => ProtoPriority::Critical,
    }
}

/// Empty string means absent.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn timestamp_to_proto(at: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

pub fn timestamp_from_proto(at: Option<Timestamp>) -> Option<DateTime<Utc>> {
    let at = at?;
    DateTime::from_timestamp(at.seconds, u32::try_from(at.nanos).ok()?)
}

/// Convert domain Ticket to its wire form.
pub fn ticket_to_proto(ticket: Ticket) -> ProtoTicket {
    ProtoTicket {
        id: ticket.id,
        title: ticket.title,
        description: ticket.description.unwrap_or_default(),
        status: status_to_proto(ticket.status) as i32,
        priority: priority_to_proto(ticket.priority) as i32,
        assignee_id: ticket.assignee_id.unwrap_or_default(),
        reporter_id: ticket.reporter_id,
        tags: ticket.tags,
        created_at: Some(timestamp_to_proto(ticket.created_at)),
        updated_at: Some(timestamp_to_proto(ticket.updated_at)),
    }
}

/// Creation input from the wire. Status is not part of the request.
pub fn new_ticket_from_proto(req: CreateTicketRequest) -> domain::NewTicket {
    domain::NewTicket {
        title: req.title,
        description: non_empty(req.description),
        priority: priority_from_proto(req.priority),
        assignee_id: non_empty(req.assignee_id),
        reporter_id: req.reporter_id,
        tags: req.tags,
    }
}

/// Partial update from the wire.
///
/// A field is present when its string is non-empty, its enum is not
/// `UNSPECIFIED`, or its tag list is non-empty. There is no way to clear a
/// field through this message.
pub fn update_from_proto(req: UpdateTicketRequest) -> TicketUpdate {
    let unspecified_status = ProtoStatus::Unspecified as i32;
    let unspecified_priority = ProtoPriority::Unspecified as i32;

    TicketUpdate {
        title: non_empty(req.title),
        description: non_empty(req.description),
        status: (req.status != unspecified_status).then(|| status_from_proto(req.status)),
        priority: (req.priority != unspecified_priority)
            .then(|| priority_from_proto(req.priority)),
        assignee_id: non_empty(req.assignee_id),
        tags: (!req.tags.is_empty()).then_some(req.tags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults() {
        assert_eq!(priority_from_proto(0), TicketPriority::Medium);
        assert_eq!(priority_from_proto(99), TicketPriority::Medium);
        assert_eq!(
            priority_from_proto(ProtoPriority::Critical as i32),
            TicketPriority::Critical
        );
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(status_from_proto(0), TicketStatus::Open);
        assert_eq!(status_from_proto(-3), TicketStatus::Open);
        assert_eq!(
            status_from_proto(ProtoStatus::Resolved as i32),
            TicketStatus::Resolved
        );
    }

    #[test]
    fn test_enum_round_trip_through_wire() {
        for status in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ] {
            assert_eq!(status_from_proto(status_to_proto(status) as i32), status);
        }
        for priority in [
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
            TicketPriority::Critical,
        ] {
            assert_eq!(
                priority_from_proto(priority_to_proto(priority) as i32),
                priority
            );
        }
    }

    #[test]
    fn test_create_request_empty_strings_are_absent() {
        let input = new_ticket_from_proto(CreateTicketRequest {
            title: "Add dark mode".to_string(),
            description: String::new(),
            priority: 0,
            assignee_id: String::new(),
            tags: vec![],
            reporter_id: "r-1".to_string(),
        });

        assert_eq!(input.description, None);
        assert_eq!(input.assignee_id, None);
        assert_eq!(input.priority, TicketPriority::Medium);
    }

    #[test]
    fn test_update_request_presence_rules() {
        let changes = update_from_proto(UpdateTicketRequest {
            id: "t-1".to_string(),
            title: String::new(),
            description: "more detail".to_string(),
            status: ProtoStatus::InProgress as i32,
            priority: ProtoPriority::Unspecified as i32,
            assignee_id: String::new(),
            tags: vec![],
        });

        assert_eq!(changes.title, None);
        assert_eq!(changes.description.as_deref(), Some("more detail"));
        assert_eq!(changes.status, Some(TicketStatus::InProgress));
        assert_eq!(changes.priority, None);
        assert_eq!(changes.assignee_id, None);
        assert_eq!(changes.tags, None);
    }

    #[test]
    fn test_update_request_unknown_enum_is_present_as_default() {
        let changes = update_from_proto(UpdateTicketRequest {
            status: 42,
            priority: 42,
            ..Default::default()
        });

        assert_eq!(changes.status, Some(TicketStatus::Open));
        assert_eq!(changes.priority, Some(TicketPriority::Medium));
    }

    #[test]
    fn test_empty_update_request_is_empty() {
        let changes = update_from_proto(UpdateTicketRequest {
            id: "t-1".to_string(),
            ..Default::default()
        });
        assert!(changes.is_empty());
    }

    #[test]
    fn test_ticket_to_proto_absent_fields_are_empty() {
        let now = Utc::now();
        let ticket = Ticket {
            id: "t-1".to_string(),
            title: "Fix login bug".to_string(),
            description: None,
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            assignee_id: None,
            reporter_id: "r-1".to_string(),
            tags: vec!["bug".to_string(), "auth".to_string()],
            created_at: now,
            updated_at: now,
        };

        let wire = ticket_to_proto(ticket);

        assert_eq!(wire.description, "");
        assert_eq!(wire.assignee_id, "");
        assert_eq!(wire.status, ProtoStatus::Open as i32);
        assert_eq!(wire.priority, ProtoPriority::High as i32);
        assert_eq!(wire.tags, vec!["bug", "auth"]);
        assert_eq!(timestamp_from_proto(wire.created_at), Some(now));
    }
}
