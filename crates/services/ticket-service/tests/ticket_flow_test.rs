//! End-to-end ticket flows through the gRPC layer and service.
//!
//! Storage is replaced by an in-memory repository with the same contract as
//! `TicketStore`, so these run without PostgreSQL.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tonic::{Code, Request};

use common::{AppError, AppResult};
use domain::{Ticket, TicketUpdate};
use proto::ticket::{
    ticket_service_server::TicketService as _, CreateTicketRequest, DeleteTicketRequest,
    GetTicketRequest, ListTicketsRequest, Ticket as ProtoTicket,
    TicketPriority as ProtoPriority, TicketStatus as ProtoStatus, UpdateTicketRequest,
};
use ticket_service_lib::grpc::TicketGrpcService;
use ticket_service_lib::repository::TicketRepository;
use ticket_service_lib::service::TicketManager;

/// In-memory stand-in for the tickets table.
#[derive(Default)]
struct InMemoryTicketRepository {
    rows: Mutex<Vec<Ticket>>,
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn create(&self, ticket: Ticket) -> AppResult<Ticket> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|t| t.id == ticket.id) {
            return Err(AppError::internal("duplicate id"));
        }
        rows.push(ticket.clone());
        Ok(ticket)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Ticket> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("get", id))
    }

    async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<Ticket>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut rows = self.rows.lock().unwrap();
        let ticket = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("update", id))?;

        if let Some(title) = changes.title {
            ticket.title = title;
        }
        if let Some(description) = changes.description {
            ticket.description = Some(description);
        }
        if let Some(status) = changes.status {
            ticket.status = status;
        }
        if let Some(priority) = changes.priority {
            ticket.priority = priority;
        }
        if let Some(assignee_id) = changes.assignee_id {
            ticket.assignee_id = Some(assignee_id);
        }
        if let Some(tags) = changes.tags {
            ticket.tags = tags;
        }
        ticket.updated_at = Utc::now();

        Ok(ticket.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(AppError::not_found("delete", id));
        }
        Ok(())
    }
}

fn grpc_service() -> TicketGrpcService {
    let repo = Arc::new(InMemoryTicketRepository::default());
    TicketGrpcService::new(Arc::new(TicketManager::new(repo)))
}

fn create_request(title: &str, tags: &[&str]) -> CreateTicketRequest {
    CreateTicketRequest {
        title: title.to_string(),
        description: "Users can't login with Google OAuth".to_string(),
        priority: ProtoPriority::High as i32,
        assignee_id: "user-123".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        reporter_id: "reporter-1".to_string(),
    }
}

async fn create(grpc: &TicketGrpcService, request: CreateTicketRequest) -> ProtoTicket {
    grpc.create_ticket(Request::new(request))
        .await
        .unwrap()
        .into_inner()
        .ticket
        .unwrap()
}

async fn get(grpc: &TicketGrpcService, id: &str) -> Result<ProtoTicket, tonic::Status> {
    grpc.get_ticket(Request::new(GetTicketRequest { id: id.to_string() }))
        .await
        .map(|r| r.into_inner().ticket.unwrap())
}

async fn list(grpc: &TicketGrpcService, page_size: i32) -> Vec<ProtoTicket> {
    grpc.list_tickets(Request::new(ListTicketsRequest {
        page_size,
        page_token: String::new(),
    }))
    .await
    .unwrap()
    .into_inner()
    .tickets
}

#[tokio::test]
async fn test_fix_login_bug_scenario() {
    let grpc = grpc_service();

    let created = create(&grpc, create_request("Fix login bug", &["bug", "auth"])).await;
    assert_eq!(created.status, ProtoStatus::Open as i32);
    assert_eq!(created.priority, ProtoPriority::High as i32);
    assert_eq!(created.tags, vec!["bug", "auth"]);

    let updated = grpc
        .update_ticket(Request::new(UpdateTicketRequest {
            id: created.id.clone(),
            status: ProtoStatus::InProgress as i32,
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner()
        .ticket
        .unwrap();
    assert_eq!(updated.status, ProtoStatus::InProgress as i32);
    assert_eq!(updated.priority, ProtoPriority::High as i32);

    let deleted = grpc
        .delete_ticket(Request::new(DeleteTicketRequest {
            id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(deleted.success);

    let status = get(&grpc, &created.id).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_tags_round_trip_in_order() {
    let grpc = grpc_service();

    for tags in [vec![], vec!["one"], vec!["z", "a", "m", "a"]] {
        let created = create(&grpc, create_request("Tagged", &tags)).await;
        let fetched = get(&grpc, &created.id).await.unwrap();
        assert_eq!(fetched.tags, tags);
    }
}

#[tokio::test]
async fn test_create_defaults() {
    let grpc = grpc_service();

    let created = create(
        &grpc,
        CreateTicketRequest {
            title: "Add dark mode".to_string(),
            priority: ProtoPriority::Unspecified as i32,
            ..Default::default()
        },
    )
    .await;

    assert_eq!(created.priority, ProtoPriority::Medium as i32);
    assert_eq!(created.status, ProtoStatus::Open as i32);
    assert_eq!(created.description, "");
    assert_eq!(created.assignee_id, "");
    assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn test_create_with_empty_title_is_invalid_argument() {
    let grpc = grpc_service();

    let status = grpc
        .create_ticket(Request::new(create_request("", &[])))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_partial_update_changes_only_title() {
    let grpc = grpc_service();
    let before = create(&grpc, create_request("Old title", &["bug"])).await;
    tokio::time::sleep(Duration::from_millis(2)).await;

    let after = grpc
        .update_ticket(Request::new(UpdateTicketRequest {
            id: before.id.clone(),
            title: "new".to_string(),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner()
        .ticket
        .unwrap();

    assert_eq!(after.title, "new");
    assert_eq!(after.description, before.description);
    assert_eq!(after.status, before.status);
    assert_eq!(after.priority, before.priority);
    assert_eq!(after.assignee_id, before.assignee_id);
    assert_eq!(after.reporter_id, before.reporter_id);
    assert_eq!(after.tags, before.tags);
    assert_eq!(after.created_at, before.created_at);
    assert_ne!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn test_empty_update_keeps_updated_at() {
    let grpc = grpc_service();
    let before = create(&grpc, create_request("Untouched", &[])).await;
    tokio::time::sleep(Duration::from_millis(2)).await;

    let after = grpc
        .update_ticket(Request::new(UpdateTicketRequest {
            id: before.id.clone(),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner()
        .ticket
        .unwrap();

    assert_eq!(after, before);
}

#[tokio::test]
async fn test_empty_string_does_not_clear_field() {
    let grpc = grpc_service();
    let before = create(&grpc, create_request("Keeps assignee", &[])).await;

    let after = grpc
        .update_ticket(Request::new(UpdateTicketRequest {
            id: before.id.clone(),
            assignee_id: String::new(),
            priority: ProtoPriority::Low as i32,
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner()
        .ticket
        .unwrap();

    assert_eq!(after.assignee_id, "user-123");
    assert_eq!(after.priority, ProtoPriority::Low as i32);
}

#[tokio::test]
async fn test_missing_ids() {
    let grpc = grpc_service();

    let status = get(&grpc, "missing").await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = grpc
        .update_ticket(Request::new(UpdateTicketRequest {
            id: "missing".to_string(),
            title: "anything".to_string(),
            ..Default::default()
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let response = grpc
        .delete_ticket(Request::new(DeleteTicketRequest {
            id: "missing".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(!response.success);
}

#[tokio::test]
async fn test_list_pagination_bounds() {
    let grpc = grpc_service();

    let mut ids = Vec::new();
    for i in 0..5 {
        let created = create(&grpc, create_request(&format!("Ticket {}", i), &[])).await;
        ids.push(created.id);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let page = list(&grpc, 10).await;
    let listed: Vec<&str> = page.iter().map(|t| t.id.as_str()).collect();
    let newest_first: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, newest_first);

    assert_eq!(list(&grpc, 2).await.len(), 2);
    assert_eq!(list(&grpc, 0).await.len(), 5);
}

#[tokio::test]
async fn test_list_caps_large_and_zero_page_sizes() {
    let grpc = grpc_service();
    for i in 0..120 {
        create(&grpc, create_request(&format!("Bulk {}", i), &[])).await;
    }

    assert_eq!(list(&grpc, 1000).await.len(), 50);
    assert_eq!(list(&grpc, 0).await.len(), 50);
    assert_eq!(list(&grpc, -1).await.len(), 50);
    assert_eq!(list(&grpc, 100).await.len(), 100);
}

#[tokio::test]
async fn test_list_empty() {
    let grpc = grpc_service();
    assert!(list(&grpc, 10).await.is_empty());
}
