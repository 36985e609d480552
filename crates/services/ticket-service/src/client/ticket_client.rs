//! gRPC client wrapper for ticket-service.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{NewTicket, Ticket, TicketUpdate};
use proto::ticket::{
    ticket_service_client::TicketServiceClient as ProtoTicketServiceClient, CreateTicketRequest,
    DeleteTicketRequest, GetTicketRequest, ListTicketsRequest, Ticket as ProtoTicket,
    UpdateTicketRequest,
};

use crate::grpc::convert::{
    non_empty, priority_from_proto, priority_to_proto, status_from_proto, status_to_proto,
    timestamp_from_proto,
};

/// gRPC client wrapper for ticket-service.
#[derive(Clone)]
pub struct TicketClient {
    client: ProtoTicketServiceClient<Channel>,
}

impl TicketClient {
    /// Connect to ticket-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to ticket-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect()
            .await?;
        Ok(Self {
            client: ProtoTicketServiceClient::new(channel),
        })
    }

    /// Create a ticket.
    pub async fn create_ticket(&self, input: NewTicket) -> AppResult<Ticket> {
        let request = tonic::Request::new(CreateTicketRequest {
            title: input.title,
            description: input.description.unwrap_or_default(),
            priority: priority_to_proto(input.priority) as i32,
            assignee_id: input.assignee_id.unwrap_or_default(),
            tags: input.tags,
            reporter_id: input.reporter_id,
        });

        let mut client = self.client.clone();
        let response = client.create_ticket(request).await.map_err(AppError::from)?;
        proto_to_ticket(response.into_inner().ticket)
    }

    /// Get ticket by ID.
    pub async fn get_ticket(&self, id: &str) -> AppResult<Ticket> {
        let request = tonic::Request::new(GetTicketRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client
            .get_ticket(request)
            .await
            .map_err(|s| AppError::from_status("get", id, s))?;
        proto_to_ticket(response.into_inner().ticket)
    }

    /// List the first page of tickets.
    pub async fn list_tickets(&self, page_size: i32) -> AppResult<Vec<Ticket>> {
        let request = tonic::Request::new(ListTicketsRequest {
            page_size,
            page_token: String::new(),
        });

        let mut client = self.client.clone();
        let response = client.list_tickets(request).await.map_err(AppError::from)?;

        response
            .into_inner()
            .tickets
            .into_iter()
            .map(|t| proto_to_ticket(Some(t)))
            .collect()
    }

    /// Update ticket. `None` fields are sent as "unchanged".
    pub async fn update_ticket(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket> {
        let request = tonic::Request::new(UpdateTicketRequest {
            id: id.to_string(),
            title: changes.title.unwrap_or_default(),
            description: changes.description.unwrap_or_default(),
            status: changes.status.map_or(0, |s| status_to_proto(s) as i32),
            priority: changes.priority.map_or(0, |p| priority_to_proto(p) as i32),
            assignee_id: changes.assignee_id.unwrap_or_default(),
            tags: changes.tags.unwrap_or_default(),
        });

        let mut client = self.client.clone();
        let response = client
            .update_ticket(request)
            .await
            .map_err(|s| AppError::from_status("update", id, s))?;
        proto_to_ticket(response.into_inner().ticket)
    }

    /// Delete ticket. Returns whether the server removed it.
    pub async fn delete_ticket(&self, id: &str) -> AppResult<bool> {
        let request = tonic::Request::new(DeleteTicketRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete_ticket(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().success)
    }
}

/// Convert wire Ticket to domain Ticket.
fn proto_to_ticket(proto: Option<ProtoTicket>) -> AppResult<Ticket> {
    let proto = proto.ok_or_else(|| AppError::internal("Missing ticket in response"))?;

    let created_at = timestamp_from_proto(proto.created_at)
        .ok_or_else(|| AppError::internal("Invalid created_at from ticket-service"))?;
    let updated_at = timestamp_from_proto(proto.updated_at)
        .ok_or_else(|| AppError::internal("Invalid updated_at from ticket-service"))?;

    Ok(Ticket {
        id: proto.id,
        title: proto.title,
        description: non_empty(proto.description),
        status: status_from_proto(proto.status),
        priority: priority_from_proto(proto.priority),
        assignee_id: non_empty(proto.assignee_id),
        reporter_id: proto.reporter_id,
        tags: proto.tags,
        created_at,
        updated_at,
    })
}
