//! gRPC implementation for TicketService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{info, warn};

use crate::service::TicketService;
use proto::ticket::{
    ticket_service_server::TicketService as TicketServiceProto, CreateTicketRequest,
    CreateTicketResponse, DeleteTicketRequest, DeleteTicketResponse, GetTicketRequest,
    GetTicketResponse, ListTicketsRequest, ListTicketsResponse, UpdateTicketRequest,
    UpdateTicketResponse,
};

use super::convert::{new_ticket_from_proto, ticket_to_proto, update_from_proto};

/// gRPC service wrapper for TicketService.
pub struct TicketGrpcService {
    service: Arc<dyn TicketService>,
}

impl TicketGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn TicketService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl TicketServiceProto for TicketGrpcService {
    async fn create_ticket(
        &self,
        request: Request<CreateTicketRequest>,
    ) -> Result<Response<CreateTicketResponse>, Status> {
        let req = request.into_inner();
        info!(title = %req.title, "gRPC: CreateTicket");

        let ticket = self
            .service
            .create_ticket(new_ticket_from_proto(req))
            .await
            .map_err(Status::from)?;
        Ok(Response::new(CreateTicketResponse {
            ticket: Some(ticket_to_proto(ticket)),
        }))
    }

    async fn get_ticket(
        &self,
        request: Request<GetTicketRequest>,
    ) -> Result<Response<GetTicketResponse>, Status> {
        let req = request.into_inner();
        info!(ticket_id = %req.id, "gRPC: GetTicket");

        let ticket = self
            .service
            .get_ticket(&req.id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(GetTicketResponse {
            ticket: Some(ticket_to_proto(ticket)),
        }))
    }

    async fn list_tickets(
        &self,
        request: Request<ListTicketsRequest>,
    ) -> Result<Response<ListTicketsResponse>, Status> {
        let req = request.into_inner();
        info!(page_size = req.page_size, "gRPC: ListTickets");

        let tickets = self
            .service
            .list_tickets(i64::from(req.page_size))
            .await
            .map_err(Status::from)?;
        info!(count = tickets.len(), "gRPC: Listed tickets");

        Ok(Response::new(ListTicketsResponse {
            tickets: tickets.into_iter().map(ticket_to_proto).collect(),
            next_page_token: String::new(),
        }))
    }

    async fn update_ticket(
        &self,
        request: Request<UpdateTicketRequest>,
    ) -> Result<Response<UpdateTicketResponse>, Status> {
        let req = request.into_inner();
        info!(ticket_id = %req.id, "gRPC: UpdateTicket");

        let id = req.id.clone();
        let ticket = self
            .service
            .update_ticket(&id, update_from_proto(req))
            .await
            .map_err(Status::from)?;
        Ok(Response::new(UpdateTicketResponse {
            ticket: Some(ticket_to_proto(ticket)),
        }))
    }

    /// Never fails at the transport level: callers check `success`.
    async fn delete_ticket(
        &self,
        request: Request<DeleteTicketRequest>,
    ) -> Result<Response<DeleteTicketResponse>, Status> {
        let req = request.into_inner();
        info!(ticket_id = %req.id, "gRPC: DeleteTicket");

        let success = match self.service.delete_ticket(&req.id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(ticket_id = %req.id, error = %e.detail(), "gRPC: Delete reported as unsuccessful");
                false
            }
        };

        Ok(Response::new(DeleteTicketResponse { success }))
    }
}
