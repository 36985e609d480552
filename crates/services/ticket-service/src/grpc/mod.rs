//! gRPC layer - wire translation for TicketService.

pub mod convert;
mod ticket_grpc;

pub use ticket_grpc::TicketGrpcService;
