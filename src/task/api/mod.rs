//! Transport-agnostic request handling for task endpoints.
//!
//! Maps service outcomes onto HTTP status codes and the wire shapes clients
//! exchange, leaving routing and authentication to the embedding server.

mod handlers;
mod payloads;

pub use handlers::{ApiResponse, TaskApi};
pub use payloads::{CreateTaskPayload, TaskRepresentation, UpdateTaskPayload};
