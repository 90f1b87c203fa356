//! warehouse-gateway — dual-protocol gateway exposing the Solana RPC method
//! catalog over a typed JSON-RPC transport and a REST/OpenAPI surface.
//!
//! The gateway accepts, validates, and shapes the request/response contract
//! for each catalog method; it never dispatches the resulting call descriptor
//! to a downstream node.

pub mod catalog;
pub mod config;
pub mod context;
pub mod openapi;
pub mod registry;
pub mod schema;
pub mod server;
pub mod types;

pub use catalog::MethodDescriptor;
pub use context::RequestContext;
pub use registry::{CallDescriptor, ProcedureRegistry};
pub use types::{GatewayError, GatewayResult};
