//! Shared wire types for both transports.

pub mod error;
pub mod message;

pub use error::{ErrorShape, GatewayError, GatewayResult};
pub use message::{
    RequestId, RpcErrorObject, RpcErrorResponse, RpcRequest, RpcResponse, RPC_VERSION,
};
