//! Procedure registration and dispatch — the catalog-to-registry synthesis.
//!
//! Built once at startup from the method catalog, read-only thereafter. Both
//! transports resolve and execute procedures through [`ProcedureRegistry::call`],
//! so validation and handler logic can never diverge between them.

use std::collections::BTreeMap;

use axum::http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::MethodDescriptor;
use crate::context::RequestContext;
use crate::schema::{self, ParamsEnvelope};
use crate::types::{GatewayError, GatewayResult};

/// Documentation tag applied to every registered route.
pub const RPC_TAG: &str = "rpc";

/// The record a procedure produces: what would be forwarded downstream.
/// The gateway never performs the forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallDescriptor {
    pub method: String,
    pub input: ParamsEnvelope,
}

/// Transport metadata attached to each procedure at registration.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub http_method: Method,
    pub path: String,
    pub tags: &'static [&'static str],
}

type Handler = Box<dyn Fn(&RequestContext, ParamsEnvelope) -> CallDescriptor + Send + Sync>;

/// One registered procedure: catalog descriptor, route metadata, bound handler.
pub struct Procedure {
    pub descriptor: MethodDescriptor,
    pub route: RouteMeta,
    handler: Handler,
}

/// Immutable name → procedure mapping. No writer exists after construction,
/// so it is shared across request tasks without locking.
pub struct ProcedureRegistry {
    procedures: BTreeMap<String, Procedure>,
}

impl ProcedureRegistry {
    /// Synthesize one procedure per catalog descriptor.
    ///
    /// The bound handler is a pure construction step: it echoes the validated
    /// input back inside a [`CallDescriptor`] and cannot fail. Duplicate names
    /// are a build-time defect and are rejected here, never silently
    /// overwritten.
    pub fn build(catalog: Vec<MethodDescriptor>) -> GatewayResult<Self> {
        let mut procedures = BTreeMap::new();

        for descriptor in catalog {
            let name = descriptor.name.to_string();
            let route = RouteMeta {
                http_method: Method::POST,
                path: format!("/rpc/{}", descriptor.name),
                tags: &[RPC_TAG],
            };
            let bound_name = descriptor.name;
            let handler: Handler = Box::new(move |_ctx, input| CallDescriptor {
                method: bound_name.to_string(),
                input,
            });

            let previous = procedures.insert(
                name.clone(),
                Procedure {
                    descriptor,
                    route,
                    handler,
                },
            );
            if previous.is_some() {
                return Err(GatewayError::Configuration(format!(
                    "duplicate method name in catalog: {name:?}"
                )));
            }
        }

        Ok(Self { procedures })
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Registered procedures in deterministic (name) order.
    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.values()
    }

    /// Registered names in deterministic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }

    /// The single execution path shared by both transports: resolve the
    /// procedure, validate input, run the bound handler, validate output.
    pub fn call(
        &self,
        name: &str,
        ctx: &RequestContext,
        raw_input: Value,
    ) -> GatewayResult<Value> {
        let procedure = self
            .procedures
            .get(name)
            .ok_or_else(|| GatewayError::NotFound(name.to_string()))?;

        let input = schema::validate_input(procedure.descriptor.input_shape, raw_input)?;
        let call = (procedure.handler)(ctx, input);
        let value =
            serde_json::to_value(&call).map_err(|e| GatewayError::Internal(e.to_string()))?;
        schema::validate_output(procedure.descriptor.output_shape, &value)?;

        Ok(value)
    }
}
