//! Per-request context construction.

use axum::http::{HeaderMap, Method, Uri};

/// Context handed to every procedure, built fresh per inbound call and
/// discarded when the call completes. Carries the inbound request handles;
/// never shared across calls.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestContext {
    /// Total constructor: any valid transport handles produce a context.
    /// Synchronous, no failure path, no mutation of the handles.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }
}
