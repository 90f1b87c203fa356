//! Dual-protocol exposure — mounts the procedure registry on the typed
//! JSON-RPC transport and the REST surface, serves the OpenAPI document and
//! docs page, and owns the listener bootstrap.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::config::{Environment, GatewayConfig};
use crate::context::RequestContext;
use crate::openapi;
use crate::registry::ProcedureRegistry;
use crate::types::{GatewayError, GatewayResult, RequestId, RpcRequest, RpcResponse, RPC_VERSION};

/// Namespace under which every procedure is addressed on the typed transport.
pub const RPC_NAMESPACE: &str = "warehouse";

/// Shared server state: the immutable registry plus the pre-rendered OpenAPI
/// document. Read-only after startup.
pub struct AppState {
    pub registry: Arc<ProcedureRegistry>,
    pub environment: Environment,
    pub openapi: Value,
}

/// Build the full router. Both transports resolve procedures through the same
/// registry call path.
pub fn router(registry: Arc<ProcedureRegistry>, config: &GatewayConfig) -> GatewayResult<Router> {
    let document = openapi::document(&registry, &config.base_url()?);
    let state = Arc::new(AppState {
        registry,
        environment: config.environment,
        openapi: document,
    });

    Ok(Router::new()
        .route("/trpc", post(handle_rpc))
        .route("/api/rpc/", post(handle_rest_default))
        .route("/api/rpc/:name", post(handle_rest))
        .route("/openapi.json", get(handle_openapi))
        .route("/docs", get(handle_docs))
        .route("/", get(handle_root))
        .fallback(handle_fallback)
        .layer(CorsLayer::permissive())
        .with_state(state))
}

/// Bind the listener and serve until shutdown.
pub async fn run(registry: Arc<ProcedureRegistry>, config: &GatewayConfig) -> GatewayResult<()> {
    let procedure_count = registry.len();
    let base_url = config.base_url()?;
    let app = router(registry, config)?;

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .map_err(GatewayError::Io)?;

    tracing::info!("Gateway listening on {}", config.addr);
    tracing::info!("{procedure_count} procedures registered");
    tracing::info!("Swagger UI: {base_url}/docs");

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))?;

    Ok(())
}

/// Typed transport: one POST endpoint, procedure addressed as
/// `warehouse.<name>` in the request envelope.
async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<Value> {
    let environment = state.environment;

    let Json(raw) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = GatewayError::BadRequest(rejection.body_text());
            return Json(err.to_rpc_value(RequestId::Null, environment));
        }
    };

    let request: RpcRequest = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => {
            let err = GatewayError::BadRequest(e.to_string());
            return Json(err.to_rpc_value(RequestId::Null, environment));
        }
    };

    let ctx = RequestContext::new(method, uri, headers);
    let id = request.id.clone();

    match dispatch_rpc(&state, &ctx, &request) {
        Ok(value) => {
            Json(serde_json::to_value(RpcResponse::new(id, value)).unwrap_or_default())
        }
        Err(e) => Json(e.to_rpc_value(id, environment)),
    }
}

fn dispatch_rpc(
    state: &AppState,
    ctx: &RequestContext,
    request: &RpcRequest,
) -> GatewayResult<Value> {
    if request.jsonrpc != RPC_VERSION {
        return Err(GatewayError::BadRequest(format!(
            "expected jsonrpc version \"{RPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    // "warehouse.<name>"; the default procedure is addressed as "warehouse.".
    let name = request
        .method
        .strip_prefix(RPC_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .ok_or_else(|| GatewayError::NotFound(request.method.clone()))?;

    let raw_input = request.params.clone().unwrap_or(Value::Null);
    state.registry.call(name, ctx, raw_input)
}

/// REST transport: `POST /api/rpc/:name`.
async fn handle_rest(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    rest_call(&state, &name, method, uri, headers, body)
}

/// REST transport: `POST /api/rpc/` addresses the default procedure.
async fn handle_rest_default(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    rest_call(&state, "", method, uri, headers, body)
}

fn rest_call(
    state: &AppState,
    name: &str,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let environment = state.environment;

    let Json(raw) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return rest_error(&GatewayError::BadRequest(rejection.body_text()), environment)
        }
    };

    let ctx = RequestContext::new(method, uri, headers);
    match state.registry.call(name, &ctx, raw) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => rest_error(&e, environment),
    }
}

fn rest_error(err: &GatewayError, environment: Environment) -> Response {
    (
        err.status(),
        Json(json!({ "error": err.shape(environment) })),
    )
        .into_response()
}

async fn handle_openapi(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.openapi.clone())
}

/// Docs page — pure passthrough rendering of the generated document.
async fn handle_docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

/// Liveness root.
async fn handle_root() -> &'static str {
    "warehouse-gateway running"
}

async fn handle_fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    rest_error(
        &GatewayError::NotFound(uri.path().to_string()),
        state.environment,
    )
}

const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>warehouse-gateway — API docs</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({
        url: "/openapi.json",
        dom_id: "#swagger-ui",
        deepLinking: false,
      });
    };
  </script>
</body>
</html>
"##;
