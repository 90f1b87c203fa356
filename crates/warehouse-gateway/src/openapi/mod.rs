//! OpenAPI 3.0 document generator.
//!
//! A pure function of the registry and base URL: callable at any time after
//! registry construction, same registry in, same document out.

use serde_json::{json, Map, Value};

use crate::registry::{ProcedureRegistry, RPC_TAG};
use crate::server::RPC_NAMESPACE;

pub const OPENAPI_VERSION: &str = "3.0.3";

/// Generate the OpenAPI document for every registered procedure.
pub fn document(registry: &ProcedureRegistry, base_url: &str) -> Value {
    let mut paths = Map::new();

    for procedure in registry.procedures() {
        let name = procedure.descriptor.name;
        let operation_id = format!("{RPC_NAMESPACE}.{name}");

        paths.insert(
            procedure.route.path.clone(),
            json!({
                "post": {
                    "operationId": operation_id,
                    "tags": procedure.route.tags,
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": procedure.descriptor.input_shape.json_schema()
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": {
                                "application/json": {
                                    "schema": procedure.descriptor.output_shape.json_schema()
                                }
                            }
                        },
                        "400": {
                            "description": "Invalid input",
                            "content": {
                                "application/json": {
                                    "schema": error_schema()
                                }
                            }
                        }
                    }
                }
            }),
        );
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": "warehouse-gateway",
            "description": "API service for RPC calls",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "servers": [{ "url": format!("{base_url}/api") }],
        "tags": [{ "name": RPC_TAG }],
        "paths": paths,
    })
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, METHOD_NAMES};

    fn test_registry() -> ProcedureRegistry {
        ProcedureRegistry::build(catalog::catalog()).unwrap()
    }

    #[test]
    fn one_post_operation_per_catalog_entry() {
        let registry = test_registry();
        let doc = document(&registry, "http://0.0.0.0:3000");

        let paths = doc["paths"].as_object().unwrap();
        assert_eq!(paths.len(), METHOD_NAMES.len());

        for (path, item) in paths {
            assert!(path.starts_with("/rpc/"), "unexpected path {path}");
            let operations = item.as_object().unwrap();
            assert_eq!(operations.len(), 1);
            let operation = &operations["post"];
            assert_eq!(operation["tags"], serde_json::json!([RPC_TAG]));
        }
    }

    #[test]
    fn default_method_documented_under_bare_prefix() {
        let registry = test_registry();
        let doc = document(&registry, "http://0.0.0.0:3000");
        assert!(doc["paths"].get("/rpc/").is_some());
    }

    #[test]
    fn server_url_is_base_plus_api() {
        let registry = test_registry();
        let doc = document(&registry, "https://rpc.example.com");
        assert_eq!(doc["servers"][0]["url"], "https://rpc.example.com/api");
    }

    #[test]
    fn generator_is_deterministic() {
        let registry = test_registry();
        let first = document(&registry, "http://0.0.0.0:3000");
        let second = document(&registry, "http://0.0.0.0:3000");
        assert_eq!(first, second);
    }
}
