//! Input/output shape validation.
//!
//! Input is checked before a procedure body runs, output before the transport
//! serializes the response. A handler never observes invalid input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{InputShape, OutputShape};
use crate::types::{GatewayError, GatewayResult};

/// The request envelope every procedure accepts: a positional, heterogeneous
/// parameter list. Unknown envelope keys are ignored; element-level typing is
/// deliberately not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsEnvelope {
    pub params: Vec<Value>,
}

/// Validate an inbound payload against the method's input shape.
pub fn validate_input(shape: InputShape, raw: Value) -> GatewayResult<ParamsEnvelope> {
    match shape {
        InputShape::ParamsArray => {
            serde_json::from_value(raw).map_err(|e| GatewayError::BadRequest(e.to_string()))
        }
    }
}

/// Validate an outbound value against the method's output shape.
pub fn validate_output(shape: OutputShape, value: &Value) -> GatewayResult<()> {
    match shape {
        OutputShape::OpenObject => {
            if value.is_object() {
                Ok(())
            } else {
                Err(GatewayError::Internal(format!(
                    "procedure returned a non-object value: {value}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_any_array_including_empty() {
        let envelope = validate_input(InputShape::ParamsArray, json!({ "params": [] })).unwrap();
        assert!(envelope.params.is_empty());

        let envelope = validate_input(
            InputShape::ParamsArray,
            json!({ "params": ["abc", 3, null, { "nested": true }] }),
        )
        .unwrap();
        assert_eq!(envelope.params.len(), 4);
        assert_eq!(envelope.params[0], json!("abc"));
        assert_eq!(envelope.params[3], json!({ "nested": true }));
    }

    #[test]
    fn rejects_missing_params_field() {
        let err = validate_input(InputShape::ParamsArray, json!({ "notparams": [] })).unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn rejects_non_array_params() {
        for raw in [
            json!({ "params": "abc" }),
            json!({ "params": 42 }),
            json!({ "params": { "0": "abc" } }),
            json!({ "params": null }),
        ] {
            let err = validate_input(InputShape::ParamsArray, raw).unwrap_err();
            assert!(matches!(err, GatewayError::BadRequest(_)));
        }
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = validate_input(InputShape::ParamsArray, json!(null)).unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn ignores_unknown_envelope_keys() {
        let envelope = validate_input(
            InputShape::ParamsArray,
            json!({ "params": [1], "extra": "dropped" }),
        )
        .unwrap();
        assert_eq!(envelope.params, vec![json!(1)]);
    }

    #[test]
    fn output_must_be_an_object() {
        validate_output(OutputShape::OpenObject, &json!({ "method": "getSlot" })).unwrap();

        let err = validate_output(OutputShape::OpenObject, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, GatewayError::Internal(_)));
    }
}
