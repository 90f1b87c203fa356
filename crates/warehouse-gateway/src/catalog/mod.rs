//! Method catalog — the static list of exposed RPC methods and their shapes.

use serde_json::{json, Value};

/// Every method the gateway exposes. The empty string is the default/root
/// procedure, distinct from all named methods. This list is the single source
/// of truth for both transports and the OpenAPI document.
pub const METHOD_NAMES: &[&str] = &[
    "",
    "getAccountInfo",
    "getBalance",
    "getBlock",
    "getBlockCommitment",
    "getBlockHeight",
    "getBlockProduction",
    "getBlockTime",
    "getBlocks",
    "getBlocksWithLimit",
    "getClusterNodes",
    "getEpochInfo",
    "getEpochSchedule",
    "getFeeForMessage",
    "getFirstAvailableBlock",
    "getGenesisHash",
    "getHealth",
    "getHighestSnapshotSlot",
    "getIdentity",
    "getInflationGovernor",
    "getInflationRate",
    "getLargestAccounts",
    "getLatestBlockhash",
    "getLeaderSchedule",
    "getMaxRetransmitSlot",
    "getMaxShredInsertSlot",
    "getMinimumBalanceForRentExemption",
    "getMultipleAccounts",
    "getProgramAccounts",
    "getRecentPerformanceSample",
    "getRecentPrioritizationFees",
    "getSignatureStatuses",
    "getSignaturesForAddress",
    "getSlot",
    "getSlotLeader",
    "getSlotLeaders",
    "getStakeMinimumDelegation",
    "getSupply",
    "getTokenAccountBalance",
    "getTokenAccountsByDelegate",
    "getTokenAccountsByOwner",
    "getTokenLargestAccounts",
    "getTokenSupply",
    "getTransaction",
    "getTransactionCount",
    "getVersion",
    "getVoteAccounts",
    "isBlockhashValid",
    "minimumLedgerSlot",
    "requestAirdrop",
    "sendTransaction",
    "simulateTransaction",
];

/// Input shape of a procedure. One canonical shape exists: a heterogeneous
/// positional parameter list wrapped in a `{ params: [...] }` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    ParamsArray,
}

impl InputShape {
    /// JSON Schema fragment for the OpenAPI request body.
    pub fn json_schema(&self) -> Value {
        match self {
            InputShape::ParamsArray => json!({
                "type": "object",
                "properties": {
                    "params": { "type": "array", "items": {} }
                },
                "required": ["params"]
            }),
        }
    }
}

/// Output shape of a procedure: an open string-keyed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    OpenObject,
}

impl OutputShape {
    /// JSON Schema fragment for the OpenAPI response body.
    pub fn json_schema(&self) -> Value {
        match self {
            OutputShape::OpenObject => json!({
                "type": "object",
                "additionalProperties": true
            }),
        }
    }
}

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub input_shape: InputShape,
    pub output_shape: OutputShape,
}

impl MethodDescriptor {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            input_shape: InputShape::ParamsArray,
            output_shape: OutputShape::OpenObject,
        }
    }
}

/// The ordered catalog, one descriptor per exposed method.
pub fn catalog() -> Vec<MethodDescriptor> {
    METHOD_NAMES.iter().map(|name| MethodDescriptor::new(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_matches_method_names() {
        let entries = catalog();
        assert_eq!(entries.len(), METHOD_NAMES.len());
        for (descriptor, name) in entries.iter().zip(METHOD_NAMES) {
            assert_eq!(descriptor.name, *name);
        }
    }

    #[test]
    fn names_are_unique() {
        let unique: HashSet<&str> = METHOD_NAMES.iter().copied().collect();
        assert_eq!(unique.len(), METHOD_NAMES.len());
    }

    #[test]
    fn includes_default_and_named_methods() {
        assert!(METHOD_NAMES.contains(&""));
        assert!(METHOD_NAMES.contains(&"getBalance"));
        assert!(METHOD_NAMES.contains(&"simulateTransaction"));
    }

    #[test]
    fn input_schema_requires_params_array() {
        let schema = InputShape::ParamsArray.json_schema();
        assert_eq!(schema["required"][0], "params");
        assert_eq!(schema["properties"]["params"]["type"], "array");
    }
}
