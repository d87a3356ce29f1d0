use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{Chart, ChartSnapshot, OverlaySurface};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

#[derive(Serialize)]
struct ContractRef<'a> {
    schema_version: u32,
    snapshot: &'a ChartSnapshot,
}

/// Either payload shape accepted by [`ChartSnapshot::from_json_compat_str`].
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotPayload {
    Versioned(ChartSnapshotJsonContractV1),
    Bare(ChartSnapshot),
}

fn json_error(context: &str, err: serde_json::Error) -> ChartError {
    ChartError::InvalidData(format!("{context}: {err}"))
}

impl ChartSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| json_error("snapshot serialization", e))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ContractRef {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self,
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| json_error("snapshot contract v1 serialization", e))
    }

    /// Accepts both the bare snapshot and the versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let payload: SnapshotPayload =
            serde_json::from_str(input).map_err(|e| json_error("snapshot json payload", e))?;
        match payload {
            SnapshotPayload::Bare(snapshot) => Ok(snapshot),
            SnapshotPayload::Versioned(contract)
                if contract.schema_version == CHART_SNAPSHOT_JSON_SCHEMA_V1 =>
            {
                Ok(contract.snapshot)
            }
            SnapshotPayload::Versioned(contract) => Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                contract.schema_version
            ))),
        }
    }
}

impl<R: Renderer, S: OverlaySurface> Chart<R, S> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
