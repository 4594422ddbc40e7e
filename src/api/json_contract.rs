use serde::{Deserialize, Serialize};

use crate::core::{ParserKernel, SplitConfig, TimeInterval, TimeSpan};
use crate::error::{TimeError, TimeResult};

pub const PARSER_KERNEL_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserKernelJsonContractV1 {
    pub schema_version: u32,
    pub kernel: ParserKernel,
}

impl ParserKernel {
    pub fn to_json_contract_v1_pretty(&self) -> TimeResult<String> {
        let payload = ParserKernelJsonContractV1 {
            schema_version: PARSER_KERNEL_JSON_SCHEMA_V1,
            kernel: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimeError::InvalidData(format!("failed to serialize parser kernel contract v1: {e}"))
        })
    }

    /// Accepts either a bare `{ "patterns": [...] }` object or a versioned
    /// contract payload.
    pub fn from_json_compat_str(input: &str) -> TimeResult<Self> {
        if let Ok(kernel) = serde_json::from_str::<ParserKernel>(input) {
            return Ok(kernel);
        }
        let payload: ParserKernelJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimeError::InvalidData(format!("failed to parse parser kernel json payload: {e}"))
        })?;
        if payload.schema_version != PARSER_KERNEL_JSON_SCHEMA_V1 {
            return Err(TimeError::InvalidData(format!(
                "unsupported parser kernel schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.kernel)
    }
}

impl SplitConfig {
    pub fn to_json_pretty(self) -> TimeResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            TimeError::InvalidData(format!("failed to serialize split config json: {e}"))
        })
    }

    /// Parses and validates a split config; missing fields take defaults.
    pub fn from_json_str(input: &str) -> TimeResult<Self> {
        let config: SplitConfig = serde_json::from_str(input).map_err(|e| {
            TimeError::InvalidData(format!("failed to parse split config json: {e}"))
        })?;
        config.validate()
    }
}

impl TimeInterval {
    /// Serializes to the `{ "type": "Y", "value": 2024, "increment": {...} }` shape.
    pub fn to_json(&self) -> TimeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TimeError::InvalidData(format!("failed to serialize time interval: {e}")))
    }

    /// Parses the JSON shape and checks that the chain resolves.
    pub fn from_json_str(input: &str) -> TimeResult<Self> {
        let interval: TimeInterval = serde_json::from_str(input)
            .map_err(|e| TimeError::InvalidData(format!("failed to parse time interval json: {e}")))?;
        interval.to_seconds(false, None)?;
        Ok(interval)
    }
}

impl TimeSpan {
    pub fn to_json(&self) -> TimeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TimeError::InvalidData(format!("failed to serialize time span: {e}")))
    }

    pub fn from_json_str(input: &str) -> TimeResult<Self> {
        let span: TimeSpan = serde_json::from_str(input)
            .map_err(|e| TimeError::InvalidData(format!("failed to parse time span json: {e}")))?;
        span.start.to_seconds(false, None)?;
        span.end.to_seconds(false, None)?;
        Ok(span)
    }
}
