use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    config::TelemetryConfig,
    core::FrameworkSelection,
};

pub const UPDATE_PREFERENCE_ID: &str = "updating_user_preference";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractEvent {
    pub eid: String,
    pub ets: i64,
    pub mid: String,
    pub context: EventContext,
    pub edata: InteractData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    pub env: String,
    pub cdata: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub pageid: String,
    pub extra: InteractExtra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractExtra {
    pub framework: FrameworkExtra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkExtra {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub selection: FrameworkSelection,
}

impl InteractEvent {
    /// Click on the save button of the preference editor.
    pub fn preference_update(
        config: &TelemetryConfig,
        user_id: &str,
        selection: &FrameworkSelection,
    ) -> Self {
        Self {
            eid: "INTERACT".to_string(),
            ets: chrono::Utc::now().timestamp_millis(),
            mid: format!("INTERACT:{}", uuid::Uuid::new_v4()),
            context: EventContext { env: config.env.clone(), cdata: Vec::new() },
            edata: InteractData {
                id: UPDATE_PREFERENCE_ID.to_string(),
                kind: "click".to_string(),
                pageid: config.page_id.clone(),
                extra: InteractExtra {
                    framework: FrameworkExtra {
                        id: user_id.to_string(),
                        selection: selection.clone(),
                    },
                },
            },
        }
    }
}

/// Fire and forget destination for interaction events.
pub trait TelemetrySink: Send + Sync {
    fn interact(&self, event: &InteractEvent);
}

/// Writes events to the `telemetry` tracing target.
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn interact(&self, event: &InteractEvent) {
        match serde_json::to_string(event) {
            Ok(json) => tracing::info!(target: "telemetry", mid = %event.mid, "{json}"),
            Err(e) => tracing::warn!(target: "telemetry", "Could not encode event: {e}"),
        }
    }
}
