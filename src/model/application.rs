use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Runtime health of an application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalState {
    Running,
    Stopped,
    Pending,
    Error,
}

impl OperationalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalState::Running => "running",
            OperationalState::Stopped => "stopped",
            OperationalState::Pending => "pending",
            OperationalState::Error => "error",
        }
    }
}

/// Operator-controlled flag, independent of runtime health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    Enabled,
    Disabled,
    Maintenance,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminState::Enabled => "enabled",
            AdminState::Disabled => "disabled",
            AdminState::Maintenance => "maintenance",
        }
    }
}

/// An application registered under a seal.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub env: String,                 // "production", "staging", ...
    pub instances: u32,
    pub last_updated: DateTime<Utc>,
    pub memory_usage: String,        // already human-readable, e.g. "2.4 GB"
    pub operationalstate: OperationalState,
    pub adminstate: AdminState,
    #[serde(default)]
    pub glb_routes: Vec<String>,
}

impl Application {
    /// `last_updated` in the operator's local time, minute precision.
    pub fn last_updated_local(&self) -> String {
        self.last_updated
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Response shape of the seal lookup. Not retained past the fetch.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealData {
    pub seal_id: String,
    pub applications: Vec<Application>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_deserializes_wire_names() {
        let json = r#"{
            "id": "1",
            "name": "user-service",
            "env": "production",
            "instances": 3,
            "last_updated": "2025-01-02T10:30:00Z",
            "memory_usage": "2.4 GB",
            "operationalstate": "running",
            "adminstate": "maintenance",
            "glb_routes": ["/api/users", "/api/auth"]
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.name, "user-service");
        assert_eq!(app.instances, 3);
        assert_eq!(app.operationalstate, OperationalState::Running);
        assert_eq!(app.adminstate, AdminState::Maintenance);
        assert_eq!(app.glb_routes.len(), 2);
    }

    #[test]
    fn application_rejects_unknown_state() {
        let json = r#"{
            "id": "1", "name": "x", "env": "dev", "instances": 1,
            "last_updated": "2025-01-02T10:30:00Z", "memory_usage": "1 GB",
            "operationalstate": "exploded", "adminstate": "enabled"
        }"#;
        assert!(serde_json::from_str::<Application>(json).is_err());
    }

    #[test]
    fn seal_data_uses_camel_case() {
        let json = r#"{"sealId": "SEAL123", "applications": []}"#;
        let data: SealData = serde_json::from_str(json).unwrap();
        assert_eq!(data.seal_id, "SEAL123");
        assert!(data.applications.is_empty());
    }
}
