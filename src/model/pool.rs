use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    Manual,
    Automatic,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::Manual => "manual",
            PoolKind::Automatic => "automatic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    Running,
    Stopped,
    Error,
}

impl PoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolStatus::Running => "running",
            PoolStatus::Stopped => "stopped",
            PoolStatus::Error => "error",
        }
    }
}

/// A deployable unit belonging to an application.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PoolKind,
    pub status: PoolStatus,
    pub size: String,          // e.g. "950 MB"
    pub last_modified: String, // "2024-02-01 10:30", shown as-is
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_deserializes_type_and_last_modified() {
        let json = r#"{
            "id": "p1",
            "name": "Production Pool",
            "type": "automatic",
            "status": "error",
            "size": "2.4 GB",
            "lastModified": "2024-02-01 10:30"
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.kind, PoolKind::Automatic);
        assert_eq!(pool.status, PoolStatus::Error);
        assert_eq!(pool.last_modified, "2024-02-01 10:30");
    }
}
