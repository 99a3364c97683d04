//! Versioned snapshot schemas.
//!
//! Each logical store is one JSON blob carrying an explicit schema
//! version. Blobs written before versioning have no `version` field;
//! they decode as version 0, which is field-compatible with version 1 and
//! is rewritten as the current version on the next save. Blobs from a
//! newer release fail fast instead of being silently merged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AppSettings, User};
use crate::error::StorageError;
use crate::gamification::FitnessProfile;
use crate::progress::ProgressLog;
use crate::work::WorkItem;

/// Newest snapshot schema version this build reads and writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted shape of the "timetable" store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub works: Vec<WorkItem>,
    #[serde(default)]
    pub progress_logs: Vec<ProgressLog>,
    #[serde(default)]
    pub fitness_profile: FitnessProfile,
}

/// Persisted shape of the "auth" store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub settings: AppSettings,
}

/// Serialize a snapshot for writing, pretty-printed for hand inspection.
pub fn encode<T: Serialize>(name: &str, snapshot: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec_pretty(snapshot).map_err(|source| StorageError::EncodeFailed {
        name: name.to_string(),
        source,
    })
}

/// Decode a snapshot blob, enforcing the version contract.
///
/// A missing version field is the legacy pre-versioned shape and loads as
/// version 0; anything newer than [`SNAPSHOT_VERSION`] is rejected.
pub fn decode<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T, StorageError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|source| StorageError::DecodeFailed {
            name: name.to_string(),
            source,
        })?;
    let found = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0) as u32;
    if found > SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            name: name.to_string(),
            found,
            supported: SNAPSHOT_VERSION,
        });
    }
    if found < SNAPSHOT_VERSION {
        debug!(store = name, from = found, to = SNAPSHOT_VERSION, "migrating snapshot");
    }
    serde_json::from_value(value).map_err(|source| StorageError::DecodeFailed {
        name: name.to_string(),
        source,
    })
}

impl Default for TimetableSnapshot {
    fn default() -> Self {
        TimetableSnapshot {
            version: SNAPSHOT_VERSION,
            works: Vec::new(),
            progress_logs: Vec::new(),
            fitness_profile: FitnessProfile::default(),
        }
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        AuthSnapshot {
            version: SNAPSHOT_VERSION,
            user: None,
            is_authenticated: false,
            settings: AppSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_state() {
        let snapshot = TimetableSnapshot {
            fitness_profile: FitnessProfile {
                xp: 1500,
                level: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let bytes = encode("timetable", &snapshot).unwrap();
        let back: TimetableSnapshot = decode("timetable", &bytes).unwrap();
        assert_eq!(back.version, SNAPSHOT_VERSION);
        assert_eq!(back.fitness_profile.xp, 1500);
    }

    #[test]
    fn legacy_blob_without_version_loads_as_v0() {
        let legacy = br#"{"works":[],"progressLogs":[]}"#;
        let snapshot: TimetableSnapshot = decode("timetable", legacy).unwrap();
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.works.is_empty());
        assert_eq!(snapshot.fitness_profile.level, 1);
    }

    #[test]
    fn newer_version_fails_fast() {
        let future = br#"{"version":99,"works":[]}"#;
        let err = decode::<TimetableSnapshot>("timetable", future).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION,
                ..
            }
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode::<AuthSnapshot>("auth", b"not json").unwrap_err();
        assert!(matches!(err, StorageError::DecodeFailed { .. }));
    }

    #[test]
    fn auth_snapshot_serializes_blob_layout() {
        let snapshot = AuthSnapshot {
            user: Some(User {
                name: "Aki".to_string(),
                email: "aki@example.com".to_string(),
                avatar: None,
            }),
            is_authenticated: true,
            ..Default::default()
        };
        let json = String::from_utf8(encode("auth", &snapshot).unwrap()).unwrap();
        assert!(json.contains("\"isAuthenticated\": true"));
        assert!(json.contains("\"viewMode\": \"grid\""));
        assert!(json.contains("\"showMotivation\": true"));
    }
}
