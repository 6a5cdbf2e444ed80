//! Connections to municipal asset-management systems.
//!
//! A connection records where condition data comes from and how often it is
//! pulled. Fetching data is out of scope here; this module only tracks the
//! configured cadence and the outcome of each sync attempt.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use transitplan_core::{ConnectionId, DomainError, DomainResult, Entity, error::ensure_not_blank};

/// Sync attempts kept per connection; older records are dropped first.
pub const MAX_SYNC_HISTORY: usize = 100;

/// Connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Registered; no sync has run yet.
    Configured,
    /// The most recent sync succeeded.
    Synced,
    /// The most recent sync failed.
    SyncFailed,
}

/// Result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Succeeded { assets_synced: u32 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    pub synced_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

/// Caller-supplied description of a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInput {
    pub connection_id: ConnectionId,
    pub system_name: String,
    /// Endpoint URLs, credentials references and the like; stored verbatim.
    #[serde(default)]
    pub connection_details: serde_json::Value,
    #[serde(default)]
    pub asset_types: Vec<String>,
    pub sync_frequency_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManagementConnection {
    pub connection_id: ConnectionId,
    pub system_name: String,
    pub connection_details: serde_json::Value,
    pub asset_types: Vec<String>,
    pub sync_frequency_hours: u32,
    pub last_sync: Option<DateTime<Utc>>,
    pub next_scheduled_sync: DateTime<Utc>,
    /// The most recent [`MAX_SYNC_HISTORY`] attempts, oldest first.
    pub sync_history: Vec<SyncRecord>,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for AssetManagementConnection {
    type Id = ConnectionId;

    fn id(&self) -> &Self::Id {
        &self.connection_id
    }
}

impl ConnectionInput {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("system_name", &self.system_name)?;
        if self.sync_frequency_hours == 0 {
            return Err(DomainError::invalid_parameter(
                "sync_frequency_hours",
                "must be at least 1 hour",
            ));
        }
        for (i, asset_type) in self.asset_types.iter().enumerate() {
            ensure_not_blank(&format!("asset_types[{i}]"), asset_type)?;
        }
        Ok(())
    }
}

/// Register a connection; the first sync is due one interval after `now`.
pub fn configure(
    input: ConnectionInput,
    now: DateTime<Utc>,
) -> DomainResult<AssetManagementConnection> {
    input.validate()?;
    let next_scheduled_sync = next_sync_after(now, input.sync_frequency_hours)?;

    Ok(AssetManagementConnection {
        connection_id: input.connection_id,
        system_name: input.system_name.trim().to_string(),
        connection_details: input.connection_details,
        asset_types: input.asset_types,
        sync_frequency_hours: input.sync_frequency_hours,
        last_sync: None,
        next_scheduled_sync,
        sync_history: Vec::new(),
        status: ConnectionStatus::Configured,
        created_at: now,
    })
}

/// Append a sync attempt and move the next sync one interval past `now`.
///
/// Failed attempts are rescheduled on the same cadence. History beyond
/// [`MAX_SYNC_HISTORY`] records is trimmed from the front.
pub fn record_sync(
    connection: &mut AssetManagementConnection,
    now: DateTime<Utc>,
    outcome: SyncOutcome,
) -> DomainResult<()> {
    let next = next_sync_after(now, connection.sync_frequency_hours)?;
    connection.status = match outcome {
        SyncOutcome::Succeeded { .. } => ConnectionStatus::Synced,
        SyncOutcome::Failed { .. } => ConnectionStatus::SyncFailed,
    };
    connection.sync_history.push(SyncRecord {
        synced_at: now,
        outcome,
    });
    let overflow = connection.sync_history.len().saturating_sub(MAX_SYNC_HISTORY);
    connection.sync_history.drain(..overflow);
    connection.last_sync = Some(now);
    connection.next_scheduled_sync = next;
    Ok(())
}

fn next_sync_after(now: DateTime<Utc>, hours: u32) -> DomainResult<DateTime<Utc>> {
    Duration::try_hours(i64::from(hours))
        .and_then(|step| now.checked_add_signed(step))
        .ok_or_else(|| {
            DomainError::invalid_parameter("sync_frequency_hours", "exceeds the calendar range")
        })
}
