use serde::{Deserialize, Serialize};

use transitplan_core::{AssetId, ConnectionId, ReportId, ScheduleId};

use crate::app::errors;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    pub asset_id: Option<String>,
}

impl AssetQuery {
    pub fn asset_id(&self) -> Result<Option<AssetId>, axum::response::Response> {
        self.asset_id.as_deref().map(parse_asset_id).transpose()
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

// -------------------------
// Path parameters
// -------------------------

pub fn parse_asset_id(raw: &str) -> Result<AssetId, axum::response::Response> {
    AssetId::new(raw).map_err(errors::domain_error_to_response)
}

pub fn parse_schedule_id(raw: &str) -> Result<ScheduleId, axum::response::Response> {
    ScheduleId::new(raw).map_err(errors::domain_error_to_response)
}

pub fn parse_connection_id(raw: &str) -> Result<ConnectionId, axum::response::Response> {
    ConnectionId::new(raw).map_err(errors::domain_error_to_response)
}

pub fn parse_report_id(raw: &str) -> Result<ReportId, axum::response::Response> {
    ReportId::new(raw).map_err(errors::domain_error_to_response)
}
