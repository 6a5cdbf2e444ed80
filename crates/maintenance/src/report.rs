//! Community maintenance reports and voting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use transitplan_core::{
    AssetId, DomainResult, Entity, ReportId,
    error::{ensure_in_range, ensure_not_blank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    #[default]
    Upvote,
    Downvote,
}

/// Where the reported issue is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersection: Option<String>,
}

impl Location {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_in_range("location.latitude", self.latitude, -90.0, 90.0)?;
        ensure_in_range("location.longitude", self.longitude, -180.0, 180.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    pub report_id: ReportId,
    pub asset_id: AssetId,
    pub location: Location,
    pub reporter_id: String,
    pub issue_type: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl ReportInput {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("reporter_id", &self.reporter_id)?;
        ensure_not_blank("issue_type", &self.issue_type)?;
        ensure_not_blank("description", &self.description)?;
        self.location.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub report_id: ReportId,
    pub asset_id: AssetId,
    pub location: Location,
    pub reporter_id: String,
    pub issue_type: String,
    pub description: String,
    pub severity: Severity,
    pub photos: Vec<String>,
    pub status: ReportStatus,
    /// Net votes; the reporter's own vote counts as the first one.
    pub votes: i64,
    pub submission_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Entity for MaintenanceReport {
    type Id = ReportId;

    fn id(&self) -> &Self::Id {
        &self.report_id
    }
}

pub fn submit(input: ReportInput, now: DateTime<Utc>) -> DomainResult<MaintenanceReport> {
    input.validate()?;
    Ok(MaintenanceReport {
        report_id: input.report_id,
        asset_id: input.asset_id,
        location: input.location,
        reporter_id: input.reporter_id,
        issue_type: input.issue_type,
        description: input.description,
        severity: input.severity,
        photos: input.photos,
        status: ReportStatus::Submitted,
        votes: 1,
        submission_date: now,
        last_updated: now,
    })
}

/// Apply one vote. Voters are not tracked individually; the count may go negative.
pub fn vote(
    report: &mut MaintenanceReport,
    voter_id: &str,
    vote: VoteType,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    ensure_not_blank("voter_id", voter_id)?;
    report.votes += match vote {
        VoteType::Upvote => 1,
        VoteType::Downvote => -1,
    };
    report.last_updated = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 12, 30, 0).unwrap()
    }

    fn input() -> ReportInput {
        ReportInput {
            report_id: ReportId::new("MR-001").unwrap(),
            asset_id: AssetId::new("BL-2023-001").unwrap(),
            location: Location {
                latitude: 45.52,
                longitude: -122.68,
                address: Some("Oak St & 5th Ave".to_string()),
                intersection: None,
            },
            reporter_id: "resident-17".to_string(),
            issue_type: "pothole".to_string(),
            description: "Deep pothole in the bike lane".to_string(),
            severity: Severity::High,
            photos: vec![],
        }
    }

    #[test]
    fn submitted_report_starts_with_reporter_vote() {
        let report = submit(input(), now()).unwrap();
        assert_eq!(report.votes, 1);
        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.submission_date, report.last_updated);
    }

    #[test]
    fn votes_move_count_both_ways() {
        let mut report = submit(input(), now()).unwrap();
        let later = now() + Duration::minutes(5);
        vote(&mut report, "resident-2", VoteType::Upvote, later).unwrap();
        vote(&mut report, "resident-3", VoteType::Upvote, later).unwrap();
        vote(&mut report, "resident-4", VoteType::Downvote, later).unwrap();
        vote(&mut report, "resident-5", VoteType::Downvote, later).unwrap();
        vote(&mut report, "resident-6", VoteType::Downvote, later).unwrap();
        vote(&mut report, "resident-7", VoteType::Downvote, later).unwrap();
        assert_eq!(report.votes, -1);
        assert_eq!(report.last_updated, later);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut bad = input();
        bad.location.latitude = 91.0;
        assert_eq!(submit(bad, now()).unwrap_err().field(), Some("location.latitude"));

        let mut bad = input();
        bad.location.longitude = -180.5;
        assert_eq!(submit(bad, now()).unwrap_err().field(), Some("location.longitude"));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut bad = input();
        bad.description = String::new();
        assert_eq!(submit(bad, now()).unwrap_err().field(), Some("description"));
    }

    #[test]
    fn severity_parses_lowercase() {
        let s: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(s, Severity::Critical);
        assert!(serde_json::from_str::<Severity>("\"urgent\"").is_err());
    }
}
