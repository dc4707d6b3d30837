use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metric name -> score, as submitted on the daily form
pub type KpiScores = BTreeMap<String, String>;

/// Database model for a daily report (`form_data` table)
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    /// Subject name at submission time
    pub name: String,
    /// Role label at submission time
    pub role: String,
    pub day: NaiveDate,
    pub kpi_scores: Json<KpiScores>,
    pub attendance: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub notes: Option<String>,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub name: String,
    pub role: String,
    pub day: NaiveDate,
    pub kpi_scores: KpiScores,
    pub attendance: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub notes: Option<String>,
    pub user_id: Uuid,
    pub role_id: Uuid,
}

/// Owning user, as currently stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

/// Role classification, as currently stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    pub id: Uuid,
    pub name: String,
}

/// A report together with its related user and role.
///
/// Relations are optional so a dangling row still loads.
#[derive(Debug, Clone)]
pub struct ReportWithRelations {
    pub report: Report,
    pub user: Option<UserRef>,
    pub role: Option<RoleRef>,
}

/// Timestamp used to order report listings (always descending)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReportOrder {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ReportOrder {
    pub fn column(&self) -> &'static str {
        match self {
            ReportOrder::CreatedAt => "created_at",
            ReportOrder::UpdatedAt => "updated_at",
        }
    }
}

impl std::fmt::Display for ReportOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportOrder::CreatedAt => write!(f, "createdAt"),
            ReportOrder::UpdatedAt => write!(f, "updatedAt"),
        }
    }
}
