use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    CreateReport, KpiScores, Report, ReportOrder, ReportWithRelations, RoleRef, UserRef,
};
use crate::shared::validation::{validate_kpi_scores, TIME_OF_DAY_REGEX};

// =============================================================================
// REQUEST DTOs
// =============================================================================

/// Request DTO for submitting a daily report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    /// Name of the person the report is about
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Role label shown on the report
    #[validate(length(min = 1, max = 255, message = "Role must be 1-255 characters"))]
    pub role: String,

    /// Report day (YYYY-MM-DD)
    pub day: NaiveDate,

    /// Score per KPI metric
    #[validate(custom(function = "validate_kpi_scores"))]
    #[schema(value_type = Object)]
    pub kpi_scores: KpiScores,

    #[validate(length(min = 1, max = 255, message = "Attendance must be 1-255 characters"))]
    pub attendance: String,

    /// Clock-in time (HH:MM)
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "timeIn must be HH:MM"))]
    pub time_in: Option<String>,

    /// Clock-out time (HH:MM)
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "timeOut must be HH:MM"))]
    pub time_out: Option<String>,

    #[validate(length(max = 5000, message = "Notes must not exceed 5000 characters"))]
    pub notes: Option<String>,

    pub user_id: Uuid,
    pub role_id: Uuid,
}

impl From<CreateReportDto> for CreateReport {
    fn from(dto: CreateReportDto) -> Self {
        Self {
            name: dto.name,
            role: dto.role,
            day: dto.day,
            kpi_scores: dto.kpi_scores,
            attendance: dto.attendance,
            time_in: dto.time_in,
            time_out: dto.time_out,
            notes: dto.notes,
            user_id: dto.user_id,
            role_id: dto.role_id,
        }
    }
}

/// Query params for listing raw report records
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListReportsQuery {
    /// Timestamp to sort by, newest first (default: createdAt)
    pub order_by: Option<ReportOrder>,
}

// =============================================================================
// RESPONSE DTOs
// =============================================================================

/// Response DTO for a stored report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub day: NaiveDate,
    #[schema(value_type = Object)]
    pub kpi_scores: KpiScores,
    pub attendance: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub notes: Option<String>,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            name: r.name,
            role: r.role,
            day: r.day,
            kpi_scores: r.kpi_scores.0,
            attendance: r.attendance,
            time_in: r.time_in,
            time_out: r.time_out,
            notes: r.notes,
            user_id: r.user_id,
            role_id: r.role_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRefDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

impl From<UserRef> for UserRefDto {
    fn from(u: UserRef) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleRefDto {
    pub id: Uuid,
    pub name: String,
}

impl From<RoleRef> for RoleRefDto {
    fn from(r: RoleRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// Response DTO for a report with its user and role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetailResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub user: Option<UserRefDto>,
    pub role_ref: Option<RoleRefDto>,
}

impl From<ReportWithRelations> for ReportDetailResponseDto {
    fn from(r: ReportWithRelations) -> Self {
        Self {
            report: r.report.into(),
            user: r.user.map(UserRefDto::from),
            role_ref: r.role.map(RoleRefDto::from),
        }
    }
}

/// One KPI line on the reports page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KpiScoreDto {
    pub name: String,
    pub score: String,
}

/// Display shape of a report on the listing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub id: Uuid,
    pub day: NaiveDate,
    pub attendance: String,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub notes: Option<String>,
    /// Subject name stored on the report
    pub user: String,
    /// Role label stored on the report
    pub role: String,
    pub kpi_scores: Vec<KpiScoreDto>,
}

impl ReportSummaryDto {
    /// Turn a metric map into name/score pairs, one per entry
    pub fn reshape_kpi_scores(scores: KpiScores) -> Vec<KpiScoreDto> {
        scores
            .into_iter()
            .map(|(name, score)| KpiScoreDto { name, score })
            .collect()
    }
}

impl From<Report> for ReportSummaryDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            day: r.day,
            attendance: r.attendance,
            time_in: r.time_in,
            time_out: r.time_out,
            notes: r.notes,
            user: r.name,
            role: r.role,
            kpi_scores: Self::reshape_kpi_scores(r.kpi_scores.0),
        }
    }
}

/// Reports page payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportListDto {
    pub reports: Vec<ReportSummaryDto>,
}
