//! Report persistence
//!
//! `ReportRepository` is the seam between `ReportService` and storage.
//! `PgReportRepository` backs it with the `form_data` table and LEFT JOINs
//! `users` and `roles` wherever a report is read with its relations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CreateReport, KpiScores, Report, ReportOrder, ReportWithRelations, RoleRef, UserRef,
};
use crate::shared::constants::{DUPLICATE_REPORT_MESSAGE, REPORT_USER_DAY_CONSTRAINT};

/// Storage operations needed by the report service
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Existing report for a user on a given day, if any
    async fn find_by_user_and_day(&self, user_id: Uuid, day: NaiveDate) -> Result<Option<Report>>;

    /// All reports with relations, newest first by `order` (default created_at)
    async fn find_many(&self, order: Option<ReportOrder>) -> Result<Vec<ReportWithRelations>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ReportWithRelations>>;

    /// Insert a report. A second report for the same (user, day) is a
    /// `AppError::Conflict`.
    async fn insert(&self, data: &CreateReport) -> Result<Report>;

    /// Delete by id, returning the removed row
    async fn delete(&self, id: Uuid) -> Result<Option<Report>>;
}

macro_rules! report_columns {
    () => {
        "id, name, role, day, kpi_scores, attendance, time_in, time_out, notes, \
         user_id, role_id, created_at, updated_at"
    };
}

macro_rules! report_with_relations_select {
    () => {
        "SELECT \
            f.id, f.name, f.role, f.day, f.kpi_scores, f.attendance, f.time_in, f.time_out, \
            f.notes, f.user_id, f.role_id, f.created_at, f.updated_at, \
            u.id AS rel_user_id, u.name AS rel_user_name, u.email AS rel_user_email, \
            r.id AS rel_role_id, r.name AS rel_role_name \
         FROM form_data f \
         LEFT JOIN users u ON u.id = f.user_id \
         LEFT JOIN roles r ON r.id = f.role_id"
    };
}

const FIND_BY_USER_AND_DAY_SQL: &str = concat!(
    "SELECT ",
    report_columns!(),
    " FROM form_data WHERE user_id = $1 AND day = $2 LIMIT 1"
);

const FIND_BY_ID_SQL: &str = concat!(report_with_relations_select!(), " WHERE f.id = $1");

const INSERT_SQL: &str = concat!(
    "INSERT INTO form_data ( \
        name, role, day, kpi_scores, attendance, time_in, time_out, notes, user_id, role_id \
     ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING ",
    report_columns!()
);

const DELETE_SQL: &str = concat!(
    "DELETE FROM form_data WHERE id = $1 RETURNING ",
    report_columns!()
);

/// Flattened row of `report_with_relations_select!`
#[derive(Debug, FromRow)]
struct ReportWithRelationsRow {
    id: Uuid,
    name: String,
    role: String,
    day: NaiveDate,
    kpi_scores: Json<KpiScores>,
    attendance: String,
    time_in: Option<String>,
    time_out: Option<String>,
    notes: Option<String>,
    user_id: Uuid,
    role_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    rel_user_id: Option<Uuid>,
    rel_user_name: Option<String>,
    rel_user_email: Option<String>,
    rel_role_id: Option<Uuid>,
    rel_role_name: Option<String>,
}

impl From<ReportWithRelationsRow> for ReportWithRelations {
    fn from(row: ReportWithRelationsRow) -> Self {
        let user = match (row.rel_user_id, row.rel_user_name) {
            (Some(id), Some(name)) => Some(UserRef {
                id,
                name,
                email: row.rel_user_email,
            }),
            _ => None,
        };
        let role = match (row.rel_role_id, row.rel_role_name) {
            (Some(id), Some(name)) => Some(RoleRef { id, name }),
            _ => None,
        };

        Self {
            report: Report {
                id: row.id,
                name: row.name,
                role: row.role,
                day: row.day,
                kpi_scores: row.kpi_scores,
                attendance: row.attendance,
                time_in: row.time_in,
                time_out: row.time_out,
                notes: row.notes,
                user_id: row.user_id,
                role_id: row.role_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            user,
            role,
        }
    }
}

/// True when the error is the (user_id, day) unique index firing
fn is_duplicate_report(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db| {
        db.is_unique_violation() && db.constraint() == Some(REPORT_USER_DAY_CONSTRAINT)
    })
}

/// Postgres-backed report repository
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn find_by_user_and_day(&self, user_id: Uuid, day: NaiveDate) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(FIND_BY_USER_AND_DAY_SQL)
            .bind(user_id)
            .bind(day)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up report for user {} on {}: {:?}", user_id, day, e);
                AppError::Database(e)
            })
    }

    async fn find_many(&self, order: Option<ReportOrder>) -> Result<Vec<ReportWithRelations>> {
        // Column names come from ReportOrder, never from user input
        let order = order.unwrap_or_default();
        tracing::debug!("Listing reports ordered by {}", order);
        let sql = format!(
            "{} ORDER BY f.{} DESC, f.id",
            report_with_relations_select!(),
            order.column()
        );

        let rows = sqlx::query_as::<_, ReportWithRelationsRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(ReportWithRelations::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ReportWithRelations>> {
        let row = sqlx::query_as::<_, ReportWithRelationsRow>(FIND_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(ReportWithRelations::from))
    }

    async fn insert(&self, data: &CreateReport) -> Result<Report> {
        sqlx::query_as::<_, Report>(INSERT_SQL)
            .bind(&data.name)
            .bind(&data.role)
            .bind(data.day)
            .bind(Json(&data.kpi_scores))
            .bind(&data.attendance)
            .bind(&data.time_in)
            .bind(&data.time_out)
            .bind(&data.notes)
            .bind(data.user_id)
            .bind(data.role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_report(&e) {
                    tracing::warn!(
                        "Duplicate report rejected by storage: user={}, day={}",
                        data.user_id,
                        data.day
                    );
                    return AppError::Conflict(DUPLICATE_REPORT_MESSAGE.to_string());
                }
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(DELETE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }
}
