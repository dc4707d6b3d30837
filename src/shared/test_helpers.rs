//! Test doubles for the report repository and cache invalidator

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{
    CreateReport, KpiScores, Report, ReportOrder, ReportWithRelations, RoleRef, UserRef,
};
use crate::features::reports::repositories::ReportRepository;
use crate::features::reports::{routes as report_routes, ReportService};
use crate::modules::revalidation::CacheInvalidator;
use crate::shared::constants::DUPLICATE_REPORT_MESSAGE;

/// A valid submission for `user_id` on `day`
pub fn create_report_dto(user_id: Uuid, day: NaiveDate) -> CreateReportDto {
    let mut kpi_scores = KpiScores::new();
    kpi_scores.insert("Quality".to_string(), "8".to_string());
    kpi_scores.insert("Speed".to_string(), "7".to_string());

    CreateReportDto {
        name: Name().fake(),
        role: "Agent".to_string(),
        day,
        kpi_scores,
        attendance: "present".to_string(),
        time_in: Some("08:00".to_string()),
        time_out: Some("17:00".to_string()),
        notes: Some("Covered the late shift".to_string()),
        user_id,
        role_id: Uuid::new_v4(),
    }
}

#[derive(Default)]
struct InMemoryState {
    reports: Vec<Report>,
    users: HashMap<Uuid, UserRef>,
    roles: HashMap<Uuid, RoleRef>,
    ticks: i64,
    hide_from_lookup: bool,
    next_error: Option<sqlx::Error>,
    insert_calls: usize,
    lookups: usize,
}

impl InMemoryState {
    /// Strictly increasing clock so ordering is deterministic
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.ticks)
    }

    fn take_error(&mut self) -> Result<()> {
        match self.next_error.take() {
            Some(e) => Err(AppError::Database(e)),
            None => Ok(()),
        }
    }

    fn with_relations(&self, report: &Report) -> ReportWithRelations {
        ReportWithRelations {
            report: report.clone(),
            user: self.users.get(&report.user_id).cloned(),
            role: self.roles.get(&report.role_id).cloned(),
        }
    }
}

/// In-memory repository enforcing the same (user_id, day) uniqueness as the
/// database index
#[derive(Default)]
pub struct InMemoryReportRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryReportRepository {
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().reports.len()
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }

    /// Number of id lookups (find_by_id + delete)
    pub fn lookups(&self) -> usize {
        self.state.lock().unwrap().lookups
    }

    pub fn register_user(&self, id: Uuid, name: &str, email: Option<&str>) {
        self.state.lock().unwrap().users.insert(
            id,
            UserRef {
                id,
                name: name.to_string(),
                email: email.map(String::from),
            },
        );
    }

    pub fn register_role(&self, id: Uuid, name: &str) {
        self.state.lock().unwrap().roles.insert(
            id,
            RoleRef {
                id,
                name: name.to_string(),
            },
        );
    }

    /// Make the (user_id, day) pre-check miss, as a concurrent writer would
    pub fn hide_from_lookup(&self, hide: bool) {
        self.state.lock().unwrap().hide_from_lookup = hide;
    }

    /// Fail the next repository call with `err`
    pub fn fail_with(&self, err: sqlx::Error) {
        self.state.lock().unwrap().next_error = Some(err);
    }

    /// Bump updated_at on a report
    pub fn touch(&self, id: Uuid) {
        let mut state = self.state.lock().unwrap();
        let now = state.now();
        if let Some(report) = state.reports.iter_mut().find(|r| r.id == id) {
            report.updated_at = now;
        }
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_by_user_and_day(&self, user_id: Uuid, day: NaiveDate) -> Result<Option<Report>> {
        let mut state = self.state.lock().unwrap();
        state.take_error()?;
        if state.hide_from_lookup {
            return Ok(None);
        }
        Ok(state
            .reports
            .iter()
            .find(|r| r.user_id == user_id && r.day == day)
            .cloned())
    }

    async fn find_many(&self, order: Option<ReportOrder>) -> Result<Vec<ReportWithRelations>> {
        let mut state = self.state.lock().unwrap();
        state.take_error()?;
        let order = order.unwrap_or_default();

        let mut reports: Vec<&Report> = state.reports.iter().collect();
        let key = |r: &Report| match order {
            ReportOrder::CreatedAt => r.created_at,
            ReportOrder::UpdatedAt => r.updated_at,
        };
        reports.sort_by(|a, b| key(b).cmp(&key(a)).then(a.id.cmp(&b.id)));

        Ok(reports.into_iter().map(|r| state.with_relations(r)).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ReportWithRelations>> {
        let mut state = self.state.lock().unwrap();
        state.take_error()?;
        state.lookups += 1;
        Ok(state
            .reports
            .iter()
            .find(|r| r.id == id)
            .map(|r| state.with_relations(r)))
    }

    async fn insert(&self, data: &CreateReport) -> Result<Report> {
        let mut state = self.state.lock().unwrap();
        state.take_error()?;
        state.insert_calls += 1;

        if state
            .reports
            .iter()
            .any(|r| r.user_id == data.user_id && r.day == data.day)
        {
            return Err(AppError::Conflict(DUPLICATE_REPORT_MESSAGE.to_string()));
        }

        let now = state.now();
        let report = Report {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            role: data.role.clone(),
            day: data.day,
            kpi_scores: Json(data.kpi_scores.clone()),
            attendance: data.attendance.clone(),
            time_in: data.time_in.clone(),
            time_out: data.time_out.clone(),
            notes: data.notes.clone(),
            user_id: data.user_id,
            role_id: data.role_id,
            created_at: now,
            updated_at: now,
        };
        state.reports.push(report.clone());
        Ok(report)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Report>> {
        let mut state = self.state.lock().unwrap();
        state.take_error()?;
        state.lookups += 1;
        let position = state.reports.iter().position(|r| r.id == id);
        Ok(position.map(|i| state.reports.remove(i)))
    }
}

/// Records every invalidated path in call order
#[derive(Default)]
pub struct RecordingCacheInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingCacheInvalidator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl CacheInvalidator for RecordingCacheInvalidator {
    fn invalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Report routes over in-memory doubles
pub fn report_test_app() -> (
    Router,
    Arc<InMemoryReportRepository>,
    Arc<RecordingCacheInvalidator>,
) {
    let repository = Arc::new(InMemoryReportRepository::default());
    let cache = Arc::new(RecordingCacheInvalidator::default());
    let service = Arc::new(ReportService::new(repository.clone(), cache.clone()));
    (report_routes::routes(service), repository, cache)
}
