use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateReportDto, ReportDetailResponseDto, ReportListDto, ReportResponseDto, ReportSummaryDto,
};
use crate::features::reports::models::{CreateReport, ReportOrder};
use crate::features::reports::repositories::ReportRepository;
use crate::modules::revalidation::CacheInvalidator;
use crate::shared::constants::{DUPLICATE_REPORT_MESSAGE, REPORTS_PATH, ROOT_PATH};

/// Service for daily report operations
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    cache: Arc<dyn CacheInvalidator>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepository>, cache: Arc<dyn CacheInvalidator>) -> Self {
        Self { repository, cache }
    }

    /// Parse a caller-supplied report id
    pub fn parse_id(raw: &str) -> Result<Uuid> {
        Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::Validation(format!("Invalid report id: '{}'", raw)))
    }

    /// Submit a report. One report per user per day; a second submission is
    /// a conflict and nothing is written.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let data = CreateReport::from(dto);

        if let Some(existing) = self
            .repository
            .find_by_user_and_day(data.user_id, data.day)
            .await?
        {
            tracing::warn!(
                "Report already exists: id={}, user={}, day={}",
                existing.id,
                data.user_id,
                data.day
            );
            return Err(AppError::Conflict(DUPLICATE_REPORT_MESSAGE.to_string()));
        }

        let report = self.repository.insert(&data).await?;

        tracing::info!(
            "Report created: id={}, user={}, day={}",
            report.id,
            report.user_id,
            report.day
        );

        self.cache.invalidate(ROOT_PATH);
        self.cache.invalidate(REPORTS_PATH);

        Ok(report.into())
    }

    /// Reports in display shape for the listing page
    pub async fn list_all(&self) -> Result<ReportListDto> {
        let reports = self.repository.find_many(None).await?;

        Ok(ReportListDto {
            reports: reports
                .into_iter()
                .map(|r| ReportSummaryDto::from(r.report))
                .collect(),
        })
    }

    /// Raw reports with user and role, newest first by `order`
    pub async fn list_filtered(&self, order: ReportOrder) -> Result<Vec<ReportDetailResponseDto>> {
        let reports = self.repository.find_many(Some(order)).await?;
        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_one(&self, raw_id: &str) -> Result<ReportDetailResponseDto> {
        let id = Self::parse_id(raw_id)?;

        self.repository
            .find_by_id(id)
            .await?
            .map(|r| r.into())
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Delete a report, returning what was removed
    pub async fn delete(&self, raw_id: &str) -> Result<ReportResponseDto> {
        let id = Self::parse_id(raw_id)?;

        let report = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Report deleted: id={}, user={}", report.id, report.user_id);

        self.cache.invalidate(REPORTS_PATH);

        Ok(report.into())
    }
}
