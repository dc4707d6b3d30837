use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::reports::dtos::{
    CreateReportDto, ListReportsQuery, ReportDetailResponseDto, ReportListDto, ReportResponseDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a daily report
///
/// Only one report per user per day is accepted.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A report for this user on this day already exists")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(Some(report), Some("Report created".to_string()), None)
                .with_status(StatusCode::CREATED),
        ),
    ))
}

/// List reports for the reports page
///
/// KPI scores are returned as name/score pairs.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Reports in display shape", body = ApiResponse<ReportListDto>),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportListDto>>> {
    let list = service.list_all().await?;
    let meta = Meta::total(list.reports.len());
    Ok(Json(ApiResponse::success(Some(list), None, Some(meta))))
}

/// List raw report records with user and role, newest first
#[utoipa::path(
    get,
    path = "/api/reports/records",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Report records", body = ApiResponse<Vec<ReportDetailResponseDto>>),
        (status = 400, description = "Unknown orderBy value")
    ),
    tag = "reports"
)]
pub async fn list_report_records(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportDetailResponseDto>>>> {
    let records = service
        .list_filtered(query.order_by.unwrap_or_default())
        .await?;
    let meta = Meta::total(records.len());
    Ok(Json(ApiResponse::success(Some(records), None, Some(meta))))
}

/// Get a report by ID with user and role
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID (UUID)")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailResponseDto>),
        (status = 400, description = "Malformed report ID"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>> {
    let report = service.get_one(&id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID (UUID)")
    ),
    responses(
        (status = 200, description = "Deleted report", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Malformed report ID"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report deleted".to_string()),
        None,
    )))
}
