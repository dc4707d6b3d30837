use utoipa::{Modify, OpenApi};

use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers, models};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::list_report_records,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::delete_report,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            models::ReportOrder,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportDetailResponseDto,
            reports_dtos::ReportSummaryDto,
            reports_dtos::ReportListDto,
            reports_dtos::KpiScoreDto,
            reports_dtos::UserRefDto,
            reports_dtos::RoleRefDto,
        )
    ),
    tags(
        (name = "reports", description = "Daily KPI reports"),
    ),
    info(
        title = "KPI Report API",
        version = "0.1.0",
        description = "Daily performance report API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
