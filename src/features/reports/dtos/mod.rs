mod report_dto;

pub use report_dto::{
    CreateReportDto, KpiScoreDto, ListReportsQuery, ReportDetailResponseDto, ReportListDto,
    ReportResponseDto, ReportSummaryDto, RoleRefDto, UserRefDto,
};
