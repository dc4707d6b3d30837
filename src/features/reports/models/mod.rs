mod report;

pub use report::{
    CreateReport, KpiScores, Report, ReportOrder, ReportWithRelations, RoleRef, UserRef,
};
