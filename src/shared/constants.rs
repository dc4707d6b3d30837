// =============================================================================
// CACHE PATHS
// =============================================================================

/// Landing page, shows the latest reports
pub const ROOT_PATH: &str = "/";

/// Reports listing page
pub const REPORTS_PATH: &str = "/reports";

// =============================================================================
// MESSAGES
// =============================================================================

pub const DUPLICATE_REPORT_MESSAGE: &str = "A report for this user on this day already exists.";

/// Name of the unique index on form_data (user_id, day)
pub const REPORT_USER_DAY_CONSTRAINT: &str = "form_data_user_id_day_key";
