use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating clock times on a report (24h, zero padded)
    /// - Valid: "08:00", "23:59", "00:00"
    /// - Invalid: "8:00", "24:00", "12:60", "08:00:00"
    pub static ref TIME_OF_DAY_REGEX: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Every metric in a kpi score map needs a non-blank name
pub fn validate_kpi_scores(scores: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    if scores.keys().any(|name| name.trim().is_empty()) {
        let mut err = ValidationError::new("kpi_metric_name");
        err.message = Some("KPI metric names must not be empty".into());
        return Err(err);
    }
    Ok(())
}
