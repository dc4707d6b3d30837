//! Daily KPI reports.
//!
//! One report per user per day, holding a score for each KPI metric plus
//! attendance and clock times. Writes mark the cached landing and reports
//! pages stale through the revalidation module.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reports` | Submit a report (409 on duplicate user/day) |
//! | GET | `/api/reports` | Reports in display shape |
//! | GET | `/api/reports/records?orderBy=createdAt\|updatedAt` | Raw records with user and role |
//! | GET | `/api/reports/{id}` | Single report with user and role |
//! | DELETE | `/api/reports/{id}` | Delete a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgReportRepository;
pub use services::ReportService;
