use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// Note: No authentication is applied here; callers sit behind the
/// frontend's own session handling.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/records", get(handlers::list_report_records))
        .route(
            "/api/reports/{id}",
            get(handlers::get_report).delete(handlers::delete_report),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::shared::constants::{REPORTS_PATH, ROOT_PATH};
    use crate::shared::test_helpers::report_test_app;

    fn payload(user_id: Uuid, day: &str) -> Value {
        json!({
            "name": "Ada Lovelace",
            "role": "Agent",
            "day": day,
            "kpiScores": { "Quality": "8", "Speed": "7" },
            "attendance": "present",
            "timeIn": "08:00",
            "timeOut": "17:00",
            "notes": "Quiet day",
            "userId": user_id,
            "roleId": Uuid::new_v4()
        })
    }

    #[tokio::test]
    async fn test_create_then_duplicate_then_list() {
        let (app, repository, cache) = report_test_app();
        let server = TestServer::new(app).unwrap();
        let user_id = Uuid::new_v4();

        let created = server
            .post("/api/reports")
            .json(&payload(user_id, "2024-01-01"))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], 201);
        assert_eq!(body["data"]["name"], "Ada Lovelace");
        assert_eq!(body["data"]["day"], "2024-01-01");
        assert_eq!(body["data"]["kpiScores"]["Quality"], "8");
        assert_eq!(cache.paths(), vec![ROOT_PATH, REPORTS_PATH]);

        let duplicate = server
            .post("/api/reports")
            .json(&payload(user_id, "2024-01-01"))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
        let body: Value = duplicate.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 409);
        assert!(body["data"].is_null());
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("already exists"));
        assert_eq!(repository.len(), 1);

        let list = server.get("/api/reports").await;
        list.assert_status_ok();
        let body: Value = list.json();
        assert_eq!(body["meta"]["total"], 1);
        let report = &body["data"]["reports"][0];
        assert_eq!(report["user"], "Ada Lovelace");
        assert_eq!(report["role"], "Agent");
        assert_eq!(
            report["kpiScores"],
            json!([
                { "name": "Quality", "score": "8" },
                { "name": "Speed", "score": "7" }
            ])
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payloads() {
        let (app, repository, _cache) = report_test_app();
        let server = TestServer::new(app).unwrap();

        let mut bad_time = payload(Uuid::new_v4(), "2024-01-01");
        bad_time["timeOut"] = json!("5pm");
        server
            .post("/api/reports")
            .json(&bad_time)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let mut missing_user = payload(Uuid::new_v4(), "2024-01-01");
        missing_user.as_object_mut().unwrap().remove("userId");
        server
            .post("/api/reports")
            .json(&missing_user)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(repository.len(), 0);
        assert_eq!(repository.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_records_order_by() {
        let (app, _repository, _cache) = report_test_app();
        let server = TestServer::new(app).unwrap();
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            server
                .post("/api/reports")
                .json(&payload(Uuid::new_v4(), day))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let default: Value = server.get("/api/reports/records").await.json();
        let by_created: Value = server
            .get("/api/reports/records")
            .add_query_param("orderBy", "createdAt")
            .await
            .json();
        assert_eq!(default["data"], by_created["data"]);
        assert_eq!(default["meta"]["total"], 3);

        let by_updated: Value = server
            .get("/api/reports/records")
            .add_query_param("orderBy", "updatedAt")
            .await
            .json();
        let stamps: Vec<&str> = by_updated["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["updatedAt"].as_str().unwrap())
            .collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);

        server
            .get("/api/reports/records")
            .add_query_param("orderBy", "name")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_and_delete_by_id() {
        let (app, _repository, cache) = report_test_app();
        let server = TestServer::new(app).unwrap();

        let created: Value = server
            .post("/api/reports")
            .json(&payload(Uuid::new_v4(), "2024-01-01"))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let found = server.get(&format!("/api/reports/{}", id)).await;
        found.assert_status_ok();
        let body: Value = found.json();
        assert_eq!(body["data"]["id"], id.as_str());

        let before = cache.paths().len();
        server
            .delete(&format!("/api/reports/{}", id))
            .await
            .assert_status_ok();
        assert_eq!(&cache.paths()[before..], &[REPORTS_PATH.to_string()]);

        server
            .get(&format!("/api/reports/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/reports/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let (app, repository, _cache) = report_test_app();
        let server = TestServer::new(app).unwrap();

        let resp = server.get("/api/reports/not-a-uuid").await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = resp.json();
        assert_eq!(body["status"], 400);

        server
            .delete("/api/reports/123")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(repository.lookups(), 0);
    }
}
