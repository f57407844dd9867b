//! Integration tests for the guest reservation endpoints.

use axum::http::StatusCode;
use serde_json::json;

use tablehub_entity::user::UserRole;

use crate::helpers::{TestApp, booking_body, seating};

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/reservations/my", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = app.get("/api/reservations/my", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_read_back() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let date = seating(3, 19, 0);

    let (status, body) = app
        .post("/api/reservations", Some(&guest.token), booking_body("r1", 5, &date))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let created = &body["data"];
    assert_eq!(created["status"], "pending");
    assert_eq!(created["tableNumber"], 5);
    assert_eq!(created["userId"], guest.id.to_string());
    let number = created["reservationNumber"].as_str().unwrap().to_string();
    assert!(number.starts_with("RES-"));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .get(&format!("/api/reservations/{id}"), Some(&guest.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reservationNumber"], number);

    let (status, body) = app
        .get(&format!("/api/reservations/number/{number}"), Some(&guest.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = app.get("/api/reservations/my", Some(&guest.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["data"][0]["id"], id);
}

#[tokio::test]
async fn test_overlapping_booking_is_a_conflict() {
    let app = TestApp::new();
    let first = app.user(UserRole::Customer);
    let second = app.user(UserRole::Customer);

    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&first.token),
            booking_body("r1", 3, &seating(4, 18, 0)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // exactly two hours later still overlaps
    let (status, body) = app
        .post(
            "/api/reservations",
            Some(&second.token),
            booking_body("r1", 3, &seating(4, 20, 0)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&second.token),
            booking_body("r1", 3, &seating(4, 20, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // another restaurant's table 3 is independent
    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&second.token),
            booking_body("r2", 3, &seating(4, 18, 0)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);

    let mut body = booking_body("r1", 1, &seating(2, 19, 0));
    body["guestCount"] = json!(0);
    let (status, body) = app.post("/api/reservations", Some(&guest.token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            booking_body("r1", 1, &seating(-2, 19, 0)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            booking_body("r1", 99, &seating(2, 19, 0)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            json!({ "restaurantId": "r1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_guests_reservations_are_not_found() {
    let app = TestApp::new();
    let owner = app.user(UserRole::Customer);
    let stranger = app.user(UserRole::Customer);

    let (_, body) = app
        .post(
            "/api/reservations",
            Some(&owner.token),
            booking_body("r1", 2, &seating(5, 19, 0)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/reservations/{id}");

    let (status, _) = app.get(&path, Some(&stranger.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put(&path, Some(&stranger.token), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&path, Some(&stranger.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get("/api/reservations/not-a-uuid", Some(&stranger.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_lifecycle_over_http() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let staff = app.user(UserRole::Staff);

    let (_, body) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            booking_body("r1", 4, &seating(6, 19, 0)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/reservations/{id}");

    let (status, body) = app
        .put(&path, Some(&guest.token), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, _) = app
        .put(
            &path,
            Some(&guest.token),
            json!({ "status": "confirmed", "contactName": "Boris" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put(&path, Some(&guest.token), json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .put(
            &format!("/api/admin/reservations/{id}"),
            Some(&staff.token),
            json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");

    let (status, body) = app.delete(&path, Some(&guest.token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "TERMINAL_STATE");
}

#[tokio::test]
async fn test_cancel_records_reason_and_frees_table() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let date = seating(7, 19, 30);

    let (_, body) = app
        .post("/api/reservations", Some(&guest.token), booking_body("r1", 6, &date))
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/reservations/{id}");

    let (status, body) = app
        .delete(&path, Some(&guest.token), Some(json!({ "reason": "Plans changed" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Reservation cancelled");

    let (_, body) = app.get(&path, Some(&guest.token)).await;
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(body["data"]["specialRequests"], "Plans changed");

    let (status, _) = app
        .post("/api/reservations", Some(&guest.token), booking_body("r1", 6, &date))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_available_tables_excludes_booked_ones() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let date = seating(8, 19, 0);

    let (status, _) = app
        .post("/api/reservations", Some(&guest.token), booking_body("r1", 1, &date))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .get(
            &format!("/api/reservations/available-tables/r1?date={}", seating(8, 20, 0)),
            Some(&guest.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let tables = body["data"].as_array().unwrap();
    assert_eq!(tables.len(), 19);
    assert!(tables.iter().all(|t| t["tableNumber"] != 1));
    assert!(tables.iter().all(|t| t["isAvailable"] == true));

    let (status, body) = app
        .get(
            &format!(
                "/api/reservations/available-tables/r1?date={}&guestCount=5",
                seating(8, 20, 0)
            ),
            Some(&guest.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["capacity"].as_i64().unwrap() >= 5)
    );

    let (status, _) = app
        .get("/api/reservations/available-tables/r1", Some(&guest.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_cancel_body_uses_error_envelope() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);

    let (_, body) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            booking_body("r1", 7, &seating(5, 21, 0)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/reservations/{id}");

    let (status, body) = app
        .send_raw("DELETE", &path, Some(&guest.token), "application/json", "{\"reason\":")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, body) = app.get(&path, Some(&guest.token)).await;
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_dates_beyond_supported_years_are_rejected() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);

    for date in ["+262142-12-31T23:30", "-262143-01-01T00:30"] {
        let (status, body) = app
            .post("/api/reservations", Some(&guest.token), booking_body("r1", 1, date))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    for date in ["%2B262142-12-31T23:30", "-262143-01-01T00:30"] {
        let (status, body) = app
            .get(
                &format!("/api/reservations/available-tables/r1?date={date}"),
                Some(&guest.token),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
