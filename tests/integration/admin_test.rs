//! Integration tests for the staff reservation endpoints.

use axum::http::StatusCode;
use serde_json::json;

use tablehub_entity::user::UserRole;

use crate::helpers::{TestApp, booking_body, seating};

#[tokio::test]
async fn test_admin_routes_require_staff() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let staff = app.user(UserRole::Staff);
    let admin = app.user(UserRole::Admin);

    let (status, body) = app.get("/api/admin/reservations", Some(&guest.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = app.get("/api/admin/reservations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/admin/reservations", Some(&staff.token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get("/api/admin/reservations/stats/summary", Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_list_filters_stats_and_purge() {
    let app = TestApp::new();
    let anna = app.user(UserRole::Customer);
    let boris = app.user(UserRole::Customer);
    let staff = app.user(UserRole::Staff);

    for (guest, restaurant, table) in [(&anna, "r1", 1), (&anna, "r2", 2), (&boris, "r1", 3)] {
        let (status, _) = app
            .post(
                "/api/reservations",
                Some(&guest.token),
                booking_body(restaurant, table, &seating(9, 19, 0)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app.get("/api/admin/reservations", Some(&staff.token)).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 50);

    let (_, body) = app
        .get("/api/admin/reservations?restaurantId=r1", Some(&staff.token))
        .await;
    assert_eq!(body["total"], 2);

    let (_, body) = app
        .get(
            &format!("/api/admin/reservations?userId={}", anna.id),
            Some(&staff.token),
        )
        .await;
    assert_eq!(body["total"], 2);

    let (_, body) = app
        .get("/api/admin/reservations?status=all&limit=1", Some(&staff.token))
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 3);

    let (status, _) = app
        .get("/api/admin/reservations?status=seated", Some(&staff.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .get("/api/admin/reservations?userId=nobody", Some(&staff.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get(
            &format!("/api/admin/reservations?userId={}", boris.id),
            Some(&staff.token),
        )
        .await;
    let boris_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .delete(
            &format!("/api/admin/reservations/{boris_id}"),
            Some(&staff.token),
            Some(json!({ "reason": "Restaurant closed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get("/api/admin/reservations/stats/summary", Some(&staff.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["pending"], 2);
    assert_eq!(body["data"]["cancelled"], 1);
    assert_eq!(body["data"]["recent"], 3);

    let (status, _) = app
        .delete(
            &format!("/api/admin/reservations/{boris_id}/purge"),
            Some(&staff.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(
            &format!("/api/admin/reservations/{boris_id}"),
            Some(&staff.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cancel_rejects_malformed_body() {
    let app = TestApp::new();
    let guest = app.user(UserRole::Customer);
    let staff = app.user(UserRole::Staff);

    let (_, body) = app
        .post(
            "/api/reservations",
            Some(&guest.token),
            booking_body("r1", 8, &seating(5, 18, 30)),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send_raw(
            "DELETE",
            &format!("/api/admin/reservations/{id}"),
            Some(&staff.token),
            "application/json",
            "not json",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
