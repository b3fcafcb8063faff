mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;

use common::{default_app, request};

use obralink_backend::model::notification::{Notification, NotificationType, RelatedType};
use obralink_backend::repository::notification_repo::NotificationRepository;

async fn seed(app: &common::TestApp, user_id: &str, count: usize) {
    for i in 0..count {
        app.notification_repo
            .create(Notification {
                id: None,
                user_id: user_id.to_string(),
                kind: NotificationType::QuoteReceived,
                title: "New quote received".to_string(),
                message: format!("Quote number {i}"),
                related_id: Some(ObjectId::new()),
                related_type: Some(RelatedType::Quote),
                read_status: false,
                created_at: None,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_list_is_newest_first_and_capped_at_50() {
    let app = default_app();
    seed(&app, "user1", 55).await;

    let (status, body) = request(&app.router, "GET", "/notifications/user1", None).await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body.as_array().unwrap();
    assert_eq!(notifications.len(), 50);
    assert_eq!(notifications[0]["message"], "Quote number 54");
    assert_eq!(notifications[49]["message"], "Quote number 5");
}

#[tokio::test]
async fn test_list_only_returns_own_notifications() {
    let app = default_app();
    seed(&app, "user1", 2).await;
    seed(&app, "user2", 3).await;

    let (_, body) = request(&app.router, "GET", "/notifications/user1", None).await;
    let notifications = body.as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n["user_id"] == "user1"));
}

#[tokio::test]
async fn test_unread_count_and_mark_read() {
    let app = default_app();
    seed(&app, "user1", 3).await;

    let (status, body) =
        request(&app.router, "GET", "/notifications/user1/unread-count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let (_, list) = request(&app.router, "GET", "/notifications/user1", None).await;
    let id = list[0]["notification_id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app.router,
        "PUT",
        &format!("/notifications/{id}/read"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = request(&app.router, "GET", "/notifications/user1/unread-count", None).await;
    assert_eq!(body["count"], 2);

    // Marking again is an idempotent no-op.
    let (status, _) = request(
        &app.router,
        "PUT",
        &format!("/notifications/{id}/read"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = request(&app.router, "GET", "/notifications/user1/unread-count", None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_mark_read_on_absent_notification_is_a_silent_no_op() {
    let app = default_app();
    let (status, body) = request(
        &app.router,
        "PUT",
        &format!("/notifications/{}/read", ObjectId::new().to_hex()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = request(&app.router, "PUT", "/notifications/not-an-id/read", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_all_read_is_idempotent() {
    let app = default_app();
    seed(&app, "user1", 4).await;
    seed(&app, "user2", 1).await;

    let (status, body) = request(&app.router, "PUT", "/notifications/user1/read-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = request(&app.router, "GET", "/notifications/user1/unread-count", None).await;
    assert_eq!(body["count"], 0);

    // Other users are untouched.
    let (_, body) = request(&app.router, "GET", "/notifications/user2/unread-count", None).await;
    assert_eq!(body["count"], 1);

    let (status, _) = request(&app.router, "PUT", "/notifications/user1/read-all", None).await;
    assert_eq!(status, StatusCode::OK);
}
