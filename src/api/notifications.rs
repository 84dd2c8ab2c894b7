use crate::{
    api::parse_object_id,
    database::JobBoardStore,
    models::{ApiResponse, NotificationResponse, UpdateOutcome},
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// GET /notifications/{email} - Notifications addressed to a job author
#[utoipa::path(
    get,
    path = "/notifications/{email}",
    tag = "Notifications",
    params(("email" = String, Path, description = "Job author email")),
    responses((status = 200, description = "`data` holds the notifications"))
)]
pub async fn list_notifications(
    db: web::Data<dyn JobBoardStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notifications: Vec<NotificationResponse> = db
        .find_notifications_by_author(&email)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(notifications)))
}

/// PATCH /notifications/{id} - Marks a notification as seen (upsert)
#[utoipa::path(
    patch,
    path = "/notifications/{id}",
    tag = "Notifications",
    params(("id" = String, Path, description = "Notification object id")),
    responses(
        (status = 200, description = "`data` holds the update outcome", body = UpdateOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn mark_seen(
    db: web::Data<dyn JobBoardStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notification_id = parse_object_id(&id, "id")?;

    log::info!("👁️  PATCH /notifications/{} - Marking as seen", notification_id);

    let outcome = db.mark_notification_seen(notification_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

#[cfg(test)]
mod tests {
    use crate::api::init_app;
    use crate::database::memory::MemoryStore;
    use actix_web::{http::StatusCode, test};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_mark_seen_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/job")
            .set_json(json!({ "title": "Engineer", "authorEmail": "a@x.com" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let job_id = created["data"]["insertedId"].as_str().unwrap().to_string();

        let req = test::TestRequest::patch()
            .uri("/apply")
            .set_json(json!({
                "userId": ObjectId::new().to_hex(), "jobId": job_id,
                "email": "b@x.com", "authorEmail": "a@x.com"
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/notifications/a@x.com").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        let id = list["data"][0]["_id"].as_str().unwrap().to_string();

        for expected_modified in [1, 0] {
            let req = test::TestRequest::patch()
                .uri(&format!("/notifications/{}", id))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["matchedCount"], 1);
            assert_eq!(body["data"]["modifiedCount"], expected_modified);

            let req = test::TestRequest::get().uri("/notifications/a@x.com").to_request();
            let list: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(list["data"][0]["isSeen"], true);
        }
    }

    #[actix_web::test]
    async fn test_mark_seen_upserts_unknown_id() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store);
        let id = ObjectId::new().to_hex();

        let req = test::TestRequest::patch()
            .uri(&format!("/notifications/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], true);
        assert_eq!(body["data"]["matchedCount"], 0);
        assert_eq!(body["data"]["upsertedId"], id);
        assert_eq!(store.notification_count(), 1);
    }

    #[actix_web::test]
    async fn test_notifications_filtered_by_author() {
        let store = Arc::new(MemoryStore::new());
        let app = init_app!(store);

        let req = test::TestRequest::get().uri("/notifications/nobody@x.com").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": true, "data": [] }));
    }
}
