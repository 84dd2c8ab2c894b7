pub mod health;
pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod swagger;
pub mod users;

use crate::utils::{AppError, AppResult};
use actix_web::web;
use mongodb::bson::oid::ObjectId;

/// Registers every route of the service.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .route("/", web::get().to(health::index))
    .route("/health", web::get().to(health::health_check))
    // Users
    .route("/user", web::post().to(users::create_user))
    .route("/user/{email}", web::get().to(users::get_user))
    .route("/messages", web::get().to(users::list_users))
    // Jobs
    .route("/job", web::post().to(jobs::create_job))
    .route("/job/{id}", web::get().to(jobs::get_job))
    .route("/job/{id}", web::delete().to(jobs::delete_job))
    .route("/jobs", web::get().to(jobs::list_jobs))
    .route("/postJob/{email}", web::get().to(jobs::jobs_by_author))
    .route("/applied-jobs/{email}", web::get().to(jobs::applied_jobs))
    .route("/apply", web::patch().to(jobs::apply))
    .route("/cancel-apply", web::patch().to(jobs::cancel_apply))
    .route("/query", web::patch().to(jobs::post_query))
    .route("/reply", web::patch().to(jobs::reply))
    // Notifications
    .route("/notifications/{email}", web::get().to(notifications::list_notifications))
    .route("/notifications/{id}", web::patch().to(notifications::mark_seen))
    // Conversations
    .route("/send-messages", web::post().to(messages::send_message))
    .route("/conversation/{id}", web::get().to(messages::get_conversation));
}

/// Parses a 24-hex object id coming from a path or body field.
pub(crate) fn parse_object_id(raw: &str, field: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidRequest(format!("{} '{}' is not a valid object id", field, raw)))
}

/// Builds a test service backed by the given in-memory store.
#[cfg(test)]
macro_rules! init_app {
    ($store:expr) => {{
        let store: std::sync::Arc<dyn crate::database::JobBoardStore> = $store.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store))
                .configure(crate::api::routes),
        )
        .await
    }};
}

#[cfg(test)]
pub(crate) use init_app;
