use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobbox API",
        version = "1.0.0",
        description = "Job board API over MongoDB: users, job postings, applications, notifications and messages.\n\nEvery JSON response uses the `{ status, data }` envelope; failures return `{ status: false, error }` with a matching HTTP status."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::list_users,

        // Jobs
        crate::api::jobs::create_job,
        crate::api::jobs::list_jobs,
        crate::api::jobs::jobs_by_author,
        crate::api::jobs::applied_jobs,
        crate::api::jobs::get_job,
        crate::api::jobs::delete_job,

        // Applications
        crate::api::jobs::apply,
        crate::api::jobs::cancel_apply,
        crate::api::jobs::post_query,
        crate::api::jobs::reply,

        // Notifications
        crate::api::notifications::list_notifications,
        crate::api::notifications::mark_seen,

        // Conversations
        crate::api::messages::send_message,
        crate::api::messages::get_conversation,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InsertOutcome,
            crate::models::UpdateOutcome,
            crate::models::DeleteOutcome,
            crate::models::NewUserRequest,
            crate::models::NewJobRequest,
            crate::models::ApplyRequest,
            crate::models::NewMessageRequest,
            crate::models::CancelApplyRequest,
            crate::models::QueryRequest,
            crate::models::ReplyRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database connectivity."),
        (name = "Users", description = "User profiles."),
        (name = "Jobs", description = "Job postings."),
        (name = "Applications", description = "Applying, cancelling, questions and replies on a job."),
        (name = "Notifications", description = "Application notifications for job authors."),
        (name = "Conversations", description = "Plain message storage."),
    )
)]
pub struct ApiDoc;
