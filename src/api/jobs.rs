use crate::{
    api::parse_object_id,
    database::JobBoardStore,
    models::{
        Applicant, ApiResponse, ApplyRequest, CancelApplyRequest,
        DeleteOutcome, InsertOutcome, Job, JobQuery, JobResponse, NewJobRequest, Notification,
        QueryRequest, ReplyRequest, UpdateOutcome,
    },
    utils::AppError,
};
use actix_web::{web, HttpResponse};

fn job_list(jobs: Vec<Job>) -> Vec<JobResponse> {
    jobs.into_iter().map(JobResponse::from).collect()
}

/// POST /job - Publishes a job posting
#[utoipa::path(
    post,
    path = "/job",
    tag = "Jobs",
    responses((status = 200, description = "`data` holds the insert outcome", body = InsertOutcome))
)]
pub async fn create_job(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<NewJobRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    log::info!(
        "📝 POST /job - Creating job {:?} by {:?}",
        request.title,
        request.author_email
    );

    let job = Job::from_request(request)?;

    let outcome = db.insert_job(job).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// GET /jobs - Every job, unpaginated
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Jobs",
    responses((status = 200, description = "`data` holds all jobs"))
)]
pub async fn list_jobs(db: web::Data<dyn JobBoardStore>) -> Result<HttpResponse, AppError> {
    let jobs = db.list_jobs().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(job_list(jobs))))
}

/// GET /postJob/{email} - Jobs published by an author
#[utoipa::path(
    get,
    path = "/postJob/{email}",
    tag = "Jobs",
    params(("email" = String, Path, description = "Author email")),
    responses((status = 200, description = "`data` holds the author's jobs"))
)]
pub async fn jobs_by_author(
    db: web::Data<dyn JobBoardStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let jobs = db.find_jobs_by_author(&email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(job_list(jobs))))
}

/// GET /applied-jobs/{email} - Jobs an applicant applied to, without the applicant list
#[utoipa::path(
    get,
    path = "/applied-jobs/{email}",
    tag = "Jobs",
    params(("email" = String, Path, description = "Applicant email")),
    responses((status = 200, description = "`data` holds the jobs, `applicants` omitted"))
)]
pub async fn applied_jobs(
    db: web::Data<dyn JobBoardStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let jobs = db.find_jobs_applied_by(&email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(job_list(jobs))))
}

/// GET /job/{id} - `data` is null when the job does not exist
#[utoipa::path(
    get,
    path = "/job/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job object id")),
    responses(
        (status = 200, description = "`data` holds the job or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_job(
    db: web::Data<dyn JobBoardStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let job_id = parse_object_id(&id, "id")?;
    let job = db.find_job(job_id).await?.map(JobResponse::from);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(job)))
}

/// DELETE /job/{id}
#[utoipa::path(
    delete,
    path = "/job/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job object id")),
    responses(
        (status = 200, description = "`data` holds the delete outcome", body = DeleteOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_job(
    db: web::Data<dyn JobBoardStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let job_id = parse_object_id(&id, "id")?;

    log::info!("🗑️  DELETE /job/{}", job_id);

    let outcome = db.delete_job(job_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// PATCH /apply - Adds the applicant to the job and notifies the author
#[utoipa::path(
    patch,
    path = "/apply",
    tag = "Applications",
    responses(
        (status = 200, description = "`data` holds the job update outcome", body = UpdateOutcome),
        (status = 404, description = "Job not found"),
        (status = 500, description = "Applicant recorded but notification not stored")
    )
)]
pub async fn apply(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<ApplyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let job_id = parse_object_id(&request.job_id, "jobId")?;
    let user_id = parse_object_id(&request.user_id, "userId")?;
    let notification = Notification::from_application(&request)?;

    log::info!("📝 PATCH /apply - {} applying to job {}", request.email, job_id);

    let applicant = Applicant {
        id: user_id,
        email: Some(request.email.clone()),
    };
    let outcome = db.push_applicant(job_id, applicant).await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("job {}", job_id)));
    }

    if let Err(e) = db.insert_notification(notification).await {
        return Err(AppError::DatabaseError(format!(
            "applicant {} was added to job {} but the notification was not stored ({})",
            request.email, job_id, e
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// PATCH /cancel-apply - Removes every applicant entry carrying the email
#[utoipa::path(
    patch,
    path = "/cancel-apply",
    tag = "Applications",
    request_body = CancelApplyRequest,
    responses(
        (status = 200, description = "`data` holds the job update outcome", body = UpdateOutcome),
        (status = 404, description = "Job not found")
    )
)]
pub async fn cancel_apply(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<CancelApplyRequest>,
) -> Result<HttpResponse, AppError> {
    let job_id = parse_object_id(&body.job_id, "jobId")?;

    log::info!(
        "🔧 PATCH /cancel-apply - {} (user {:?}) leaving job {}",
        body.email,
        body.user_id,
        job_id
    );

    let outcome = db.pull_applicants_by_email(job_id, &body.email).await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("job {}", job_id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// PATCH /query - Posts a question on a job
#[utoipa::path(
    patch,
    path = "/query",
    tag = "Applications",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "`data` holds the job update outcome", body = UpdateOutcome),
        (status = 404, description = "Job not found")
    )
)]
pub async fn post_query(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<QueryRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let job_id = parse_object_id(&request.job_id, "jobId")?;
    let user_id = parse_object_id(&request.user_id, "userId")?;

    log::info!("❓ PATCH /query - {} asking on job {}", request.email, job_id);

    let query = JobQuery {
        id: user_id,
        email: Some(request.email),
        user_name: Some(request.user_name),
        question: Some(request.question),
        reply: Vec::new(),
    };
    let outcome = db.push_query(job_id, query).await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("job {}", job_id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// PATCH /reply - Answers the question(s) a user asked
#[utoipa::path(
    patch,
    path = "/reply",
    tag = "Applications",
    request_body = ReplyRequest,
    responses(
        (status = 200, description = "`data` holds the job update outcome", body = UpdateOutcome),
        (status = 404, description = "No query from that user")
    )
)]
pub async fn reply(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<ReplyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let user_id = parse_object_id(&request.user_id, "userId")?;
    let job_id = request
        .job_id
        .as_deref()
        .map(|raw| parse_object_id(raw, "jobId"))
        .transpose()?;

    match job_id {
        Some(job_id) => log::info!("💬 PATCH /reply - user {} on job {}", user_id, job_id),
        None => log::warn!(
            "⚠️  PATCH /reply without jobId - replying on the first job with a query from user {}",
            user_id
        ),
    }

    let outcome = db.push_reply(user_id, job_id, &request.reply).await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("query from user {}", user_id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}
