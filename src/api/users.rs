use crate::{
    database::JobBoardStore,
    models::{ApiResponse, InsertOutcome, NewUserRequest, User, UserResponse},
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// POST /user - Stores a new user profile
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "`data` holds the insert outcome", body = InsertOutcome),
        (status = 400, description = "Missing or empty email")
    )
)]
pub async fn create_user(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<NewUserRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    log::info!("📝 POST /user - Creating user {}", request.email);

    let user = User::from_request(request)?;

    let outcome = db.insert_user(user).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// GET /user/{email}
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "`data` holds the user"),
        (status = 404, description = "No user with that email")
    )
)]
pub async fn get_user(
    db: web::Data<dyn JobBoardStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match db.find_user_by_email(&email).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse::from(user)))),
        None => Err(AppError::NotFound(format!("user {}", email))),
    }
}

/// GET /messages - Lists every user (route name kept for existing clients)
#[utoipa::path(
    get,
    path = "/messages",
    tag = "Users",
    responses((status = 200, description = "`data` holds all users"))
)]
pub async fn list_users(db: web::Data<dyn JobBoardStore>) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = db
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}
