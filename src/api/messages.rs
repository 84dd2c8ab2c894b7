use crate::{
    database::JobBoardStore,
    models::{ApiResponse, InsertOutcome, Message, MessageResponse, NewMessageRequest},
    utils::AppError,
};
use actix_web::{web, HttpResponse};

/// POST /send-messages
#[utoipa::path(
    post,
    path = "/send-messages",
    tag = "Conversations",
    responses((status = 200, description = "`data` holds the insert outcome", body = InsertOutcome))
)]
pub async fn send_message(
    db: web::Data<dyn JobBoardStore>,
    body: web::Json<NewMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    log::info!("✉️  POST /send-messages - from {:?}", request.sender_id);

    let message = Message::from_request(request)?;

    let outcome = db.insert_message(message).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
}

/// GET /conversation/{id} - Messages whose `senderId` equals the path value
#[utoipa::path(
    get,
    path = "/conversation/{id}",
    tag = "Conversations",
    params(("id" = String, Path, description = "Sender id, compared as a plain string")),
    responses((status = 200, description = "`data` holds the messages"))
)]
pub async fn get_conversation(
    db: web::Data<dyn JobBoardStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::debug!("GET /conversation/{}", id);

    let messages: Vec<MessageResponse> = db
        .find_messages_by_sender(&id)
        .await?
        .into_iter()
        .map(MessageResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(messages)))
}
