use crate::models::{document_to_json, json_to_document};
use crate::utils::AppError;
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document in the "user" collection.
///
/// Only `email` is known to this service; every other profile field is kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    pub fn from_request(request: NewUserRequest) -> Result<Self, AppError> {
        if request.email.trim().is_empty() {
            return Err(AppError::InvalidRequest("email must not be empty".to_string()));
        }

        Ok(User {
            id: None,
            email: Some(request.email),
            profile: json_to_document(&request.profile, USER_RESERVED_FIELDS)?,
        })
    }
}

/// Keys of a user document that free-form profile fields may not set.
pub const USER_RESERVED_FIELDS: &[&str] = &["_id"];

/// Body of `POST /user`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewUserRequest {
    pub email: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub profile: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            profile: document_to_json(user.profile),
        }
    }
}
