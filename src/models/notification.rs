use crate::models::{document_to_json, json_to_document, ApplyRequest};
use crate::utils::AppError;
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document in the "notifications" collection, created for every successful application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default)]
    pub is_seen: bool,
    #[serde(flatten)]
    pub payload: Document,
}

/// Keys of a notification document that copied apply fields may not set.
pub const NOTIFICATION_RESERVED_FIELDS: &[&str] =
    &["_id", "isSeen", "userId", "jobId", "email", "authorEmail"];

impl Notification {
    /// Copy of the apply payload, unseen.
    pub fn from_application(request: &ApplyRequest) -> Result<Self, AppError> {
        Ok(Notification {
            id: None,
            user_id: Some(request.user_id.clone()),
            job_id: Some(request.job_id.clone()),
            email: Some(request.email.clone()),
            author_email: request.author_email.clone(),
            is_seen: false,
            payload: json_to_document(&request.extra, NOTIFICATION_RESERVED_FIELDS)?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    pub is_seen: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        NotificationResponse {
            id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: n.user_id,
            job_id: n.job_id,
            email: n.email,
            author_email: n.author_email,
            is_seen: n.is_seen,
            payload: document_to_json(n.payload),
        }
    }
}
