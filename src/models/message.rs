use crate::models::{document_to_json, json_to_document};
use crate::utils::AppError;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys of a message document that free-form content may not set.
pub const MESSAGE_RESERVED_FIELDS: &[&str] = &["_id"];

/// Document in the "conversation" collection.
///
/// `senderId` is stored as sent; conversation lookups only match string values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Bson>,
    #[serde(flatten)]
    pub content: Document,
}

impl Message {
    pub fn from_request(request: NewMessageRequest) -> Result<Self, AppError> {
        Ok(Message {
            id: None,
            sender_id: request
                .sender_id
                .map(|value| mongodb::bson::to_bson(&value))
                .transpose()?,
            content: json_to_document(&request.content, MESSAGE_RESERVED_FIELDS)?,
        })
    }

    pub fn is_sent_by(&self, sender_id: &str) -> bool {
        matches!(&self.sender_id, Some(Bson::String(id)) if id == sender_id)
    }
}

/// Body of `POST /send-messages`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageRequest {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub sender_id: Option<Value>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub content: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Value>,
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        MessageResponse {
            id: m.id.map(|id| id.to_hex()).unwrap_or_default(),
            sender_id: m.sender_id.map(Bson::into_relaxed_extjson),
            content: document_to_json(m.content),
        }
    }
}
