pub mod envelope;
pub mod job;
pub mod message;
pub mod notification;
pub mod outcome;
pub mod user;

pub use envelope::*;
pub use job::*;
pub use message::*;
pub use notification::*;
pub use outcome::*;
pub use user::*;

use crate::utils::AppError;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Converts the free-form part of a stored document into JSON (relaxed extended JSON).
pub fn document_to_json(doc: Document) -> Map<String, Value> {
    match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Converts free-form request fields into a BSON document for storage.
///
/// `reserved` names the keys the typed record owns; a free-form value under one
/// of them would make the stored document unreadable, so it is rejected.
pub fn json_to_document(map: &Map<String, Value>, reserved: &[&str]) -> Result<Document, AppError> {
    if let Some(key) = reserved.iter().find(|key| map.contains_key(**key)) {
        return Err(AppError::InvalidRequest(format!("field '{}' cannot be set", key)));
    }
    Ok(mongodb::bson::to_document(map)?)
}
