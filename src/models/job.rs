use crate::models::{document_to_json, json_to_document};
use crate::utils::AppError;
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document in the "job" collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Absent until the first application; stripped from applied-jobs listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicants: Option<Vec<Applicant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<JobQuery>>,
    #[serde(flatten)]
    pub details: Document,
}

impl Job {
    /// New posting with no applicants or queries yet.
    pub fn from_request(request: NewJobRequest) -> Result<Self, AppError> {
        Ok(Job {
            id: None,
            title: request.title,
            author_email: request.author_email,
            applicants: None,
            queries: None,
            details: json_to_document(&request.details, JOB_RESERVED_FIELDS)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ObjectId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Question posted on a job. `id` is the asking user's id, not a query id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    pub id: ObjectId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub reply: Vec<String>,
}

/// Keys of a job document that free-form fields may not set.
pub const JOB_RESERVED_FIELDS: &[&str] = &["_id", "applicants", "queries"];

/// Body of `POST /job`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}

/// Body of `PATCH /apply`. Extra fields (e.g. job title) are copied into the notification.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub user_id: String,
    pub job_id: String,
    pub email: String,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Body of `PATCH /cancel-apply`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelApplyRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub job_id: String,
    pub email: String,
}

/// Body of `PATCH /query`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub user_id: String,
    pub job_id: String,
    pub email: String,
    pub question: String,
    pub user_name: String,
}

/// Body of `PATCH /reply`.
///
/// Without `jobId` the reply lands on the first job holding a query from `userId`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub user_id: String,
    pub reply: String,
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQueryResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub reply: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicants: Option<Vec<ApplicantResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<JobQueryResponse>>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl From<Applicant> for ApplicantResponse {
    fn from(a: Applicant) -> Self {
        ApplicantResponse {
            id: a.id.to_hex(),
            email: a.email,
        }
    }
}

impl From<JobQuery> for JobQueryResponse {
    fn from(q: JobQuery) -> Self {
        JobQueryResponse {
            id: q.id.to_hex(),
            email: q.email,
            user_name: q.user_name,
            question: q.question,
            reply: q.reply,
        }
    }
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: job.title,
            author_email: job.author_email,
            applicants: job
                .applicants
                .map(|list| list.into_iter().map(ApplicantResponse::from).collect()),
            queries: job
                .queries
                .map(|list| list.into_iter().map(JobQueryResponse::from).collect()),
            details: document_to_json(job.details),
        }
    }
}
