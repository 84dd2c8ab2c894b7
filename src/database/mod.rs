//! Data access layer. Every route performs its work through one `JobBoardStore` call.

mod mongo;

#[cfg(test)]
pub mod memory;

pub use mongo::MongoDB;

use crate::models::{
    Applicant, DeleteOutcome, InsertOutcome, Job, JobQuery, Message, Notification, UpdateOutcome,
    User,
};
use crate::utils::AppResult;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub const USER_COLLECTION: &str = "user";
pub const JOB_COLLECTION: &str = "job";
pub const NOTIFICATION_COLLECTION: &str = "notifications";
pub const CONVERSATION_COLLECTION: &str = "conversation";

#[async_trait]
pub trait JobBoardStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    // Users
    async fn insert_user(&self, user: User) -> AppResult<InsertOutcome>;
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list_users(&self) -> AppResult<Vec<User>>;

    // Jobs
    async fn insert_job(&self, job: Job) -> AppResult<InsertOutcome>;
    async fn find_job(&self, id: ObjectId) -> AppResult<Option<Job>>;
    async fn list_jobs(&self) -> AppResult<Vec<Job>>;
    async fn find_jobs_by_author(&self, email: &str) -> AppResult<Vec<Job>>;
    /// Jobs with an applicant carrying `email`, returned without their `applicants` field.
    async fn find_jobs_applied_by(&self, email: &str) -> AppResult<Vec<Job>>;
    async fn delete_job(&self, id: ObjectId) -> AppResult<DeleteOutcome>;
    async fn push_applicant(&self, job_id: ObjectId, applicant: Applicant)
        -> AppResult<UpdateOutcome>;
    /// Removes every applicant with `email` in one atomic update.
    async fn pull_applicants_by_email(&self, job_id: ObjectId, email: &str)
        -> AppResult<UpdateOutcome>;
    async fn push_query(&self, job_id: ObjectId, query: JobQuery) -> AppResult<UpdateOutcome>;
    /// Appends `reply` to the queries asked by `user_id`.
    ///
    /// With `job_id` the update is scoped to that job; without it the first job
    /// holding such a query is updated.
    async fn push_reply(
        &self,
        user_id: ObjectId,
        job_id: Option<ObjectId>,
        reply: &str,
    ) -> AppResult<UpdateOutcome>;

    // Notifications
    async fn insert_notification(&self, notification: Notification) -> AppResult<InsertOutcome>;
    async fn find_notifications_by_author(&self, email: &str) -> AppResult<Vec<Notification>>;
    /// Sets `isSeen` with upsert semantics.
    async fn mark_notification_seen(&self, id: ObjectId) -> AppResult<UpdateOutcome>;

    // Conversations
    async fn insert_message(&self, message: Message) -> AppResult<InsertOutcome>;
    async fn find_messages_by_sender(&self, sender_id: &str) -> AppResult<Vec<Message>>;
}
