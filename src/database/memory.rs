//! In-memory `JobBoardStore` used by the handler tests.
//!
//! Records are encoded to BSON bytes and decoded back on every write, so a
//! document MongoDB could not hand back fails here too.

use super::JobBoardStore;
use crate::models::{
    Applicant, DeleteOutcome, InsertOutcome, Job, JobQuery, Message, Notification, UpdateOutcome,
    User,
};
use crate::utils::{AppError, AppResult};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    jobs: RwLock<Vec<Job>>,
    notifications: RwLock<Vec<Notification>>,
    conversations: RwLock<Vec<Message>>,
    reject_notifications: AtomicBool,
}

fn read<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| AppError::DatabaseError("Lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| AppError::DatabaseError("Lock poisoned".to_string()))
}

fn stored<T: Serialize + DeserializeOwned>(record: &T) -> AppResult<T> {
    let bytes = mongodb::bson::to_vec(record)?;
    mongodb::bson::from_slice(&bytes)
        .map_err(|e| AppError::DatabaseError(format!("stored document is unreadable: {}", e)))
}

fn inserted(id: ObjectId) -> InsertOutcome {
    InsertOutcome {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following notification insert fail.
    pub fn reject_notifications(&self) {
        self.reject_notifications.store(true, Ordering::SeqCst);
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.read().map(|n| n.len()).unwrap_or_default()
    }

    fn update_job<F>(&self, job_id: ObjectId, apply: F) -> AppResult<UpdateOutcome>
    where
        F: FnOnce(&mut Job) -> bool,
    {
        let mut jobs = write(&self.jobs)?;
        match jobs.iter_mut().find(|job| job.id == Some(job_id)) {
            Some(job) => {
                let mut updated = job.clone();
                let modified = apply(&mut updated);
                *job = stored(&updated)?;
                Ok(UpdateOutcome::matched(1, u64::from(modified)))
            }
            None => Ok(UpdateOutcome::matched(0, 0)),
        }
    }
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert_user(&self, mut user: User) -> AppResult<InsertOutcome> {
        let id = *user.id.get_or_insert_with(ObjectId::new);
        let user = stored(&user)?;
        write(&self.users)?.push(user);
        Ok(inserted(id))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = read(&self.users)?;
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(read(&self.users)?.clone())
    }

    async fn insert_job(&self, mut job: Job) -> AppResult<InsertOutcome> {
        let id = *job.id.get_or_insert_with(ObjectId::new);
        let job = stored(&job)?;
        write(&self.jobs)?.push(job);
        Ok(inserted(id))
    }

    async fn find_job(&self, id: ObjectId) -> AppResult<Option<Job>> {
        let jobs = read(&self.jobs)?;
        Ok(jobs.iter().find(|job| job.id == Some(id)).cloned())
    }

    async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        Ok(read(&self.jobs)?.clone())
    }

    async fn find_jobs_by_author(&self, email: &str) -> AppResult<Vec<Job>> {
        let jobs = read(&self.jobs)?;
        Ok(jobs
            .iter()
            .filter(|job| job.author_email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn find_jobs_applied_by(&self, email: &str) -> AppResult<Vec<Job>> {
        let jobs = read(&self.jobs)?;
        Ok(jobs
            .iter()
            .filter(|job| {
                job.applicants
                    .iter()
                    .flatten()
                    .any(|a| a.email.as_deref() == Some(email))
            })
            .cloned()
            .map(|mut job| {
                job.applicants = None;
                job
            })
            .collect())
    }

    async fn delete_job(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        let mut jobs = write(&self.jobs)?;
        let position = jobs.iter().position(|job| job.id == Some(id));
        if let Some(index) = position {
            jobs.remove(index);
        }
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: u64::from(position.is_some()),
        })
    }

    async fn push_applicant(
        &self,
        job_id: ObjectId,
        applicant: Applicant,
    ) -> AppResult<UpdateOutcome> {
        self.update_job(job_id, |job| {
            job.applicants.get_or_insert_with(Vec::new).push(applicant);
            true
        })
    }

    async fn pull_applicants_by_email(
        &self,
        job_id: ObjectId,
        email: &str,
    ) -> AppResult<UpdateOutcome> {
        self.update_job(job_id, |job| match job.applicants.as_mut() {
            Some(applicants) => {
                let before = applicants.len();
                applicants.retain(|a| a.email.as_deref() != Some(email));
                applicants.len() != before
            }
            None => false,
        })
    }

    async fn push_query(&self, job_id: ObjectId, query: JobQuery) -> AppResult<UpdateOutcome> {
        self.update_job(job_id, |job| {
            job.queries.get_or_insert_with(Vec::new).push(query);
            true
        })
    }

    async fn push_reply(
        &self,
        user_id: ObjectId,
        job_id: Option<ObjectId>,
        reply: &str,
    ) -> AppResult<UpdateOutcome> {
        let mut jobs = write(&self.jobs)?;
        let target = jobs.iter_mut().find(|job| {
            job_id.map_or(true, |id| job.id == Some(id))
                && job.queries.iter().flatten().any(|q| q.id == user_id)
        });

        match target {
            Some(job) => {
                let mut updated = job.clone();
                for query in updated.queries.iter_mut().flatten().filter(|q| q.id == user_id) {
                    query.reply.push(reply.to_string());
                }
                *job = stored(&updated)?;
                Ok(UpdateOutcome::matched(1, 1))
            }
            None => Ok(UpdateOutcome::matched(0, 0)),
        }
    }

    async fn insert_notification(&self, mut notification: Notification) -> AppResult<InsertOutcome> {
        if self.reject_notifications.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("notification write rejected".to_string()));
        }
        let id = *notification.id.get_or_insert_with(ObjectId::new);
        let notification = stored(&notification)?;
        write(&self.notifications)?.push(notification);
        Ok(inserted(id))
    }

    async fn find_notifications_by_author(&self, email: &str) -> AppResult<Vec<Notification>> {
        let notifications = read(&self.notifications)?;
        Ok(notifications
            .iter()
            .filter(|n| n.author_email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn mark_notification_seen(&self, id: ObjectId) -> AppResult<UpdateOutcome> {
        let mut notifications = write(&self.notifications)?;
        match notifications.iter_mut().find(|n| n.id == Some(id)) {
            Some(notification) => {
                let modified = !notification.is_seen;
                notification.is_seen = true;
                Ok(UpdateOutcome::matched(1, u64::from(modified)))
            }
            None => {
                notifications.push(stored(&Notification {
                    id: Some(id),
                    is_seen: true,
                    ..Default::default()
                })?);
                Ok(UpdateOutcome {
                    upserted_id: Some(id.to_hex()),
                    ..UpdateOutcome::matched(0, 0)
                })
            }
        }
    }

    async fn insert_message(&self, mut message: Message) -> AppResult<InsertOutcome> {
        let id = *message.id.get_or_insert_with(ObjectId::new);
        let message = stored(&message)?;
        write(&self.conversations)?.push(message);
        Ok(inserted(id))
    }

    async fn find_messages_by_sender(&self, sender_id: &str) -> AppResult<Vec<Message>> {
        let conversations = read(&self.conversations)?;
        Ok(conversations
            .iter()
            .filter(|m| m.is_sent_by(sender_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_unreadable_job_is_not_stored() {
        let store = MemoryStore::new();
        let job = Job {
            title: Some("Engineer".into()),
            details: doc! { "queries": "none" },
            ..Default::default()
        };

        let result = store.insert_job(job).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(store.list_jobs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_job_keeps_extra_fields() {
        let store = MemoryStore::new();
        let job = Job {
            title: Some("Engineer".into()),
            details: doc! { "location": "Remote" },
            ..Default::default()
        };

        let inserted = store.insert_job(job).await.unwrap();
        let id = ObjectId::parse_str(&inserted.inserted_id).unwrap();
        let applicant = Applicant { id: ObjectId::new(), email: Some("b@x.com".into()) };
        store.push_applicant(id, applicant.clone()).await.unwrap();

        let job = store.find_job(id).await.unwrap().unwrap();
        assert_eq!(job.details.get_str("location").unwrap(), "Remote");
        assert_eq!(job.applicants, Some(vec![applicant]));
    }
}
