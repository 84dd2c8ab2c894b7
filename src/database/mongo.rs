use super::{
    JobBoardStore, CONVERSATION_COLLECTION, JOB_COLLECTION, NOTIFICATION_COLLECTION,
    USER_COLLECTION,
};
use crate::models::{
    Applicant, DeleteOutcome, InsertOutcome, Job, JobQuery, Message, Notification, UpdateOutcome,
    User,
};
use crate::utils::AppResult;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, database_name: &str) -> AppResult<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(database_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Lookup indexes for the email/sender filters. None of them is unique.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (USER_COLLECTION, doc! { "email": 1 }),
            (JOB_COLLECTION, doc! { "authorEmail": 1 }),
            (JOB_COLLECTION, doc! { "applicants.email": 1 }),
            (NOTIFICATION_COLLECTION, doc! { "authorEmail": 1 }),
            (CONVERSATION_COLLECTION, doc! { "senderId": 1 }),
        ];

        for (collection_name, keys) in indexes {
            let collection = self.collection::<Document>(collection_name);
            let fields: Vec<String> = keys.keys().cloned().collect();
            let label = format!("{}({})", collection_name, fields.join(", "));
            let index = IndexModel::builder().keys(keys).build();

            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index not created for {}: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Closes the connection pool. Call once the HTTP server has stopped.
    pub async fn close(self) {
        self.client.shutdown().await;
        log::info!("🔌 MongoDB connection closed");
    }

    fn users(&self) -> Collection<User> {
        self.collection(USER_COLLECTION)
    }

    fn jobs(&self) -> Collection<Job> {
        self.collection(JOB_COLLECTION)
    }

    fn notifications(&self) -> Collection<Notification> {
        self.collection(NOTIFICATION_COLLECTION)
    }

    fn conversations(&self) -> Collection<Message> {
        self.collection(CONVERSATION_COLLECTION)
    }
}

#[async_trait]
impl JobBoardStore for MongoDB {
    async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn insert_user(&self, user: User) -> AppResult<InsertOutcome> {
        Ok(self.users().insert_one(&user).await?.into())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_job(&self, job: Job) -> AppResult<InsertOutcome> {
        Ok(self.jobs().insert_one(&job).await?.into())
    }

    async fn find_job(&self, id: ObjectId) -> AppResult<Option<Job>> {
        Ok(self.jobs().find_one(doc! { "_id": id }).await?)
    }

    async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        let cursor = self.jobs().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_jobs_by_author(&self, email: &str) -> AppResult<Vec<Job>> {
        let cursor = self.jobs().find(doc! { "authorEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_jobs_applied_by(&self, email: &str) -> AppResult<Vec<Job>> {
        let cursor = self
            .jobs()
            .find(doc! { "applicants": { "$elemMatch": { "email": email } } })
            .projection(doc! { "applicants": 0 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_job(&self, id: ObjectId) -> AppResult<DeleteOutcome> {
        Ok(self.jobs().delete_one(doc! { "_id": id }).await?.into())
    }

    async fn push_applicant(
        &self,
        job_id: ObjectId,
        applicant: Applicant,
    ) -> AppResult<UpdateOutcome> {
        let applicant = to_bson(&applicant)?;
        let result = self
            .jobs()
            .update_one(
                doc! { "_id": job_id },
                doc! { "$push": { "applicants": applicant } },
            )
            .await?;
        Ok(result.into())
    }

    async fn pull_applicants_by_email(
        &self,
        job_id: ObjectId,
        email: &str,
    ) -> AppResult<UpdateOutcome> {
        let result = self
            .jobs()
            .update_one(
                doc! { "_id": job_id },
                doc! { "$pull": { "applicants": { "email": email } } },
            )
            .await?;
        Ok(result.into())
    }

    async fn push_query(&self, job_id: ObjectId, query: JobQuery) -> AppResult<UpdateOutcome> {
        let query = to_bson(&query)?;
        let result = self
            .jobs()
            .update_one(
                doc! { "_id": job_id },
                doc! { "$push": { "queries": query } },
            )
            .await?;
        Ok(result.into())
    }

    async fn push_reply(
        &self,
        user_id: ObjectId,
        job_id: Option<ObjectId>,
        reply: &str,
    ) -> AppResult<UpdateOutcome> {
        let mut filter = doc! { "queries.id": user_id };
        if let Some(job_id) = job_id {
            filter.insert("_id", job_id);
        }

        let result = self
            .jobs()
            .update_one(filter, doc! { "$push": { "queries.$[user].reply": reply } })
            .array_filters(vec![doc! { "user.id": user_id }])
            .await?;
        Ok(result.into())
    }

    async fn insert_notification(&self, notification: Notification) -> AppResult<InsertOutcome> {
        Ok(self.notifications().insert_one(&notification).await?.into())
    }

    async fn find_notifications_by_author(&self, email: &str) -> AppResult<Vec<Notification>> {
        let cursor = self
            .notifications()
            .find(doc! { "authorEmail": email })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn mark_notification_seen(&self, id: ObjectId) -> AppResult<UpdateOutcome> {
        let result = self
            .notifications()
            .update_one(doc! { "_id": id }, doc! { "$set": { "isSeen": true } })
            .upsert(true)
            .await?;
        Ok(result.into())
    }

    async fn insert_message(&self, message: Message) -> AppResult<InsertOutcome> {
        Ok(self.conversations().insert_one(&message).await?.into())
    }

    async fn find_messages_by_sender(&self, sender_id: &str) -> AppResult<Vec<Message>> {
        let cursor = self
            .conversations()
            .find(doc! { "senderId": sender_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
