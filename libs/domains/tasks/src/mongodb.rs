//! MongoDB implementation of TaskRepository

use std::future::{Future, IntoFuture};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Deadline for a single store operation. Exceeding it is reported as a
/// retryable failure, never fatal to the process.
const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB implementation of the TaskRepository
pub struct MongoTaskRepository {
    collection: Collection<Task>,
}

impl MongoTaskRepository {
    /// Create a new MongoTaskRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoTaskRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Task>("tasks");
        Self { collection }
    }

    /// Create a new MongoTaskRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Task>(collection_name);
        Self { collection }
    }

    /// Run a store operation under the call-scoped deadline.
    async fn with_deadline<T>(
        &self,
        op_name: &str,
        op: impl Future<Output = mongodb::error::Result<T>>,
    ) -> TaskResult<T> {
        match tokio::time::timeout(OP_TIMEOUT, op).await {
            Ok(result) => result.map_err(TaskError::from),
            Err(_) => Err(TaskError::Timeout(op_name.to_string())),
        }
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input);

        self.with_deadline("insert task", self.collection.insert_one(&task).into_future())
            .await?;

        tracing::info!(task_id = %task.id, "Task created successfully");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        self.with_deadline("find task", self.collection.find_one(Self::id_filter(id)).into_future())
            .await
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> TaskResult<Vec<Task>> {
        use futures_util::TryStreamExt;

        // v7 ids are time-ordered, so sorting on _id gives newest first
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "_id": -1 })
            .build();

        let cursor = self
            .with_deadline("find tasks", self.collection.find(doc! {}).with_options(options).into_future())
            .await?;

        self.with_deadline("collect tasks", cursor.try_collect::<Vec<Task>>())
            .await
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        let task = Task {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
        };

        let result = self
            .with_deadline(
                "replace task",
                self.collection.replace_one(Self::id_filter(id), &task).into_future(),
            )
            .await?;

        // The matched count is the existence check; never trust the call to
        // have found anything.
        if result.matched_count == 0 {
            return Err(TaskError::NotFound(id));
        }

        tracing::info!(task_id = %id, "Task updated successfully");
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let result = self
            .with_deadline("delete task", self.collection.delete_one(Self::id_filter(id)).into_future())
            .await?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{Duration as ChronoDuration, Utc};

    async fn repository() -> MongoTaskRepository {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&mongo_url).await.unwrap();
        MongoTaskRepository::with_collection(client.database("taskboard_test"), "tasks_test")
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_crud_round_trip() {
        let repo = repository().await;

        let created = repo
            .create(CreateTask {
                title: "integration".to_string(),
                description: String::new(),
                due_date: Utc::now() + ChronoDuration::days(1),
                status: TaskStatus::Pending,
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.as_ref().map(|t| t.id), Some(created.id));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
