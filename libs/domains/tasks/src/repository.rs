use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (MongoDB for the real
/// store, an in-memory map for tests and local development).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task, generating its identifier
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID; `None` when absent
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// List all tasks, newest first
    async fn get_all(&self) -> TaskResult<Vec<Task>>;

    /// Replace a task wholesale; `NotFound` when the id does not match
    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task>;

    /// Delete a task by ID, reporting whether anything was deleted
    async fn delete(&self, id: Uuid) -> TaskResult<bool>;
}

/// In-memory implementation of [`TaskRepository`].
///
/// Serializes access with a reader/writer lock (concurrent readers,
/// exclusive writer) so it stays safe under concurrent request handling.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(input);
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        // v7 ids are time-ordered, so this matches the store's newest-first
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.apply_update(input);
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{Duration, Utc};

    fn create_input(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            due_date: Utc::now() + Duration::days(1),
            status: TaskStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_equal_task() {
        let repo = InMemoryTaskRepository::new();

        let created = repo.create(create_input("buy milk")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_all_returns_newest_first() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.create(create_input("first")).await.unwrap();
        let second = repo.create(create_input("second")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.create(create_input("draft")).await.unwrap();

        let due = Utc::now() + Duration::days(3);
        let updated = repo
            .update(
                created.id,
                UpdateTask {
                    title: "final".to_string(),
                    description: "ready for review".to_string(),
                    due_date: due,
                    status: TaskStatus::Completed,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "final");
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_not_found() {
        let repo = InMemoryTaskRepository::new();
        let id = Uuid::new_v4();

        let result = repo
            .update(
                id,
                UpdateTask {
                    title: "ghost".to_string(),
                    description: String::new(),
                    due_date: Utc::now() + Duration::days(1),
                    status: TaskStatus::Pending,
                },
            )
            .await;

        assert!(matches!(result, Err(TaskError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn test_double_delete_reports_nothing_deleted() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.create(create_input("temp")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
