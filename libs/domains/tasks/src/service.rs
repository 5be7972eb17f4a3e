//! Task Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Task service providing business logic operations
///
/// The service layer handles validation and orchestrates repository
/// operations. Authorization is not its concern: role gates are applied by
/// the middleware in front of the handlers.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a new TaskService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List all tasks
    #[instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.get_all().await
    }

    /// Replace a task wholesale with validation
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::repository::{InMemoryTaskRepository, MockTaskRepository};
    use chrono::{Duration, Utc};

    fn valid_input() -> CreateTask {
        CreateTask {
            title: "write report".to_string(),
            description: "quarterly numbers".to_string(),
            due_date: Utc::now() + Duration::days(1),
            status: TaskStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_equal_task() {
        let service = TaskService::new(InMemoryTaskRepository::new());

        let created = service.create_task(valid_input()).await.unwrap();
        let fetched = service.get_task(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_empty_title_never_reaches_repository() {
        // No expectations set: any repository call would panic
        let service = TaskService::new(MockTaskRepository::new());

        let result = service
            .create_task(CreateTask {
                title: String::new(),
                ..valid_input()
            })
            .await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_with_past_due_date_fails_validation() {
        let service = TaskService::new(MockTaskRepository::new());

        let result = service
            .create_task(CreateTask {
                due_date: Utc::now() - Duration::hours(1),
                ..valid_input()
            })
            .await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_task_is_not_found() {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let id = Uuid::new_v4();

        assert!(matches!(
            service.get_task(id).await,
            Err(TaskError::NotFound(got)) if got == id
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_task_is_not_found() {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let id = Uuid::new_v4();
        let input = valid_input();

        let result = service
            .update_task(
                id,
                UpdateTask {
                    title: input.title,
                    description: input.description,
                    due_date: input.due_date,
                    status: input.status,
                },
            )
            .await;

        assert!(matches!(result, Err(TaskError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn test_update_replaces_all_mutable_fields() {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let created = service.create_task(valid_input()).await.unwrap();

        let due = Utc::now() + Duration::days(14);
        let updated = service
            .update_task(
                created.id,
                UpdateTask {
                    title: "ship release".to_string(),
                    description: "cut the tag".to_string(),
                    due_date: due,
                    status: TaskStatus::NotDone,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "ship release");
        assert_eq!(updated.description, "cut the tag");
        assert_eq!(updated.due_date, due);
        assert_eq!(updated.status, TaskStatus::NotDone);
    }

    #[tokio::test]
    async fn test_delete_twice_second_is_not_found() {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let created = service.create_task(valid_input()).await.unwrap();

        service.delete_task(created.id).await.unwrap();

        assert!(matches!(
            service.delete_task(created.id).await,
            Err(TaskError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate_unchanged() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_all()
            .returning(|| Err(TaskError::Timeout("find tasks".to_string())));

        let service = TaskService::new(repo);

        assert!(matches!(
            service.get_all_tasks().await,
            Err(TaskError::Timeout(_))
        ));
    }
}
