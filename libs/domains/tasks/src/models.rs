use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Task status
///
/// A closed set; unknown values are rejected at deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    /// Task not started
    #[default]
    Pending,
    /// Task finished
    Completed,
    /// Task abandoned
    NotDone,
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// When the task is due
    pub due_date: DateTime<Utc>,
    /// Task status
    pub status: TaskStatus,
}

impl Task {
    /// Build a stored task from a validated payload, generating its id.
    pub fn new(input: CreateTask) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
        }
    }

    /// Replace every mutable field with the update payload.
    pub fn apply_update(&mut self, update: UpdateTask) {
        self.title = update.title;
        self.description = update.description;
        self.due_date = update.due_date;
        self.status = update.status;
    }
}

fn validate_due_date(due_date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *due_date < Utc::now() {
        return Err(ValidationError::new("due_date_in_past")
            .with_message("due date cannot be in the past".into()));
    }
    Ok(())
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(custom(function = validate_due_date))]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

/// DTO for updating an existing task.
///
/// Carries the full payload: an update replaces the task wholesale.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(custom(function = validate_due_date))]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

/// DTO for task responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status,
        }
    }
}
