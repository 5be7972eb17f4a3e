use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{
    TokenService, UuidPath, ValidatedJson,
    auth::{require_admin, require_auth},
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{CreateTask, TaskResponse, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(
        schemas(TaskResponse, CreateTask, UpdateTask),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Task management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the tasks router with all HTTP endpoints.
///
/// Every route sits behind the bearer-token middleware; the delete route is
/// additionally behind the admin gate. The service layer does not duplicate
/// those checks.
pub fn router<R: TaskRepository + 'static>(
    service: TaskService<R>,
    tokens: Arc<dyn TokenService>,
) -> Router {
    let shared_service = Arc::new(service);

    let admin_routes = Router::new()
        .route("/{id}", delete(delete_task::<R>))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(list_tasks::<R>).post(create_task::<R>))
        .route("/{id}", get(get_task::<R>).put(update_task::<R>))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(tokens, require_auth))
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "Tasks",
    responses(
        (status = 200, description = "List of tasks", body = Vec<TaskResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.get_all_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "Tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.get_task(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Replace a task wholesale
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.update_task(id, input).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// Delete a task (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<impl IntoResponse> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
