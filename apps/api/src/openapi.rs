//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Task management REST API with JWT authentication (MongoDB)",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::ApiDoc),
        (path = "/api/tasks", api = domain_tasks::ApiDoc)
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Tasks", description = "Task management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
