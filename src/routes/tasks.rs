use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, completed, owner_id, created_at, updated_at";

/// Creates a new task owned by the authenticated user.
///
/// The owner is always the resolved caller; the payload carries no owner
/// field and could not reassign it if it did. Timestamps come from the
/// database defaults, the same clock that bumps `updated_at` later.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: required, non-empty.
/// - `description` (optional).
/// - `completed` (optional, defaults to false).
///
/// ## Responses:
/// - `200 OK`: the newly created `Task`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: validation failure (e.g. empty title).
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let input = task_data.into_inner();

    let result = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, completed, owner_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(input.title)
    .bind(input.description)
    .bind(input.completed)
    .bind(user.0.id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Lists the authenticated user's tasks.
///
/// Only tasks whose `owner_id` matches the resolved caller are returned,
/// in creation order.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY created_at",
        TASK_COLUMNS
    ))
    .bind(user.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id.
///
/// The query filters by id AND owner in one statement, so a task belonging
/// to another user is indistinguishable from a nonexistent one: both are
/// the same 404. This avoids leaking which ids exist.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this owner.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND owner_id = $2",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .bind(user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Applies a partial update to a task.
///
/// Only supplied fields change; omitted fields keep their prior values
/// (COALESCE on the SQL side). `updated_at` is refreshed on every call.
/// Ownership is not an updatable field. The same single-statement
/// id-AND-owner filter applies, so foreign-owned tasks 404 identically to
/// missing ones.
///
/// ## Request Body:
/// A JSON object matching `TaskUpdate`: `title?`, `description?`,
/// `completed?`.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this owner.
/// - `422 Unprocessable Entity`: validation failure.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks \
         SET title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             completed = COALESCE($3, completed), \
             updated_at = NOW() \
         WHERE id = $4 AND owner_id = $5 \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.completed)
    .bind(task_id.into_inner())
    .bind(user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by id.
///
/// Deletion is terminal: repeating the delete for the same id is a 404,
/// not a no-op. The id-AND-owner filter gives the usual non-leaking 404
/// for foreign-owned tasks.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this owner.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id.into_inner())
        .bind(user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
