/// Todo endpoints
///
/// All routes here sit behind the bearer-token middleware; handlers read the
/// caller's identity from [`AuthContext`] and pass it explicitly into the
/// todo service, which enforces ownership.
///
/// # Endpoints
///
/// - `POST /v1/todos` - Create a todo
/// - `GET /v1/todos/for-date?date=millis` - Todos active on a calendar day
/// - `POST /v1/todos/toggle` - Toggle completion (per-day for recurring todos)
/// - `DELETE /v1/todos/:id` - Delete a todo

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use dayplan_shared::{
    auth::middleware::AuthContext,
    models::todo::{CreateTodo, RecurringType, Todo},
    service::{self, TodoForDate},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Create todo request
///
/// Recurrence fields are optional; a plain `{"title": "..."}` body creates a
/// one-off todo with no due date.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    /// Title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date (epoch millis; one-off todos only)
    pub due_date: Option<i64>,

    /// Whether the todo recurs
    #[serde(default)]
    pub is_recurring: bool,

    /// Recurrence kind ("weekly" or "daily")
    pub recurring_type: Option<RecurringType>,

    /// Weekdays for weekly recurrence (0 = Sunday .. 6 = Saturday)
    #[serde(default)]
    #[validate(custom(function = "validate_weekdays"))]
    pub recurring_days: Vec<i32>,
}

/// Weekday entries must be in 0..=6
fn validate_weekdays(days: &[i32]) -> Result<(), ValidationError> {
    if days.iter().all(|d| (0..=6).contains(d)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("weekday_out_of_range");
        err.message = Some("Days must be between 0 (Sunday) and 6 (Saturday)".into());
        Err(err)
    }
}

/// Query parameters for the for-date listing
#[derive(Debug, Deserialize)]
pub struct ForDateQuery {
    /// The day to list, as epoch millis anywhere within that day
    pub date: i64,
}

/// Toggle completion request
#[derive(Debug, Deserialize)]
pub struct ToggleTodoRequest {
    /// Todo to toggle
    pub todo_id: Uuid,

    /// For recurring todos: which day's occurrence to toggle (epoch millis)
    pub date: Option<i64>,
}

/// Create todo endpoint
///
/// The new todo is owned by the caller; `completed` starts false and the
/// completed-date set starts empty.
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token
/// - `422 Unprocessable Entity`: empty title or out-of-range weekdays
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    req.validate()?;

    tracing::info!(
        user_id = %auth.user_id,
        title = %req.title,
        is_recurring = req.is_recurring,
        "Creating todo"
    );

    let todo = service::create_todo(
        &state.store,
        auth.user_id,
        CreateTodo {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            is_recurring: req.is_recurring,
            recurring_type: req.recurring_type,
            recurring_days: req.recurring_days,
        },
    )
    .await?;

    Ok(Json(todo))
}

/// For-date listing endpoint
///
/// Returns the caller's todos active on the day `date` falls on, each
/// annotated with `completed_on` for that day. Storage order, no pagination.
///
/// # Errors
///
/// - `400 Bad Request`: missing or non-numeric `date`
/// - `401 Unauthorized`: missing/invalid token
pub async fn todos_for_date(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ForDateQuery>,
) -> ApiResult<Json<Vec<TodoForDate>>> {
    let todos = service::todos_for_date(&state.store, auth.user_id, query.date).await?;

    Ok(Json(todos))
}

/// Toggle completion endpoint
///
/// With a `date`, a recurring todo's occurrence for that day flips; without
/// one, the `completed` flag flips. Returns the updated record.
///
/// # Errors
///
/// - `403 Forbidden`: todo exists but belongs to another user
/// - `404 Not Found`: unknown todo id
pub async fn toggle_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ToggleTodoRequest>,
) -> ApiResult<Json<Todo>> {
    tracing::info!(
        user_id = %auth.user_id,
        todo_id = %req.todo_id,
        date = ?req.date,
        "Toggling todo"
    );

    let todo = service::toggle_todo(&state.store, auth.user_id, req.todo_id, req.date).await?;

    Ok(Json(todo))
}

/// Delete todo endpoint
///
/// # Errors
///
/// - `403 Forbidden`: todo exists but belongs to another user
/// - `404 Not Found`: unknown todo id
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    tracing::info!(user_id = %auth.user_id, todo_id = %id, "Deleting todo");

    service::delete_todo(&state.store, auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
