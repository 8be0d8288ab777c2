/// Todo service: validation, ownership gate, and the query-by-date operation
///
/// Every operation takes the caller's identity as an explicit `user_id`
/// argument; there is no ambient request context. Storage is reached through
/// the [`TodoStore`] trait so the same logic runs against PostgreSQL and the
/// in-memory adapter.
///
/// Toggle and delete pass through the ownership gate: the record is loaded by
/// id, a missing record is `NotFound`, and a record owned by another user is
/// `Forbidden`. Create has no gate; the new todo is always owned by the
/// caller.

use uuid::Uuid;

use crate::models::todo::{CreateTodo, Todo};
use crate::recurrence::{is_active_on, is_completed_on, toggle_completion};
use crate::store::{StoreError, TodoStore};

/// Error type for todo operations
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// Input rejected before anything was persisted
    #[error("validation failed: {0}")]
    Validation(String),

    /// No todo with the given id
    #[error("todo not found")]
    NotFound,

    /// Todo exists but belongs to another user
    #[error("todo belongs to another user")]
    Forbidden,

    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A todo annotated with its completion state for one calendar day
///
/// `completed_on` is presentation state resolved against the queried date;
/// the underlying record is returned unchanged.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TodoForDate {
    /// The todo record
    #[serde(flatten)]
    pub todo: Todo,

    /// Whether the todo is completed on the queried day
    pub completed_on: bool,
}

/// Creates a todo owned by `user_id`
///
/// The title must be non-empty after trimming; otherwise nothing is
/// persisted. `data.user_id` is overwritten with the caller's identity so a
/// forged owner in the payload cannot take effect.
pub async fn create_todo<S>(store: &S, user_id: Uuid, data: CreateTodo) -> Result<Todo, TodoError>
where
    S: TodoStore + ?Sized,
{
    if data.title.trim().is_empty() {
        return Err(TodoError::Validation("title must not be empty".to_string()));
    }

    let todo = store
        .insert_todo(CreateTodo { user_id, ..data })
        .await?;

    Ok(todo)
}

/// Lists the caller's todos active on the day `date_millis` falls on
///
/// Loads all of the user's todos (storage applies no date filter), retains
/// those the recurrence engine marks active for the day, and annotates each
/// with its per-day completion state. Storage order is preserved; no sort is
/// applied.
pub async fn todos_for_date<S>(
    store: &S,
    user_id: Uuid,
    date_millis: i64,
) -> Result<Vec<TodoForDate>, TodoError>
where
    S: TodoStore + ?Sized,
{
    let todos = store.load_todos_for_user(user_id).await?;

    Ok(todos
        .into_iter()
        .filter(|todo| is_active_on(todo, date_millis))
        .map(|todo| {
            let completed_on = is_completed_on(&todo, date_millis);
            TodoForDate { todo, completed_on }
        })
        .collect())
}

/// Toggles completion state of a todo
///
/// For a recurring todo with a date, the day's membership in the
/// completed-date set flips; otherwise the `completed` flag flips (see
/// [`toggle_completion`] for the recurring-without-date fallthrough). The
/// whole record is saved back; concurrent toggles race last-write-wins.
pub async fn toggle_todo<S>(
    store: &S,
    user_id: Uuid,
    todo_id: Uuid,
    date_millis: Option<i64>,
) -> Result<Todo, TodoError>
where
    S: TodoStore + ?Sized,
{
    let mut todo = load_owned(store, user_id, todo_id).await?;

    toggle_completion(&mut todo, date_millis);

    let saved = store.save_todo(&todo).await?;
    Ok(saved)
}

/// Deletes a todo
pub async fn delete_todo<S>(store: &S, user_id: Uuid, todo_id: Uuid) -> Result<(), TodoError>
where
    S: TodoStore + ?Sized,
{
    let todo = load_owned(store, user_id, todo_id).await?;

    store.delete_todo(todo.id).await?;
    Ok(())
}

/// Ownership gate shared by toggle and delete
async fn load_owned<S>(store: &S, user_id: Uuid, todo_id: Uuid) -> Result<Todo, TodoError>
where
    S: TodoStore + ?Sized,
{
    let todo = store
        .load_todo_by_id(todo_id)
        .await?
        .ok_or(TodoError::NotFound)?;

    if !todo.is_owned_by(user_id) {
        return Err(TodoError::Forbidden);
    }

    Ok(todo)
}
