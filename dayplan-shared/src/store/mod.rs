/// Storage adapters for todos
///
/// The service layer talks to storage through the [`TodoStore`] trait; the
/// concrete backend is swappable. Two adapters exist:
///
/// - [`postgres::PgTodoStore`]: the primary backend, sqlx over PostgreSQL
/// - [`memory::MemTodoStore`]: an in-process document-style store, used by
///   service tests and suitable for ephemeral deployments
///
/// Writes are whole-record: `save_todo` persists the full task row, so two
/// concurrent toggles of the same todo race last-write-wins. There is no
/// version check; this is accepted (see DESIGN.md).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::todo::{CreateTodo, Todo};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage interface for todos
///
/// Implementations must not filter, sort, or otherwise interpret records;
/// recurrence and completion semantics live entirely in the service layer and
/// the recurrence engine.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Loads every todo owned by `user_id`, in storage order
    async fn load_todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, StoreError>;

    /// Loads a single todo by id, None if unknown
    async fn load_todo_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Inserts a new todo and returns the stored record
    async fn insert_todo(&self, data: CreateTodo) -> Result<Todo, StoreError>;

    /// Persists the full record of an existing todo and returns it
    async fn save_todo(&self, todo: &Todo) -> Result<Todo, StoreError>;

    /// Deletes a todo by id; true if a record was removed
    async fn delete_todo(&self, id: Uuid) -> Result<bool, StoreError>;
}
