/// PostgreSQL todo store
///
/// The primary [`TodoStore`] backend. Array-valued fields (`recurring_days`,
/// `completed_dates`) map directly to INTEGER[] / BIGINT[] columns; nothing
/// is serialized to text and re-parsed on read.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, TodoStore};
use crate::models::todo::{CreateTodo, Todo};

/// sqlx-backed todo store
///
/// Cheap to clone; wraps the shared connection pool.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn load_todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, description, completed, due_date,
                   is_recurring, recurring_type, recurring_days, completed_dates,
                   created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn load_todo_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, description, completed, due_date,
                   is_recurring, recurring_type, recurring_days, completed_dates,
                   created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn insert_todo(&self, data: CreateTodo) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, title, description, due_date,
                               is_recurring, recurring_type, recurring_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, title, description, completed, due_date,
                      is_recurring, recurring_type, recurring_days, completed_dates,
                      created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.is_recurring)
        .bind(data.recurring_type)
        .bind(data.recurring_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn save_todo(&self, todo: &Todo) -> Result<Todo, StoreError> {
        // Whole-record write; last write wins on concurrent saves.
        let saved = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $2,
                description = $3,
                completed = $4,
                due_date = $5,
                is_recurring = $6,
                recurring_type = $7,
                recurring_days = $8,
                completed_dates = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, completed, due_date,
                      is_recurring, recurring_type, recurring_days, completed_dates,
                      created_at, updated_at
            "#,
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.due_date)
        .bind(todo.is_recurring)
        .bind(todo.recurring_type)
        .bind(&todo.recurring_days)
        .bind(&todo.completed_dates)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn delete_todo(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
