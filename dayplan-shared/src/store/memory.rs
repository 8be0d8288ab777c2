/// In-memory todo store
///
/// Document-style [`TodoStore`] backend holding records in process memory.
/// Insertion order is preserved, matching what the PostgreSQL adapter's
/// `ORDER BY created_at` produces. Used as the test double for the service
/// layer; everything is lost on drop.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TodoStore};
use crate::models::todo::{CreateTodo, Todo};

/// Todo store backed by a locked in-process vector
#[derive(Debug, Default)]
pub struct MemTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemTodoStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored todos (any owner)
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    /// Whether the store holds no todos
    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

#[async_trait]
impl TodoStore for MemTodoStore {
    async fn load_todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn load_todo_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_todo(&self, data: CreateTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            completed: false,
            due_date: data.due_date,
            is_recurring: data.is_recurring,
            recurring_type: data.recurring_type,
            recurring_days: data.recurring_days,
            completed_dates: vec![],
            created_at: now,
            updated_at: now,
        };

        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn save_todo(&self, todo: &Todo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let slot = todos
            .iter_mut()
            .find(|t| t.id == todo.id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        let mut updated = todo.clone();
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_todo(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(user_id: Uuid, title: &str) -> CreateTodo {
        CreateTodo {
            user_id,
            title: title.to_string(),
            description: None,
            due_date: None,
            is_recurring: false,
            recurring_type: None,
            recurring_days: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_initializes_completion_state() {
        let store = MemTodoStore::new();
        let todo = store
            .insert_todo(create(Uuid::new_v4(), "Buy milk"))
            .await
            .unwrap();

        assert!(!todo.completed);
        assert!(todo.completed_dates.is_empty());
    }

    #[tokio::test]
    async fn test_load_for_user_filters_by_owner() {
        let store = MemTodoStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert_todo(create(alice, "a1")).await.unwrap();
        store.insert_todo(create(bob, "b1")).await.unwrap();
        store.insert_todo(create(alice, "a2")).await.unwrap();

        let todos = store.load_todos_for_user(alice).await.unwrap();
        assert_eq!(todos.len(), 2);
        // Insertion order is preserved.
        assert_eq!(todos[0].title, "a1");
        assert_eq!(todos[1].title, "a2");
    }

    #[tokio::test]
    async fn test_save_replaces_record() {
        let store = MemTodoStore::new();
        let mut todo = store
            .insert_todo(create(Uuid::new_v4(), "Buy milk"))
            .await
            .unwrap();

        todo.completed = true;
        let saved = store.save_todo(&todo).await.unwrap();
        assert!(saved.completed);

        let loaded = store.load_todo_by_id(todo.id).await.unwrap().unwrap();
        assert!(loaded.completed);
    }

    #[tokio::test]
    async fn test_save_unknown_id_fails() {
        let store = MemTodoStore::new();
        let todo = store
            .insert_todo(create(Uuid::new_v4(), "Buy milk"))
            .await
            .unwrap();
        store.delete_todo(todo.id).await.unwrap();

        let result = store.save_todo(&todo).await;
        assert!(matches!(
            result,
            Err(StoreError::Database(sqlx::Error::RowNotFound))
        ));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemTodoStore::new();
        let todo = store
            .insert_todo(create(Uuid::new_v4(), "Buy milk"))
            .await
            .unwrap();

        assert!(store.delete_todo(todo.id).await.unwrap());
        assert!(!store.delete_todo(todo.id).await.unwrap());
        assert!(store.is_empty().await);
    }
}
