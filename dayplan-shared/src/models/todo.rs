/// Todo model
///
/// This module provides the Todo model, the core entity of Dayplan. A todo is
/// either one-off (optional due date, single `completed` flag) or recurring
/// (daily, or weekly on a set of weekdays). Recurring todos track completion
/// per calendar day in `completed_dates` instead of the `completed` flag.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE recurring_type AS ENUM ('weekly', 'daily');
///
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     due_date BIGINT,
///     is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
///     recurring_type recurring_type,
///     recurring_days INTEGER[] NOT NULL DEFAULT '{}',
///     completed_dates BIGINT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `recurring_days` and `completed_dates` are native array columns. Weekdays
/// are numbered 0 = Sunday through 6 = Saturday; completed dates are epoch
/// milliseconds normalized to local midnight by the recurrence engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recurrence kind for a recurring todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recurring_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurringType {
    /// Active on the weekdays listed in `recurring_days`
    Weekly,

    /// Active every calendar day
    Daily,
}

impl RecurringType {
    /// Converts kind to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringType::Weekly => "weekly",
            RecurringType::Daily => "daily",
        }
    }
}

/// Todo model representing a one-off or recurring task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Owning user; ownership is fixed at creation
    pub user_id: Uuid,

    /// Non-empty title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag; the sole completion signal for one-off todos
    pub completed: bool,

    /// Optional due date in epoch milliseconds (one-off todos only)
    pub due_date: Option<i64>,

    /// Whether this todo recurs
    pub is_recurring: bool,

    /// Recurrence kind (only meaningful when `is_recurring`)
    pub recurring_type: Option<RecurringType>,

    /// Weekdays (0 = Sunday .. 6 = Saturday) for weekly recurrence
    pub recurring_days: Vec<i32>,

    /// Local-midnight epoch millis of days this recurring todo was completed
    ///
    /// Grows for the lifetime of the todo; there is no compaction.
    pub completed_dates: Vec<i64>,

    /// When the todo was created
    pub created_at: DateTime<Utc>,

    /// When the todo was last updated
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Checks whether `user_id` owns this todo
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Input for creating a new todo
///
/// New todos always start with `completed = false` and an empty
/// `completed_dates` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Owning user
    pub user_id: Uuid,

    /// Title (must be non-empty after trimming)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date (epoch millis)
    pub due_date: Option<i64>,

    /// Whether the todo recurs
    pub is_recurring: bool,

    /// Recurrence kind
    pub recurring_type: Option<RecurringType>,

    /// Weekdays for weekly recurrence (0 = Sunday .. 6 = Saturday)
    pub recurring_days: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurring_type_as_str() {
        assert_eq!(RecurringType::Weekly.as_str(), "weekly");
        assert_eq!(RecurringType::Daily.as_str(), "daily");
    }

    #[test]
    fn test_recurring_type_serde_lowercase() {
        let json = serde_json::to_string(&RecurringType::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");

        let parsed: RecurringType = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, RecurringType::Daily);
    }

    #[test]
    fn test_is_owned_by() {
        let owner = Uuid::new_v4();
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id: owner,
            title: "Water plants".to_string(),
            description: None,
            completed: false,
            due_date: None,
            is_recurring: false,
            recurring_type: None,
            recurring_days: vec![],
            completed_dates: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(todo.is_owned_by(owner));
        assert!(!todo.is_owned_by(Uuid::new_v4()));
    }
}
