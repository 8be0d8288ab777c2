/// Integration tests for the todo service
///
/// These run the full create / list / toggle / delete flow against the
/// in-memory store, so they need no external services. Date handling uses the
/// process-local timezone, the same clock the engine itself uses.

use chrono::{Local, TimeZone};
use uuid::Uuid;

use dayplan_shared::models::todo::{CreateTodo, RecurringType};
use dayplan_shared::service::{create_todo, delete_todo, todos_for_date, toggle_todo, TodoError};
use dayplan_shared::store::memory::MemTodoStore;
use dayplan_shared::store::TodoStore;

/// Epoch millis for a local wall-clock time
fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid local time")
        .timestamp_millis()
}

fn one_off(title: &str, due_date: Option<i64>) -> CreateTodo {
    CreateTodo {
        user_id: Uuid::nil(),
        title: title.to_string(),
        description: None,
        due_date,
        is_recurring: false,
        recurring_type: None,
        recurring_days: vec![],
    }
}

fn weekly(title: &str, days: Vec<i32>) -> CreateTodo {
    CreateTodo {
        user_id: Uuid::nil(),
        title: title.to_string(),
        description: None,
        due_date: None,
        is_recurring: true,
        recurring_type: Some(RecurringType::Weekly),
        recurring_days: days,
    }
}

#[tokio::test]
async fn water_plants_appears_on_listed_weekdays_only() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    create_todo(&store, user, weekly("Water plants", vec![1, 3, 5]))
        .await
        .unwrap();

    // 2024-03-04 was a Monday (day 1): listed.
    let monday = todos_for_date(&store, user, at(2024, 3, 4, 9, 0)).await.unwrap();
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].todo.title, "Water plants");

    // 2024-03-03 was a Sunday (day 0): not listed.
    let sunday = todos_for_date(&store, user, at(2024, 3, 3, 9, 0)).await.unwrap();
    assert!(sunday.is_empty());
}

#[tokio::test]
async fn pay_rent_is_active_for_the_whole_due_day() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    // Due March 5 at 10:00.
    create_todo(&store, user, one_off("Pay rent", Some(at(2024, 3, 5, 10, 0))))
        .await
        .unwrap();

    for query in [at(2024, 3, 5, 0, 0), at(2024, 3, 5, 23, 59)] {
        let listed = todos_for_date(&store, user, query).await.unwrap();
        assert_eq!(listed.len(), 1, "due day query at {} should match", query);
    }

    let next_day = todos_for_date(&store, user, at(2024, 3, 6, 0, 0)).await.unwrap();
    assert!(next_day.is_empty());
}

#[tokio::test]
async fn toggling_an_occurrence_twice_round_trips() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    let todo = create_todo(&store, user, weekly("Water plants", vec![0, 1, 2, 3, 4, 5, 6]))
        .await
        .unwrap();

    let monday_morning = at(2024, 3, 4, 8, 0);
    let monday_evening = at(2024, 3, 4, 22, 0);

    let toggled = toggle_todo(&store, user, todo.id, Some(monday_morning))
        .await
        .unwrap();
    assert_eq!(toggled.completed_dates.len(), 1);

    // Same day, different wall-clock time: removes the same entry.
    let toggled = toggle_todo(&store, user, todo.id, Some(monday_evening))
        .await
        .unwrap();
    assert!(toggled.completed_dates.is_empty());
}

#[tokio::test]
async fn occurrence_completion_is_per_day() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    let todo = create_todo(&store, user, weekly("Water plants", vec![1, 3]))
        .await
        .unwrap();

    // Complete Monday's occurrence.
    toggle_todo(&store, user, todo.id, Some(at(2024, 3, 4, 9, 0)))
        .await
        .unwrap();

    let monday = todos_for_date(&store, user, at(2024, 3, 4, 20, 0)).await.unwrap();
    assert!(monday[0].completed_on);

    // Wednesday's occurrence is untouched.
    let wednesday = todos_for_date(&store, user, at(2024, 3, 6, 9, 0)).await.unwrap();
    assert!(!wednesday[0].completed_on);
}

#[tokio::test]
async fn toggle_without_date_flips_flag_even_for_recurring() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    let todo = create_todo(&store, user, weekly("Water plants", vec![1]))
        .await
        .unwrap();

    let toggled = toggle_todo(&store, user, todo.id, None).await.unwrap();

    // The flag flips; the occurrence set stays empty and per-day completion
    // still reads false.
    assert!(toggled.completed);
    assert!(toggled.completed_dates.is_empty());

    let monday = todos_for_date(&store, user, at(2024, 3, 4, 9, 0)).await.unwrap();
    assert!(!monday[0].completed_on);
}

#[tokio::test]
async fn foreign_todo_is_forbidden_and_unchanged() {
    let store = MemTodoStore::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let todo = create_todo(&store, owner, one_off("Pay rent", None)).await.unwrap();

    let result = toggle_todo(&store, intruder, todo.id, None).await;
    assert!(matches!(result, Err(TodoError::Forbidden)));

    let result = delete_todo(&store, intruder, todo.id).await;
    assert!(matches!(result, Err(TodoError::Forbidden)));

    let loaded = store.load_todo_by_id(todo.id).await.unwrap().unwrap();
    assert!(!loaded.completed);
}

#[tokio::test]
async fn empty_title_is_rejected_without_persisting() {
    let store = MemTodoStore::new();

    let result = create_todo(&store, Uuid::new_v4(), one_off("  ", None)).await;
    assert!(matches!(result, Err(TodoError::Validation(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn completed_dates_accumulate_without_expiry() {
    let store = MemTodoStore::new();
    let user = Uuid::new_v4();

    let todo = create_todo(&store, user, weekly("Water plants", vec![0, 1, 2, 3, 4, 5, 6]))
        .await
        .unwrap();

    // A year of daily completions stays in the record; nothing compacts it.
    for day_offset in 0..365 {
        let date = at(2024, 1, 1, 9, 0) + day_offset * 24 * 60 * 60 * 1000;
        toggle_todo(&store, user, todo.id, Some(date)).await.unwrap();
    }

    let loaded = store.load_todo_by_id(todo.id).await.unwrap().unwrap();
    assert_eq!(loaded.completed_dates.len(), 365);
}
