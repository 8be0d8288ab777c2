/// Recurrence and completion engine
///
/// Pure calendar logic for deciding whether a todo is active on a given day
/// and whether it is completed on that day, plus the toggle operation that
/// mutates completion state. No I/O happens here; the service layer loads and
/// saves records around these functions.
///
/// All dates cross this boundary as epoch milliseconds. Days are bucketed at
/// local midnight: both sides of every comparison are normalized through
/// [`local_midnight_millis`] (or the calendar day it implies), so a todo
/// completed at 10:00 is still completed when queried at 23:59 the same day.
/// Weekdays are numbered 0 = Sunday through 6 = Saturday.
///
/// # Example
///
/// ```
/// use dayplan_shared::recurrence::is_active_on;
/// # use dayplan_shared::models::todo::{RecurringType, Todo};
/// # use chrono::Utc;
/// # use uuid::Uuid;
/// # let todo = Todo {
/// #     id: Uuid::new_v4(), user_id: Uuid::new_v4(), title: "t".into(),
/// #     description: None, completed: false, due_date: None,
/// #     is_recurring: true, recurring_type: Some(RecurringType::Daily),
/// #     recurring_days: vec![], completed_dates: vec![],
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// // A daily todo is active on any date.
/// assert!(is_active_on(&todo, 1_700_000_000_000));
/// ```

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::models::todo::{RecurringType, Todo};

/// Normalizes a timestamp to the local midnight of the day it falls on
///
/// Returns the epoch milliseconds of that midnight. Completed-date set
/// entries are stored in this form and membership tests use the same
/// normalization, so the two can never disagree on what "the same day" means.
///
/// DST can make local midnight nonexistent; in that case the raw input is
/// returned unchanged.
pub fn local_midnight_millis(ts_millis: i64) -> i64 {
    let day = local_day(ts_millis);
    day.and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(ts_millis)
}

/// Day-of-week for a timestamp, 0 = Sunday .. 6 = Saturday
pub fn weekday_number(ts_millis: i64) -> u32 {
    local_day(ts_millis).weekday().num_days_from_sunday()
}

/// Local calendar day a timestamp falls on
fn local_day(ts_millis: i64) -> NaiveDate {
    Local
        .timestamp_millis_opt(ts_millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Decides whether `todo` is active on the day `date_millis` falls on
///
/// - One-off with a due date: active iff the due date falls on the same local
///   calendar day (time-of-day discarded on both sides).
/// - One-off without a due date: always active.
/// - Recurring daily: active every day.
/// - Recurring weekly: active iff the day's weekday is in `recurring_days`;
///   an empty day set means never active.
/// - Recurring without a kind: never active.
pub fn is_active_on(todo: &Todo, date_millis: i64) -> bool {
    if !todo.is_recurring {
        return match todo.due_date {
            Some(due) => local_day(due) == local_day(date_millis),
            None => true,
        };
    }

    match todo.recurring_type {
        Some(RecurringType::Daily) => true,
        Some(RecurringType::Weekly) => {
            let day = weekday_number(date_millis) as i32;
            todo.recurring_days.contains(&day)
        }
        None => false,
    }
}

/// Decides whether `todo` is completed on the day `date_millis` falls on
///
/// Recurring todos are completed on a day iff that day's local midnight is in
/// the completed-date set. One-off todos answer from the `completed` flag;
/// the date argument is ignored.
pub fn is_completed_on(todo: &Todo, date_millis: i64) -> bool {
    if todo.is_recurring {
        todo.completed_dates
            .contains(&local_midnight_millis(date_millis))
    } else {
        todo.completed
    }
}

/// Toggles completion state on `todo`
///
/// Recurring todo with a date: the normalized day is removed from the
/// completed-date set if present, inserted otherwise. Toggling twice with the
/// same date restores the original set.
///
/// Any other combination flips the `completed` flag. That includes a
/// recurring todo toggled without a date, which flips a flag nothing reads
/// for recurring todos; the fallthrough is kept on purpose to match the
/// established toggle semantics rather than erroring or ignoring the call.
pub fn toggle_completion(todo: &mut Todo, date_millis: Option<i64>) {
    match date_millis {
        Some(date) if todo.is_recurring => {
            let key = local_midnight_millis(date);
            if let Some(pos) = todo.completed_dates.iter().position(|&d| d == key) {
                todo.completed_dates.remove(pos);
            } else {
                todo.completed_dates.push(key);
            }
        }
        _ => todo.completed = !todo.completed,
    }
}
