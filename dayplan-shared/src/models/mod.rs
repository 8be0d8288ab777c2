/// Database models for Dayplan
///
/// # Models
///
/// - `user`: accounts, registered or anonymous
/// - `todo`: one-off and recurring tasks
///
/// User CRUD lives on the model (plain sqlx over the pool). Todo persistence
/// goes through the `store` module instead, so the core logic can run against
/// either storage adapter.

pub mod todo;
pub mod user;
