/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: sign-in flows and current-user lookup
/// - `todos`: create / list-by-date / toggle / delete

pub mod auth;
pub mod health;
pub mod todos;
