/// Middleware modules for the API server
///
/// - `security`: response headers applied to every route

pub mod security;
