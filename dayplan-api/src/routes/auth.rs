/// Authentication endpoints
///
/// One sign-in endpoint covers three flows, selected by the request body:
/// anonymous sign-in (no credentials at all), sign-up (`flow = "signUp"`),
/// and sign-in (the default when credentials are present).
///
/// # Endpoints
///
/// - `POST /v1/auth/signin` - Sign in, sign up, or create an anonymous session
/// - `GET /v1/auth/me` - Current user for a valid token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use dayplan_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Which credential flow the client requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignInFlow {
    /// Authenticate an existing account
    SignIn,

    /// Create a new account
    SignUp,
}

/// Sign-in request
///
/// All fields optional: an empty body means anonymous sign-in.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,

    /// Credential flow; defaults to sign-in when credentials are present
    pub flow: Option<SignInFlow>,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID
    pub id: Uuid,

    /// Email (absent for anonymous accounts)
    pub email: Option<String>,

    /// Anonymous flag
    pub is_anonymous: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_anonymous: user.is_anonymous,
        }
    }
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    /// Bearer token (24h)
    pub access_token: String,

    /// The authenticated user
    pub user: UserInfo,
}

/// Sign-in endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/signin
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2hunter2",
///   "flow": "signUp"
/// }
/// ```
///
/// An empty object `{}` creates a fresh anonymous account and session.
///
/// # Errors
///
/// - `401 Unauthorized`: partial credentials, unknown email, or wrong password
/// - `409 Conflict`: sign-up with an email that already exists
/// - `422 Unprocessable Entity`: malformed email
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    req.validate()?;

    let user = match (req.email, req.password) {
        // Anonymous sign-in: a brand-new account per call.
        (None, None) => {
            let user = User::create(&state.db, CreateUser::anonymous()).await?;
            tracing::info!(user_id = %user.id, "Anonymous sign-in");
            user
        }

        (Some(email), Some(pass)) => match req.flow {
            Some(SignInFlow::SignUp) => {
                if User::find_by_email(&state.db, &email).await?.is_some() {
                    return Err(ApiError::Conflict("User already exists".to_string()));
                }

                let password_hash = password::hash_password(&pass)?;
                let user =
                    User::create(&state.db, CreateUser::registered(email, password_hash)).await?;
                tracing::info!(user_id = %user.id, "User signed up");
                user
            }
            _ => {
                let user = User::find_by_email(&state.db, &email)
                    .await?
                    .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

                // Registered accounts always carry a hash; treat a missing one
                // like a failed login rather than an internal error.
                let hash = user
                    .password_hash
                    .as_deref()
                    .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

                if !password::verify_password(&pass, hash)? {
                    return Err(ApiError::Unauthorized("Invalid password".to_string()));
                }

                tracing::info!(user_id = %user.id, "User signed in");
                user
            }
        },

        _ => {
            return Err(ApiError::Unauthorized(
                "Email and password are required".to_string(),
            ))
        }
    };

    let claims = jwt::Claims::new(user.id, user.is_anonymous);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(SignInResponse {
        access_token,
        user: UserInfo::from(&user),
    }))
}

/// Current-user endpoint
///
/// Resolves the authenticated token back to its account.
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token, or the account no longer exists
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserInfo>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    Ok(Json(UserInfo::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signin_flow_deserialization() {
        let req: SignInRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"pw","flow":"signUp"}"#,
        )
        .unwrap();
        assert_eq!(req.flow, Some(SignInFlow::SignUp));

        let req: SignInRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw","flow":"signIn"}"#).unwrap();
        assert_eq!(req.flow, Some(SignInFlow::SignIn));
    }

    #[test]
    fn test_empty_body_is_anonymous_request() {
        let req: SignInRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
        assert!(req.flow.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_malformed_email_fails_validation() {
        let req: SignInRequest =
            serde_json::from_str(r#"{"email":"not-an-email","password":"pw"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
