/// Authentication context for request handling
///
/// After the API server validates a bearer token, it builds an [`AuthContext`]
/// and stores it in the request's extensions. Handlers extract it and pass
/// `user_id` explicitly into the todo service; nothing downstream reads
/// ambient request state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Authentication context added to request extensions
///
/// # Example
///
/// ```
/// use dayplan_shared::auth::jwt::Claims;
/// use dayplan_shared::auth::middleware::AuthContext;
/// use uuid::Uuid;
///
/// let claims = Claims::new(Uuid::new_v4(), false);
/// let ctx = AuthContext::from_claims(&claims);
/// assert_eq!(ctx.user_id, claims.sub);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Whether the account is anonymous
    pub is_anonymous: bool,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            is_anonymous: claims.is_anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, true);

        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, user_id);
        assert!(ctx.is_anonymous);
    }
}
