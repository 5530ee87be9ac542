//! Auth Middleware
//!
//! Bearer session check for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::SessionGate;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated caller, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Middleware that requires a valid bearer session
///
/// Rejects with 401 and `WWW-Authenticate: Bearer` when the header is
/// missing or malformed, the token does not validate, or its user is gone.
pub async fn require_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers())?;

    let gate = SessionGate::new(state.repo.clone(), state.issuer.clone());
    let user = gate.authorize(token).await?;

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
        user_name: user.user_name,
    });

    Ok(next.run(req).await)
}
