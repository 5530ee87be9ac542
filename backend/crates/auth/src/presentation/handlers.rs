//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, RegisterInput,
    RegisterUseCase, TokenIssuer, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthenticateRequest, AuthenticateResponse, RegisterRequest, UpdateUserRequest, UserSummary,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub issuer: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Fails when the config cannot produce a token issuer
    pub fn new(repo: R, config: AuthConfig) -> AuthResult<Self> {
        let issuer = TokenIssuer::new(&config)?;
        Ok(Self {
            repo: Arc::new(repo),
            issuer: Arc::new(issuer),
        })
    }
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /api/auth/authenticate
pub async fn authenticate<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<AuthenticateRequest>,
) -> AuthResult<Json<AuthenticateResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone());

    let input = AuthenticateInput {
        user_name: req.user_name,
        password: req.password,
    };

    let user = use_case
        .execute(input)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let issued = state.issuer.issue(&user.user_id)?;

    Ok(Json(AuthenticateResponse {
        id: user.user_id.into_uuid(),
        user_name: user.user_name.into(),
        first_name: user.first_name,
        last_name: user.last_name,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        user_id: None,
        user_name: req.user_name,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
    };

    use_case.execute(input).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Users (session required)
// ============================================================================

/// GET /api/auth/users/{id}
///
/// Responds with `null` when the user does not exist.
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<Option<UserSummary>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetUserUseCase::new(state.repo.clone());

    let user = use_case.execute(&UserId::from_uuid(id)).await?;

    Ok(Json(user.map(UserSummary::from)))
}

/// PUT /api/auth/users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateUserUseCase::new(state.repo.clone());

    let input = UpdateUserInput {
        user_id: UserId::from_uuid(id),
        user_name: req.user_name,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
    };

    tracing::debug!(actor = %current.user_id, target = %id, "Update user requested");
    use_case.execute(input).await?;

    Ok(StatusCode::OK)
}

/// DELETE /api/auth/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteUserUseCase::new(state.repo.clone());

    tracing::debug!(actor = %current.user_id, target = %id, "Delete user requested");
    use_case.execute(&UserId::from_uuid(id)).await?;

    Ok(StatusCode::OK)
}
