//! Application Layer
//!
//! Use cases, token issuing and the session gate.

pub mod authenticate;
pub mod config;
pub mod delete_user;
pub mod get_user;
pub mod register;
pub mod session_gate;
pub mod token;
pub mod update_user;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateUseCase};
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use session_gate::SessionGate;
pub use token::{Claims, IssuedToken, TokenIssuer};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_register_login_delete_flow() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let issuer = Arc::new(TokenIssuer::new(&AuthConfig::with_random_secret()).unwrap());
        let gate = SessionGate::new(repo.clone(), issuer.clone());
        let authenticate = AuthenticateUseCase::new(repo.clone());

        let alice = RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                user_id: None,
                user_name: "alice".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        let wrong = authenticate
            .execute(AuthenticateInput {
                user_name: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());

        let user = authenticate
            .execute(AuthenticateInput {
                user_name: "alice".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_id, alice.user_id);
        let token = issuer.issue(&user.user_id).unwrap().token;

        let session_user = gate.authorize(&token).await.unwrap();
        assert_eq!(session_user.user_id, alice.user_id);
        assert_eq!(session_user.user_name.as_str(), "alice");

        DeleteUserUseCase::new(repo.clone())
            .execute(&alice.user_id)
            .await
            .unwrap();

        assert!(matches!(
            gate.authorize(&token).await,
            Err(AuthError::Unauthorized)
        ));
        assert_eq!(issuer.validate(&token).unwrap(), alice.user_id);
    }
}
