use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use secrecy::SecretString;
use uuid::Uuid;

use toolhub_auth_types::token::{SESSION_TTL_SECS, issue_session_token};

use crate::domain::repository::UserRepository;
use crate::domain::secret::SecretHasher;
use crate::domain::types::User;
use crate::error::CatalogError;

fn now_secs() -> Result<u64, CatalogError> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();
    Ok(secs)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user: User,
    /// Signed session token for the `toolhub_session` cookie.
    pub token: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub hasher: SecretHasher,
    pub session_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, CatalogError> {
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(CatalogError::InvalidInput(
                "email and password are required".to_owned(),
            ));
        }

        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;
        let matches = self
            .hasher
            .verify_blocking(
                SecretString::from(input.password),
                user.password_hash.clone(),
            )
            .await?;
        if !matches {
            return Err(CatalogError::InvalidCredentials);
        }

        let exp = now_secs()? + SESSION_TTL_SECS;
        let token = issue_session_token(user.id, user.role, exp, &self.session_secret)
            .context("sign session token")?;
        tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok(LoginOutput { user, token })
    }
}

// ── CurrentUser ──────────────────────────────────────────────────────────────

pub struct GetCurrentUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetCurrentUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, CatalogError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}
