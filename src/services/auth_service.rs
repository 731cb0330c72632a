//! Authentication service - registration, login, and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{AccountStatus, Password, Profile, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ProfileRepository, UserRepository};
use crate::notify::Notifier;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Token plus the authenticated user, returned by register and login
#[derive(Debug)]
pub struct AuthSession {
    pub token: TokenResponse,
    pub user: User,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new student or company account (admins are provisioned
    /// out of band) and return a ready session.
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<AuthSession>;

    /// Login and return a session token.
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// Verify a JWT and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve the full user record for an authenticated id.
    async fn current_user(&self, id: Uuid) -> AppResult<User>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    notifier: Arc<dyn Notifier>,
    config: Config,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        Self {
            users,
            profiles,
            notifier,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<AuthSession> {
        // Admins cannot self-register
        if role == UserRole::Admin {
            return Err(AppError::validation("Cannot register an admin account"));
        }

        // Checked here first; the unique index on email backs this up
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let now = Utc::now();
        let user = self
            .users
            .create(User {
                id: Uuid::new_v4(),
                name,
                email,
                password_hash,
                role,
                status: AccountStatus::default_for(role),
                avatar: None,
                contact_number: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        // Every account gets an empty profile to fill in later
        self.profiles.create(Profile::empty(user.id)).await?;

        if let Err(err) = self.notifier.welcome(&user.email, &user.name, user.role).await {
            tracing::warn!(error = %err, "Failed to send welcome email");
        }

        let token = generate_token(&user, &self.config)?;
        Ok(AuthSession { token, user })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let user_result = self.users.find_by_email(&email).await?;

        // Verify against a dummy hash when the user doesn't exist so the
        // timing doesn't reveal which emails are registered.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.ok_or(AppError::InvalidCredentials)?;
        if user.is_blocked() {
            return Err(AppError::Forbidden);
        }

        let token = generate_token(&user, &self.config)?;
        Ok(AuthSession { token, user })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }
}
