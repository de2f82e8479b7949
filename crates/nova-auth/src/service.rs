//! Registration, login, and token verification.

use std::sync::Arc;

use tracing::info;

use nova_core::defaults::MIN_PASSWORD_CHARS;
use nova_core::{Error, PublicUser, Result, UserRepository};

use crate::password::{hash_password, verify_password};
use crate::token::TokenSigner;

/// Uniform login failure: the same message whether the email is unknown or
/// the password is wrong, so responses never leak account existence.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// A successful registration or login: public user fields plus a session
/// token. The password hash never appears here.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: PublicUser,
    pub token: String,
}

/// Credential service over a pluggable user repository.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenSigner,
}

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err(Error::Validation(
            "Username must be between 3 and 30 characters".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::Validation(
            "Username can only contain letters, numbers, underscores and hyphens".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(Error::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

impl AuthService {
    /// Create the service over a user repository and token signer.
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenSigner) -> Self {
        Self { users, tokens }
    }

    /// Register a new account. Fails `Conflict` on a taken email or
    /// username, `Validation` on malformed input.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession> {
        let username = username.trim();
        let email = email.trim();

        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(Error::Conflict("Email already in use".to_string()));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(Error::Conflict("Username already in use".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self.users.create(username, email, &password_hash).await?;

        info!(
            subsystem = "auth",
            component = "service",
            op = "register",
            user_id = %user.id,
            "User registered"
        );

        let token = self.tokens.issue(&user)?;
        Ok(AuthSession {
            user: user.into(),
            token,
        })
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(Error::Unauthorized(BAD_CREDENTIALS.to_string())),
        };

        if !verify_password(password, &user.password_hash) {
            return Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        info!(
            subsystem = "auth",
            component = "service",
            op = "login",
            user_id = %user.id,
            "User logged in"
        );

        let token = self.tokens.issue(&user)?;
        Ok(AuthSession {
            user: user.into(),
            token,
        })
    }

    /// Verify a token and confirm the user still exists.
    pub async fn verify(&self, token: &str) -> Result<PublicUser> {
        let claims = self.tokens.verify(token)?;
        match self.users.find_by_id(claims.sub).await? {
            Some(user) => Ok(user.into()),
            None => Err(Error::Unauthorized(
                "User not found. Please log in again.".to_string(),
            )),
        }
    }

    /// Stateless token check for request extractors: signature and expiry
    /// only, no database round-trip.
    pub fn verify_token(&self, token: &str) -> Result<crate::token::Claims> {
        self.tokens.verify(token)
    }
}
