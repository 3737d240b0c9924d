use serde::{Deserialize, Serialize};
use thiserror::Error;

use palmtrade_common::identity::{UserId, UserProfile, UserRole};

/// Why a sign-in attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("please fill in all fields")]
    MissingFields,
}

/// The signed-in user for one app session.
///
/// Credential checks are shape-only: any non-empty email/password pair is
/// accepted. The app simulates its backend, so there is nothing to verify
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    user: Option<UserProfile>,
    next_user_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            next_user_id: 1,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with an existing account. The display name is derived from
    /// the email local part.
    pub fn log_in(
        &mut self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<&UserProfile, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let name = email.split('@').next().unwrap_or(email).to_string();
        let profile = UserProfile {
            id: self.allocate_user_id(),
            email: email.to_string(),
            name,
            role,
        };
        Ok(self.user.insert(profile))
    }

    /// Create an account and sign in as it.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> Result<&UserProfile, AuthError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let profile = UserProfile {
            id: self.allocate_user_id(),
            email: email.to_string(),
            name: name.to_string(),
            role,
        };
        Ok(self.user.insert(profile))
    }

    pub fn log_out(&mut self) {
        self.user = None;
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    fn allocate_user_id(&mut self) -> UserId {
        let id = UserId(format!("u-{}", self.next_user_id));
        self.next_user_id += 1;
        id
    }
}
