use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// The authenticated identity supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Trait for the authentication collaborator
///
/// The core consumes only "current user id, or absence thereof"; the
/// sign-in surface exists so a front end can drive the whole lifecycle
/// through one seam.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    async fn sign_out(&self) -> Result<()>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;
}

/// Fixed-identity provider for local runs and tests. Real deployments back
/// this trait with their identity service.
pub struct StaticAuthProvider {
    user: Mutex<Option<AuthUser>>,
}

impl StaticAuthProvider {
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.lock().expect("auth state poisoned").clone()
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthUser> {
        let user = AuthUser::new(email).with_email(email);
        *self.user.lock().expect("auth state poisoned") = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.user.lock().expect("auth state poisoned") = None;
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        tracing::info!(email, "password reset requested (static provider, no-op)");
        Ok(())
    }
}
