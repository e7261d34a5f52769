//! Identity provider integration
//!
//! The provider itself is external. This module defines the interface PlayDeck
//! consumes, the error-code message table, and the sign-in modal logic.

mod gate;
mod listeners;
mod notice;

pub use gate::*;
pub use listeners::*;
pub use notice::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Signed-in account as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHandle {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
}

impl UserHandle {
    /// Name shown on the account button: the local part of the email
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Operations PlayDeck needs from the identity provider
#[async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserHandle, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserHandle, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn send_verification_email(&self, user: &UserHandle) -> Result<(), AuthError>;

    /// Register for auth state changes. The handler fires at least once with
    /// the current state.
    fn on_auth_state_changed(&self, handler: AuthStateHandler) -> SubscriptionToken;

    /// Drop a registration; returns false for an unknown token
    fn unsubscribe(&self, token: SubscriptionToken) -> bool;
}

/// Which tab of the sign-in modal is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Welcome Back!",
            AuthMode::SignUp => "Join the Fun!",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }
}

pub const GENERIC_AUTH_MESSAGE: &str = "An error occurred. Please try again.";

/// Map a provider error code to user-facing text. Codes may carry the `auth/` prefix.
pub fn message_for_code(code: &str) -> &'static str {
    let code = code.strip_prefix("auth/").unwrap_or(code);
    match code {
        "email-already-in-use" => "This email is already registered. Try signing in instead.",
        "weak-password" => "Password should be at least 6 characters long.",
        "invalid-email" => "Please enter a valid email address.",
        "user-not-found" => "No account found with this email. Try signing up instead.",
        "wrong-password" => "Incorrect password. Please try again.",
        "too-many-requests" => "Too many failed attempts. Please try again later.",
        _ => GENERIC_AUTH_MESSAGE,
    }
}

/// Result of submitting the sign-in modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    SignedUp(UserHandle),
    SignedIn(UserHandle),
    Failed(AuthError),
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::SignedUp(_) => {
                "Account created! Please check your email to verify your account."
            }
            SubmitOutcome::SignedIn(_) => "Welcome back! Signed in successfully.",
            SubmitOutcome::Failed(e) => e.message(),
        }
    }

    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            SubmitOutcome::Failed(_) => NoticeKind::Error,
            _ => NoticeKind::Success,
        }
    }
}

/// Run the modal's submit action against the provider.
///
/// Sign-up also sends the verification email; a failure there is reported like
/// any other provider error.
pub async fn submit_credentials<P: AuthProvider + ?Sized>(
    provider: &P,
    mode: AuthMode,
    email: &str,
    password: &str,
) -> SubmitOutcome {
    let email = email.trim();
    match mode {
        AuthMode::SignUp => {
            let user = match provider.sign_up(email, password).await {
                Ok(user) => user,
                Err(e) => return SubmitOutcome::Failed(e),
            };
            match provider.send_verification_email(&user).await {
                Ok(()) => SubmitOutcome::SignedUp(user),
                Err(e) => SubmitOutcome::Failed(e),
            }
        }
        AuthMode::SignIn => match provider.sign_in(email, password).await {
            Ok(user) => SubmitOutcome::SignedIn(user),
            Err(e) => SubmitOutcome::Failed(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAuthProvider, RecordedAuthCall};

    #[test]
    fn known_codes_have_messages() {
        for code in [
            "auth/email-already-in-use",
            "auth/weak-password",
            "auth/invalid-email",
            "auth/user-not-found",
            "auth/wrong-password",
            "too-many-requests",
        ] {
            assert_ne!(message_for_code(code), GENERIC_AUTH_MESSAGE, "code {}", code);
        }
    }

    #[test]
    fn unknown_code_is_generic() {
        assert_eq!(message_for_code("auth/network-request-failed"), GENERIC_AUTH_MESSAGE);
        assert_eq!(message_for_code(""), GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn display_name_is_local_part() {
        let user = UserHandle {
            uid: "u1".into(),
            email: "ada@example.com".into(),
            email_verified: true,
        };
        assert_eq!(user.display_name(), "ada");
    }

    #[tokio::test]
    async fn sign_up_sends_verification() {
        let provider = MockAuthProvider::new();
        let outcome =
            submit_credentials(&provider, AuthMode::SignUp, " new@example.com ", "hunter22").await;

        assert!(matches!(outcome, SubmitOutcome::SignedUp(ref u) if u.email == "new@example.com"));
        assert_eq!(outcome.notice_kind(), NoticeKind::Success);
        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[1], RecordedAuthCall::SendVerification { .. }));
    }

    #[tokio::test]
    async fn sign_in_failure_maps_code() {
        let provider = MockAuthProvider::new();
        provider.fail_next("auth/wrong-password");

        let outcome = submit_credentials(&provider, AuthMode::SignIn, "a@b.c", "nope").await;
        assert_eq!(outcome.message(), "Incorrect password. Please try again.");
        assert_eq!(outcome.notice_kind(), NoticeKind::Error);
    }

    #[tokio::test]
    async fn failed_sign_up_skips_verification() {
        let provider = MockAuthProvider::new();
        provider.fail_next("auth/email-already-in-use");

        let outcome = submit_credentials(&provider, AuthMode::SignUp, "a@b.c", "pw123456").await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(provider.calls().len(), 1);
    }
}
