//! Mock identity provider

use async_trait::async_trait;
use std::cell::RefCell;

use crate::auth::{AuthProvider, AuthStateHandler, AuthStateListeners, SubscriptionToken, UserHandle};
use crate::error::AuthError;

/// A recorded provider call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedAuthCall {
    SignUp { email: String },
    SignIn { email: String },
    SignOut,
    SendVerification { email: String },
}

/// Mock implementation of the AuthProvider trait.
///
/// - Sign-up and sign-in succeed with an account for the given email
/// - `fail_next` makes the next call fail with a provider code
/// - Successful calls emit auth state events to subscribers
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    calls: RefCell<Vec<RecordedAuthCall>>,
    next_error: RefCell<Option<AuthError>>,
    listeners: RefCell<AuthStateListeners>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, code: &str) {
        *self.next_error.borrow_mut() = Some(AuthError::new(code));
    }

    pub fn calls(&self) -> Vec<RecordedAuthCall> {
        self.calls.borrow().clone()
    }

    /// Simulate the provider's initial state report
    pub fn emit(&self, user: Option<UserHandle>) {
        self.listeners.borrow_mut().emit(user);
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn record(&self, call: RecordedAuthCall) -> Result<(), AuthError> {
        self.calls.borrow_mut().push(call);
        match self.next_error.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn account(email: &str, verified: bool) -> UserHandle {
        UserHandle {
            uid: format!("uid-{}", email),
            email: email.to_string(),
            email_verified: verified,
        }
    }
}

#[async_trait(?Send)]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<UserHandle, AuthError> {
        self.record(RecordedAuthCall::SignUp { email: email.to_string() })?;
        let user = Self::account(email, false);
        self.emit(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<UserHandle, AuthError> {
        self.record(RecordedAuthCall::SignIn { email: email.to_string() })?;
        let user = Self::account(email, true);
        self.emit(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record(RecordedAuthCall::SignOut)?;
        self.emit(None);
        Ok(())
    }

    async fn send_verification_email(&self, user: &UserHandle) -> Result<(), AuthError> {
        self.record(RecordedAuthCall::SendVerification { email: user.email.clone() })
    }

    fn on_auth_state_changed(&self, handler: AuthStateHandler) -> SubscriptionToken {
        self.listeners.borrow_mut().register(handler)
    }

    fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.listeners.borrow_mut().unregister(token)
    }
}
