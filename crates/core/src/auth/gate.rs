//! Sign-in modal visibility

use chrono::{DateTime, Duration, Utc};

use super::{AuthMode, AuthNotice, NoticeKind, SubmitOutcome, UserHandle, DEFAULT_NOTICE_SECONDS};

/// Persistent "don't ask me to sign in" flag
pub trait SkipFlagStore {
    fn is_skipped(&self) -> bool;
    fn set_skipped(&mut self, skipped: bool);
}

pub const SKIP_NOTICE: &str = "You can always sign up later to save your progress!";
pub const VERIFY_EMAIL_NOTICE: &str = "Please check your email and verify your account.";

/// Decides when the sign-in modal is shown.
///
/// The modal stays hidden until the provider reports its first auth state, then
/// opens for signed-out visitors who have not chosen to skip.
#[derive(Debug, Clone)]
pub struct AuthGate {
    open: bool,
    resolved: bool,
    mode: AuthMode,
    notice: Option<AuthNotice>,
    notice_ttl: Duration,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTICE_SECONDS))
    }
}

impl AuthGate {
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            open: false,
            resolved: false,
            mode: AuthMode::default(),
            notice: None,
            notice_ttl,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    /// Current notice, if it has not expired
    pub fn notice(&self, now: DateTime<Utc>) -> Option<&AuthNotice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop an expired notice; returns true if one was removed
    pub fn prune_notice(&mut self, now: DateTime<Utc>) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
            return true;
        }
        false
    }

    fn post(&mut self, text: &str, kind: NoticeKind, now: DateTime<Utc>) {
        self.notice = Some(AuthNotice::new(text, kind, now, self.notice_ttl));
    }

    /// Feed an auth state event from the provider
    pub fn on_auth_state(&mut self, user: Option<&UserHandle>, skipped: bool, now: DateTime<Utc>) {
        let first = !self.resolved;
        self.resolved = true;

        match user {
            None => {
                if first && !skipped {
                    self.open = true;
                }
            }
            Some(user) => {
                if !user.email_verified {
                    self.post(VERIFY_EMAIL_NOTICE, NoticeKind::Success, now);
                }
            }
        }
    }

    /// Open from the account button
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Dismiss without remembering the choice
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Dismiss and remember not to prompt again
    pub fn skip(&mut self, flags: &mut dyn SkipFlagStore, now: DateTime<Utc>) {
        self.open = false;
        flags.set_skipped(true);
        self.post(SKIP_NOTICE, NoticeKind::Success, now);
    }

    /// Apply the result of a submit; a successful sign-in closes the modal
    pub fn on_submit(&mut self, outcome: &SubmitOutcome, now: DateTime<Utc>) {
        if matches!(outcome, SubmitOutcome::SignedIn(_)) {
            self.open = false;
        }
        self.post(outcome.message(), outcome.notice_kind(), now);
    }
}
