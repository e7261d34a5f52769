//! Transient status messages shown in the sign-in modal

use chrono::{DateTime, Duration, Utc};

/// How long a notice stays visible unless configured otherwise
pub const DEFAULT_NOTICE_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthNotice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: DateTime<Utc>,
}

impl AuthNotice {
    pub fn new(text: impl Into<String>, kind: NoticeKind, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_ttl() {
        let now = Utc::now();
        let notice = AuthNotice::new("hi", NoticeKind::Success, now, Duration::seconds(DEFAULT_NOTICE_SECONDS));
        assert!(!notice.is_expired(now + Duration::seconds(4)));
        assert!(notice.is_expired(now + Duration::seconds(5)));
    }
}
