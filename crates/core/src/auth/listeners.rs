//! Subscription registry for auth state changes

use super::UserHandle;

/// Callback invoked with the signed-in user, or `None` when signed out
pub type AuthStateHandler = Box<dyn FnMut(Option<&UserHandle>)>;

/// Handle returned by a registration, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Fan-out of auth state events to any number of handlers.
///
/// Once a state is known, new handlers receive it immediately on registration.
/// Handlers run while the registry is borrowed, so they must not register or
/// unregister from inside the callback.
#[derive(Default)]
pub struct AuthStateListeners {
    next_id: u64,
    handlers: Vec<(SubscriptionToken, AuthStateHandler)>,
    current: Option<Option<UserHandle>>,
}

impl AuthStateListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mut handler: AuthStateHandler) -> SubscriptionToken {
        self.next_id += 1;
        let token = SubscriptionToken(self.next_id);
        if let Some(state) = &self.current {
            handler(state.as_ref());
        }
        self.handlers.push((token, handler));
        token
    }

    pub fn unregister(&mut self, token: SubscriptionToken) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(t, _)| *t != token);
        self.handlers.len() != before
    }

    /// Record a new state and notify every handler
    pub fn emit(&mut self, user: Option<UserHandle>) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(user.as_ref());
        }
        self.current = Some(user);
    }

    /// Whether the provider has reported any state yet
    pub fn has_state(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&UserHandle> {
        self.current.as_ref().and_then(|u| u.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for AuthStateListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStateListeners")
            .field("handlers", &self.handlers.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn user(email: &str) -> UserHandle {
        UserHandle {
            uid: email.to_string(),
            email: email.to_string(),
            email_verified: true,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<Option<String>>>>, AuthStateHandler) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let handler: AuthStateHandler =
            Box::new(move |u: Option<&UserHandle>| sink.borrow_mut().push(u.map(|u| u.email.clone())));
        (seen, handler)
    }

    #[test]
    fn every_handler_sees_events() {
        let mut listeners = AuthStateListeners::new();
        let (a, ha) = recorder();
        let (b, hb) = recorder();
        listeners.register(ha);
        listeners.register(hb);

        listeners.emit(Some(user("x@y.z")));
        listeners.emit(None);

        assert_eq!(*a.borrow(), vec![Some("x@y.z".to_string()), None]);
        assert_eq!(*a.borrow(), *b.borrow());
    }

    #[test]
    fn late_subscriber_gets_current_state() {
        let mut listeners = AuthStateListeners::new();
        listeners.emit(None);

        let (seen, handler) = recorder();
        listeners.register(handler);
        assert_eq!(*seen.borrow(), vec![None]);
        assert!(listeners.has_state());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut listeners = AuthStateListeners::new();
        let (seen, handler) = recorder();
        let token = listeners.register(handler);

        assert!(listeners.unregister(token));
        assert!(!listeners.unregister(token));
        listeners.emit(Some(user("a@b.c")));
        assert!(seen.borrow().is_empty());
        assert_eq!(listeners.current_user().map(|u| u.email.as_str()), Some("a@b.c"));
    }
}
