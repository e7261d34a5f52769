//! Identity provider bridge
//!
//! The host page exposes the provider as `window.playdeckAuth` with promise
//! returning `signUp`, `signIn`, `signOut`, `sendVerificationEmail(uid)` and a
//! callback registration `onAuthStateChanged(cb)`. Rejections carry a `code`.

use async_trait::async_trait;
use playdeck_core::auth::{
    AuthProvider, AuthStateHandler, AuthStateListeners, SubscriptionToken, UserHandle,
};
use playdeck_core::AuthError;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = playdeckAuth, js_name = signUp, catch)]
    async fn js_sign_up(email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = playdeckAuth, js_name = signIn, catch)]
    async fn js_sign_in(email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = playdeckAuth, js_name = signOut, catch)]
    async fn js_sign_out() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = playdeckAuth, js_name = sendVerificationEmail, catch)]
    async fn js_send_verification_email(uid: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = playdeckAuth, js_name = onAuthStateChanged, catch)]
    fn js_on_auth_state_changed(callback: &Closure<dyn FnMut(JsValue)>) -> Result<(), JsValue>;
}

/// Shape of the provider's user object after `JSON.stringify`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsUser {
    uid: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

fn user_from_js(value: &JsValue) -> Option<UserHandle> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let json: String = js_sys::JSON::stringify(value).ok()?.into();
    match serde_json::from_str::<JsUser>(&json) {
        Ok(user) => Some(UserHandle {
            uid: user.uid,
            email: user.email.unwrap_or_default(),
            email_verified: user.email_verified,
        }),
        Err(e) => {
            tracing::warn!("Unrecognized user object from auth provider: {}", e);
            None
        }
    }
}

fn auth_error(value: JsValue) -> AuthError {
    let code = js_sys::Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_string())
        .unwrap_or_else(|| "unknown".to_string());
    AuthError::new(code)
}

/// AuthProvider backed by `window.playdeckAuth`
pub struct JsAuthProvider {
    listeners: Rc<RefCell<AuthStateListeners>>,
    _callback: Option<Closure<dyn FnMut(JsValue)>>,
}

impl JsAuthProvider {
    /// Hook into the page's provider. Without one, the visitor is treated as signed out.
    pub fn connect() -> Self {
        let listeners = Rc::new(RefCell::new(AuthStateListeners::new()));

        let sink = listeners.clone();
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            sink.borrow_mut().emit(user_from_js(&value));
        });

        let callback = match js_on_auth_state_changed(&callback) {
            Ok(()) => Some(callback),
            Err(e) => {
                tracing::warn!("No auth provider on page: {:?}", e);
                listeners.borrow_mut().emit(None);
                None
            }
        };

        Self {
            listeners,
            _callback: callback,
        }
    }

    fn signed_in_user(value: JsValue) -> Result<UserHandle, AuthError> {
        // Providers resolve with either the user or a credential wrapping it
        let user = js_sys::Reflect::get(&value, &JsValue::from_str("user"))
            .ok()
            .filter(|u| !u.is_undefined())
            .unwrap_or(value);
        user_from_js(&user).ok_or_else(|| AuthError::new("invalid-user"))
    }
}

#[async_trait(?Send)]
impl AuthProvider for JsAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserHandle, AuthError> {
        let value = js_sign_up(email, password).await.map_err(auth_error)?;
        Self::signed_in_user(value)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserHandle, AuthError> {
        let value = js_sign_in(email, password).await.map_err(auth_error)?;
        Self::signed_in_user(value)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        js_sign_out().await.map_err(auth_error)?;
        Ok(())
    }

    async fn send_verification_email(&self, user: &UserHandle) -> Result<(), AuthError> {
        js_send_verification_email(&user.uid).await.map_err(auth_error)?;
        Ok(())
    }

    fn on_auth_state_changed(&self, handler: AuthStateHandler) -> SubscriptionToken {
        self.listeners.borrow_mut().register(handler)
    }

    fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.listeners.borrow_mut().unregister(token)
    }
}
