use std::cell::{Cell, RefCell};

use super::*;
use crate::tokens::{ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY};
use crate::user::{PasswordChange, PasswordReset, ProfileUpdate, Role};

/// Scripted backend that records every call.
struct FakeApi {
    whoami: Result<User, ApiError>,
    login: Result<LoginResponse, ApiError>,
    logout: Result<(), ApiError>,
    change_password: Result<(), ApiError>,
    whoami_calls: Cell<usize>,
    login_calls: Cell<usize>,
    register_calls: Cell<usize>,
    account_calls: Cell<usize>,
    seen_updates: RefCell<Vec<ProfileUpdate>>,
    seen_tokens: RefCell<Vec<String>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            whoami: Ok(student()),
            login: Ok(LoginResponse {
                access_token: "fresh-access".to_owned(),
                refresh_token: "fresh-refresh".to_owned(),
                token_type: "bearer".to_owned(),
                expires_in: 1800,
                user: student(),
            }),
            logout: Ok(()),
            change_password: Ok(()),
            whoami_calls: Cell::new(0),
            login_calls: Cell::new(0),
            register_calls: Cell::new(0),
            account_calls: Cell::new(0),
            seen_updates: RefCell::new(Vec::new()),
            seen_tokens: RefCell::new(Vec::new()),
        }
    }

    fn whoami_returns(mut self, result: Result<User, ApiError>) -> Self {
        self.whoami = result;
        self
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeApi {
    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        self.whoami_calls.set(self.whoami_calls.get() + 1);
        self.seen_tokens.borrow_mut().push(access_token.to_owned());
        self.whoami.clone()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.login_calls.set(self.login_calls.get() + 1);
        self.login.clone()
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        self.register_calls.set(self.register_calls.get() + 1);
        Ok(User::new("new", registration.role))
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        self.seen_tokens.borrow_mut().push(access_token.to_owned());
        self.logout.clone()
    }

    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.account_calls.set(self.account_calls.get() + 1);
        self.seen_tokens.borrow_mut().push(access_token.to_owned());
        self.seen_updates.borrow_mut().push(update.clone());
        let mut user = student();
        if let Some(name) = &update.full_name {
            user.full_name = Some(name.clone());
        }
        Ok(user)
    }

    async fn change_password(&self, access_token: &str, _change: &PasswordChange) -> Result<(), ApiError> {
        self.account_calls.set(self.account_calls.get() + 1);
        self.seen_tokens.borrow_mut().push(access_token.to_owned());
        self.change_password.clone()
    }

    async fn forgot_password(&self, _reset: &PasswordReset) -> Result<(), ApiError> {
        self.account_calls.set(self.account_calls.get() + 1);
        Ok(())
    }
}

/// Store whose access-token delete always fails.
#[derive(Default)]
struct StuckAccessStore {
    inner: MemoryTokenStore,
}

impl TokenStore for StuckAccessStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        if key == ACCESS_TOKEN_KEY {
            return Err(TokenStoreError::Unavailable);
        }
        self.inner.remove(key)
    }
}

fn student() -> User {
    serde_json::from_str(r#"{"id":"u1","role":"student"}"#).unwrap()
}

fn credentials() -> Credentials {
    Credentials { email: "s@school.org".to_owned(), password: "secret-pass".to_owned() }
}

// =============================================================================
// verify_session
// =============================================================================

#[tokio::test]
async fn no_token_makes_no_call_and_yields_no_user() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();

    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome, SessionOutcome::NoToken);
    assert!(outcome.user().is_none());
    assert_eq!(api.whoami_calls.get(), 0);
}

#[tokio::test]
async fn valid_token_yields_user_and_keeps_tokens() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new();

    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome.user(), Some(&student()));
    assert_eq!(api.whoami_calls.get(), 1);
    assert_eq!(api.seen_tokens.borrow().as_slice(), ["abc".to_owned()]);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
}

#[tokio::test]
async fn non_success_status_clears_tokens() {
    for status in [400, 401, 403, 500, 503] {
        let store = MemoryTokenStore::with_pair("expired", "r1");
        let api = FakeApi::new().whoami_returns(Err(ApiError::Status(status)));

        let outcome = verify_session(&store, &api).await;

        assert_eq!(outcome, SessionOutcome::Rejected(RejectReason::Status(status)));
        assert!(outcome.user().is_none());
        assert!(store.is_empty(), "tokens left behind after {status}");
        assert_eq!(api.whoami_calls.get(), 1);
    }
}

#[tokio::test]
async fn transport_error_clears_tokens_like_a_rejection() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new().whoami_returns(Err(ApiError::Transport("connection refused".to_owned())));

    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome, SessionOutcome::Rejected(RejectReason::Transport("connection refused".to_owned())));
    assert!(outcome.into_user().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn decode_error_clears_tokens() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new().whoami_returns(Err(ApiError::Decode("missing field `role`".to_owned())));

    let outcome = verify_session(&store, &api).await;

    assert!(matches!(outcome, SessionOutcome::Rejected(RejectReason::Decode(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn failure_is_never_retried() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new().whoami_returns(Err(ApiError::Status(502)));

    let _ = verify_session(&store, &api).await;

    assert_eq!(api.whoami_calls.get(), 1);
}

#[tokio::test]
async fn rejection_is_reported_even_when_tokens_cannot_be_cleared() {
    let store = StuckAccessStore::default();
    store_pair_for(&store);
    let api = FakeApi::new().whoami_returns(Err(ApiError::Status(401)));

    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome, SessionOutcome::Rejected(RejectReason::Status(401)));
    assert!(outcome.user().is_none());
    assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
}

fn store_pair_for<S: TokenStore>(store: &S) {
    let pair = TokenPair { access_token: "abc".to_owned(), refresh_token: "r1".to_owned() };
    tokens::store_pair(store, &pair).unwrap();
}

#[tokio::test]
async fn refresh_token_alone_does_not_restore_session() {
    let store = MemoryTokenStore::new();
    store.set(REFRESH_TOKEN_KEY, "r1").unwrap();
    let api = FakeApi::new();

    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome, SessionOutcome::NoToken);
    assert_eq!(api.whoami_calls.get(), 0);
}

// =============================================================================
// login / register / logout
// =============================================================================

#[tokio::test]
async fn login_stores_both_tokens_and_returns_user() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();

    let user = login(&store, &api, &credentials()).await.unwrap();

    assert_eq!(user, student());
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("fresh-access"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("fresh-refresh"));
}

#[tokio::test]
async fn login_with_invalid_credentials_makes_no_call() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();
    let creds = Credentials { email: "s@school.org".to_owned(), password: String::new() };

    let err = login(&store, &api, &creds).await.unwrap_err();

    assert_eq!(err, SessionError::Invalid("password is required"));
    assert_eq!(api.login_calls.get(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
    let store = MemoryTokenStore::new();
    let mut api = FakeApi::new();
    api.login = Err(ApiError::Status(401));

    let err = login(&store, &api, &credentials()).await.unwrap_err();

    assert_eq!(err, SessionError::Api(ApiError::Status(401)));
    assert_eq!(err.user_message(), "Incorrect email or password.");
    assert!(store.is_empty());
}

#[tokio::test]
async fn login_then_verify_restores_the_same_user() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();

    login(&store, &api, &credentials()).await.unwrap();
    let outcome = verify_session(&store, &api).await;

    assert_eq!(outcome.user(), Some(&student()));
    assert_eq!(api.seen_tokens.borrow().as_slice(), ["fresh-access".to_owned()]);
}

#[tokio::test]
async fn register_validates_before_calling() {
    let api = FakeApi::new();
    let reg = Registration {
        email: "t@school.org".to_owned(),
        password: "short".to_owned(),
        confirm_password: "short".to_owned(),
        full_name: "Teacher".to_owned(),
        role: Role::Teacher,
    };

    let err = register(&api, &reg).await.unwrap_err();

    assert!(matches!(err, SessionError::Invalid(_)));
    assert_eq!(api.register_calls.get(), 0);
}

#[tokio::test]
async fn register_returns_created_user_without_storing_tokens() {
    let api = FakeApi::new();
    let reg = Registration {
        email: "t@school.org".to_owned(),
        password: "long-password".to_owned(),
        confirm_password: "long-password".to_owned(),
        full_name: "Teacher".to_owned(),
        role: Role::Teacher,
    };

    let user = register(&api, &reg).await.unwrap();

    assert_eq!(user.role, Role::Teacher);
    assert_eq!(api.register_calls.get(), 1);
}

#[tokio::test]
async fn logout_clears_tokens_even_when_server_fails() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let mut api = FakeApi::new();
    api.logout = Err(ApiError::Transport("offline".to_owned()));

    logout(&store, &api).await.unwrap();

    assert!(store.is_empty());
    assert_eq!(api.seen_tokens.borrow().as_slice(), ["abc".to_owned()]);
}

#[tokio::test]
async fn logout_without_session_skips_server_call() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();

    logout(&store, &api).await.unwrap();

    assert!(api.seen_tokens.borrow().is_empty());
}

// =============================================================================
// profile / password
// =============================================================================

#[tokio::test]
async fn update_profile_sends_stored_token_and_returns_updated_user() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new();
    let update = ProfileUpdate { full_name: Some("Asha".to_owned()), ..ProfileUpdate::default() };

    let user = update_profile(&store, &api, &update).await.unwrap();

    assert_eq!(user.full_name.as_deref(), Some("Asha"));
    assert_eq!(api.seen_tokens.borrow().as_slice(), ["abc".to_owned()]);
    assert_eq!(api.seen_updates.borrow().as_slice(), [update]);
}

#[tokio::test]
async fn update_profile_without_session_makes_no_call() {
    let store = MemoryTokenStore::new();
    let api = FakeApi::new();
    let update = ProfileUpdate { language: Some("es".to_owned()), ..ProfileUpdate::default() };

    let err = update_profile(&store, &api, &update).await.unwrap_err();

    assert_eq!(err, SessionError::SignedOut);
    assert_eq!(api.account_calls.get(), 0);
}

#[tokio::test]
async fn empty_profile_update_is_rejected_locally() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new();

    let err = update_profile(&store, &api, &ProfileUpdate::default()).await.unwrap_err();

    assert_eq!(err, SessionError::Invalid("nothing to update"));
    assert_eq!(api.account_calls.get(), 0);
}

#[tokio::test]
async fn change_password_keeps_tokens() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let api = FakeApi::new();
    let change = PasswordChange { current_password: "old-password".to_owned(), new_password: "new-password".to_owned() };

    change_password(&store, &api, &change).await.unwrap();

    assert_eq!(api.seen_tokens.borrow().as_slice(), ["abc".to_owned()]);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc"));
}

#[tokio::test]
async fn wrong_current_password_surfaces_server_status() {
    let store = MemoryTokenStore::with_pair("abc", "r1");
    let mut api = FakeApi::new();
    api.change_password = Err(ApiError::Status(400));
    let change = PasswordChange { current_password: "wrong-pass".to_owned(), new_password: "new-password".to_owned() };

    let err = change_password(&store, &api, &change).await.unwrap_err();

    assert_eq!(err, SessionError::Api(ApiError::Status(400)));
    assert!(!store.is_empty());
}

#[tokio::test]
async fn forgot_password_needs_no_session_but_a_valid_email() {
    let api = FakeApi::new();

    let err = forgot_password(&api, &PasswordReset { email: "nope".to_owned() }).await.unwrap_err();
    assert!(matches!(err, SessionError::Invalid(_)));
    assert_eq!(api.account_calls.get(), 0);

    forgot_password(&api, &PasswordReset { email: "s@school.org".to_owned() }).await.unwrap();
    assert_eq!(api.account_calls.get(), 1);
}

// =============================================================================
// SessionError messages
// =============================================================================

#[test]
fn user_message_distinguishes_unreachable_server() {
    let err = SessionError::Api(ApiError::Transport("dns".to_owned()));
    assert_eq!(err.user_message(), "Could not reach the server.");
}

#[test]
fn user_message_includes_unexpected_status() {
    assert_eq!(SessionError::Api(ApiError::Status(500)).user_message(), "Server error (500).");
}
