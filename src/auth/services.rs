use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_against_decoy, verify_password},
        repo_types::NewUser,
    },
    error::AppError,
    storage::{Storage, StorageError},
};

pub const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Creates an account and returns its id. No token is issued here.
pub async fn signup(storage: &dyn Storage, req: SignupRequest) -> Result<Uuid, AppError> {
    let (Some(email), Some(password)) = (non_blank(req.email), non_blank(req.password)) else {
        warn!("signup missing email or password");
        return Err(AppError::validation("Email and password are required"));
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }

    if storage.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&password)?;
    let user = storage
        .create_user(NewUser {
            username: non_blank(req.username).map(|u| u.trim().to_string()),
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent signup for the same email
            StorageError::Conflict => AppError::Conflict("User already exists".into()),
            other => other.into(),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user.id)
}

/// Checks credentials and issues a bearer token.
///
/// Unknown email and wrong password fail identically.
pub async fn login(
    storage: &dyn Storage,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<String, AppError> {
    let (Some(email), Some(password)) = (non_blank(req.email), non_blank(req.password)) else {
        return Err(AppError::validation("Email and password are required"));
    };
    let email = normalize_email(&email);

    let Some(user) = storage.find_user_by_email(&email).await? else {
        verify_against_decoy(&password);
        warn!(email = %email, "login unknown email");
        return Err(AppError::auth(INVALID_CREDENTIALS));
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::auth(INVALID_CREDENTIALS));
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn signup_req(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            username: None,
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("no-at.com"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[tokio::test]
    async fn short_password_is_rejected_regardless_of_other_fields() {
        let state = AppState::fake();
        for email in ["a@x.com", "not-an-email", "   "] {
            let err = signup(state.storage.as_ref(), signup_req(email, "12345"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{email}: {err:?}");
        }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let state = AppState::fake();
        let req = SignupRequest {
            email: None,
            password: Some("secret1".into()),
            username: None,
        };
        let err = signup(state.storage.as_ref(), req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let state = AppState::fake();
        let storage = state.storage.as_ref();
        signup(storage, signup_req("a@x.com", "secret1")).await.unwrap();
        let err = signup(storage, signup_req("  A@X.com ", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_issues_a_token_for_the_account() {
        let state = AppState::fake();
        let storage = state.storage.as_ref();
        let user_id = signup(storage, signup_req("a@x.com", "secret1")).await.unwrap();

        let token = login(storage, &state.keys, login_req("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(state.keys.verify(&token).unwrap().sub, user_id);
    }

    #[tokio::test]
    async fn bad_credentials_fail_uniformly() {
        let state = AppState::fake();
        let storage = state.storage.as_ref();
        signup(storage, signup_req("a@x.com", "secret1")).await.unwrap();

        let wrong_pw = login(storage, &state.keys, login_req("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown = login(storage, &state.keys, login_req("b@x.com", "secret1"))
            .await
            .unwrap_err();

        for err in [wrong_pw, unknown] {
            match err {
                AppError::Auth(msg) => assert_eq!(msg, INVALID_CREDENTIALS),
                other => panic!("expected Auth, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn unknown_email_costs_a_password_verification() {
        let state = AppState::fake();
        let hash = hash_password("secret1").unwrap();

        let started = std::time::Instant::now();
        verify_password("secret1", &hash).unwrap();
        let one_verify = started.elapsed();

        let started = std::time::Instant::now();
        let err = login(state.storage.as_ref(), &state.keys, login_req("nobody@x.com", "secret1"))
            .await
            .unwrap_err();
        let miss = started.elapsed();

        assert!(matches!(err, AppError::Auth(_)));
        assert!(miss * 4 >= one_verify, "miss {miss:?} vs verify {one_verify:?}");
    }
}
