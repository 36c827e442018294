//! Login and signup views served next to the API.

use axum::{
    response::{Html, Redirect},
    routing::get,
    Router,
};

use crate::state::AppState;

const LOGIN_PAGE: &str = include_str!("../static/login.html");
const SIGNUP_PAGE: &str = include_str!("../static/signup.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/login") }))
        .route("/login", get(|| async { Html(LOGIN_PAGE) }))
        .route("/signup", get(|| async { Html(SIGNUP_PAGE) }))
}
