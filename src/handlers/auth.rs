use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::{
    auth::hasher,
    error::AppError,
    models::user::{LoginPayload, NewUser, Profile, SignupPayload},
    validation, AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<SignupPayload>,
) -> Result<(CookieJar, Redirect), AppError> {
    validation::validate_signup(&payload).map_err(|errors| AppError::Validation {
        message: "Missing Fields. Failed to Create Account.",
        errors,
    })?;

    let password_hash = hasher::hash_password(&payload.password)?;

    let user = state
        .users
        .insert(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await?;

    let jar = state.sessions.create_session(jar, user.id)?;
    tracing::info!(user_id = user.id, "account created");

    Ok((jar, Redirect::to("/")))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginPayload>,
) -> Result<(CookieJar, Redirect), AppError> {
    validation::validate_login(&payload).map_err(|errors| AppError::Validation {
        message: "Invalid fields.",
        errors,
    })?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !hasher::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let jar = state.sessions.create_session(jar, user.id)?;
    tracing::debug!(user_id = user.id, "login");

    Ok((jar, Redirect::to(return_target(payload.from.as_deref()))))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    (state.sessions.delete_session(jar), Redirect::to("/login"))
}

/// Identity probe for the current session subject.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(session) = state.sessions.verify_session(&jar) else {
        return unauthenticated();
    };

    match state.users.find_by_id(session.subject_id).await {
        Ok(Some(user)) => Json(Profile::from(user)).into_response(),
        // Valid token for a subject that no longer exists.
        Ok(None) => unauthenticated(),
        Err(e) => AppError::from(e).into_response(),
    }
}

fn unauthenticated() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "user": null }))).into_response()
}

/// Only same-site absolute paths are honored as post-login targets.
fn return_target(from: Option<&str>) -> &str {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}
