//! Request gate: classifies every inbound path as public or protected and
//! redirects based on session validity, before any route handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;

/// Routes reachable without a session.
const PUBLIC_ROUTES: &[&str] = &["/login", "/signup"];

/// Where an authenticated caller lands by default.
const LANDING_ROUTE: &str = "/";

const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

/// Paths the gate never classifies: static assets and the auth API
/// endpoints, which answer with their own status codes.
pub fn bypasses_gate(path: &str) -> bool {
    path.starts_with("/assets/")
        || path == "/favicon.ico"
        || path.contains('.')
        || path.starts_with("/api/auth/")
}

/// Pure gate policy over request metadata.
pub fn evaluate(path: &str, authenticated: bool) -> GateDecision {
    if bypasses_gate(path) {
        return GateDecision::Allow;
    }

    let public = PUBLIC_ROUTES.contains(&path);
    match (authenticated, public) {
        (true, true) => GateDecision::Redirect(LANDING_ROUTE.to_string()),
        (false, false) => GateDecision::Redirect(format!(
            "{LOGIN_ROUTE}?from={}",
            urlencoding::encode(path)
        )),
        _ => GateDecision::Allow,
    }
}

/// Axum adapter around [`evaluate`]. Bypass paths are let through before any
/// token verification happens; on allow, the verified identity (if any) is
/// stashed in request extensions for downstream handlers.
pub async fn gate_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if bypasses_gate(request.uri().path()) {
        return next.run(request).await;
    }

    let verified = state.sessions.verify_session(&jar);

    match evaluate(request.uri().path(), verified.is_some()) {
        GateDecision::Allow => {
            if let Some(session) = verified {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        GateDecision::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), %target, "gated request");
            Redirect::to(&target).into_response()
        }
    }
}
