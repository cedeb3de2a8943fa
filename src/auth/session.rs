//! Cookie-held sessions. Validity lives entirely in the signed token, so
//! verification is stateless and needs no shared session table.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::token::TokenCodec;
use crate::config::Environment;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "secure_dash_session";

/// The identity recovered from a valid, unexpired session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedSession {
    pub subject_id: i64,
}

#[derive(Clone)]
pub struct SessionManager {
    codec: TokenCodec,
    ttl: chrono::Duration,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(codec: TokenCodec, ttl: chrono::Duration, environment: Environment) -> Self {
        Self {
            codec,
            ttl,
            // Local development runs over plain http.
            secure_cookies: environment.is_production(),
        }
    }

    /// Issue a fresh session token for `subject_id` and set it as the
    /// session cookie, replacing any prior session on this client.
    pub fn create_session(
        &self,
        jar: CookieJar,
        subject_id: i64,
    ) -> Result<CookieJar, AppError> {
        let token = self.codec.encode(subject_id, self.ttl)?;
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build();
        Ok(jar.add(cookie))
    }

    /// Read and verify the session cookie. Absent cookie, failed decode and
    /// passed expiry all collapse to `None`; this never redirects.
    pub fn verify_session(&self, jar: &CookieJar) -> Option<VerifiedSession> {
        let cookie = jar.get(SESSION_COOKIE)?;
        let claims = self.codec.decode(cookie.value())?;
        if claims.exp <= chrono::Utc::now().timestamp() {
            return None;
        }
        let subject_id = claims.sub.parse().ok()?;
        Some(VerifiedSession { subject_id })
    }

    /// Clear the session cookie. A no-op for clients without one.
    pub fn delete_session(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::from(SESSION_COOKIE);
        cookie.set_path("/");
        jar.remove(cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(ttl: chrono::Duration) -> SessionManager {
        SessionManager::new(
            TokenCodec::new(b"test-signing-secret"),
            ttl,
            Environment::Development,
        )
    }

    #[test]
    fn created_session_verifies() {
        let sessions = manager(chrono::Duration::hours(24));
        let jar = sessions.create_session(CookieJar::new(), 7).unwrap();

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let session = sessions.verify_session(&jar).unwrap();
        assert_eq!(session.subject_id, 7);
    }

    #[test]
    fn production_sessions_are_secure() {
        let sessions = SessionManager::new(
            TokenCodec::new(b"test-signing-secret"),
            chrono::Duration::hours(24),
            Environment::Production,
        );
        let jar = sessions.create_session(CookieJar::new(), 7).unwrap();
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn absent_cookie_is_no_session() {
        let sessions = manager(chrono::Duration::hours(24));
        assert!(sessions.verify_session(&CookieJar::new()).is_none());
    }

    #[test]
    fn expired_session_is_no_session() {
        let sessions = manager(chrono::Duration::hours(-1));
        let jar = sessions.create_session(CookieJar::new(), 7).unwrap();
        assert!(sessions.verify_session(&jar).is_none());
    }

    #[test]
    fn garbage_cookie_is_no_session() {
        let sessions = manager(chrono::Duration::hours(24));
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "garbage"));
        assert!(sessions.verify_session(&jar).is_none());
    }

    #[test]
    fn forged_cookie_is_no_session() {
        let forger = SessionManager::new(
            TokenCodec::new(b"attacker-secret"),
            chrono::Duration::hours(24),
            Environment::Development,
        );
        let jar = forger.create_session(CookieJar::new(), 7).unwrap();

        let sessions = manager(chrono::Duration::hours(24));
        assert!(sessions.verify_session(&jar).is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let sessions = manager(chrono::Duration::hours(24));
        let jar = sessions.create_session(CookieJar::new(), 7).unwrap();

        let jar = sessions.delete_session(jar);
        assert!(sessions.verify_session(&jar).is_none());

        // Clearing again must not panic or resurrect anything.
        let jar = sessions.delete_session(jar);
        assert!(sessions.verify_session(&jar).is_none());
    }
}
